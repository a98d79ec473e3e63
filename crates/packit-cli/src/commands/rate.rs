//! `packit rate`: rating of one stored package version

use packit_core::error::PackitResult;

use super::CommandContext;

pub async fn execute(id: &str, ctx: &CommandContext) -> PackitResult<()> {
    let service = ctx.open_service().await?;
    let rating = service.package_rating(id)?;

    if ctx.output.is_json() {
        return ctx.output.print_json(&rating);
    }

    let package = service.package(id)?;
    ctx.output.info(&format!("{}@{}", package.name, package.version));

    let scores = [
        ("BusFactor", rating.bus_factor),
        ("Correctness", rating.correctness),
        ("RampUp", rating.ramp_up),
        ("ResponsiveMaintainer", rating.responsive_maintainer),
        ("LicenseScore", rating.license_score),
        ("GoodPinningPractice", rating.good_pinning_practice),
        ("PullRequest", rating.pull_request),
        ("NetScore", rating.net_score),
    ];

    for (label, score) in scores {
        ctx.output.line(&format!("{:<22}{:.2}", label, score));
    }

    Ok(())
}
