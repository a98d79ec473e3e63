//! `packit search`: one synthesized range per package name matching a pattern

use packit_core::error::PackitResult;

use super::CommandContext;

pub async fn execute(pattern: &str, ctx: &CommandContext) -> PackitResult<()> {
    let service = ctx.open_service().await?;
    let found = service.search_by_regex(pattern)?;

    if ctx.output.is_json() {
        return ctx.output.print_json(&found);
    }

    if found.is_empty() {
        ctx.output.warn(&format!("No package names match {}", pattern));
    }

    for package in &found {
        ctx.output.line(&format!(
            "{}\t{}",
            package.name,
            ctx.output.highlight_range(&package.version)
        ));
    }

    Ok(())
}
