//! `packit history`: upload history of one package

use packit_core::error::{PackitError, PackitResult};

use super::{hint_similar_name, CommandContext};

pub async fn execute(name: &str, ctx: &CommandContext) -> PackitResult<()> {
    let service = ctx.open_service().await?;

    let entries = match service.package_history(name) {
        Ok(entries) => entries,
        Err(err @ PackitError::PackageNotFound { .. }) => {
            hint_similar_name(name, &service, ctx);
            return Err(err);
        },
        Err(err) => return Err(err),
    };

    if ctx.output.is_json() {
        return ctx.output.print_json(&entries);
    }

    for entry in &entries {
        let date = entry
            .date
            .map(|date| date.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());

        ctx.output.line(&format!(
            "{}\t{}\t{}\t{} (id {})",
            date,
            entry.user.name,
            entry.action,
            ctx.output.highlight(&entry.metadata.version),
            entry.metadata.id
        ));
    }

    Ok(())
}
