//! `packit match`: rows of one package whose version satisfies a range

use packit_core::error::PackitResult;
use packit_registry::PackageQuery;

use super::{hint_similar_name, query::render_rows, CommandContext};

pub async fn execute(name: &str, range: &str, ctx: &CommandContext) -> PackitResult<()> {
    let service = ctx.open_service().await?;

    let rows = service.query_package(&PackageQuery {
        name: name.to_string(),
        version: range.to_string(),
    })?;

    render_rows(&rows, ctx)?;

    if rows.is_empty() && !ctx.output.is_json() {
        ctx.output.warn(&format!("No stored version of {} matches {}", name, range));
        hint_similar_name(name, &service, ctx);
    }

    Ok(())
}
