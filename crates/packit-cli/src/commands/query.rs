//! `packit query`: run a batch query body read from a file

use camino::Utf8Path;

use packit_core::error::{PackitError, PackitResult};
use packit_core::types::PackageMetadata;
use packit_registry::PackagesBody;

use super::{read_input, CommandContext};

pub async fn execute(file: &Utf8Path, ctx: &CommandContext) -> PackitResult<()> {
    let content = read_input(file).await?;
    let body = parse_body(&content, file.as_str())?;

    if body.items.is_empty() {
        ctx.output.warn(&format!("{} contains no query items", file));
    }

    let service = ctx.open_service().await?;
    let rows = service.query_packages(&body.items)?;

    render_rows(&rows, ctx)
}

/// Decode a `{"Items": [...]}` query body
pub fn parse_body(content: &str, origin: &str) -> PackitResult<PackagesBody> {
    serde_json::from_str(content).map_err(|e| PackitError::InvalidRequest {
        origin: origin.to_string(),
        message: e.to_string(),
    })
}

/// Print metadata rows, one per line or as a JSON array
pub fn render_rows(rows: &[PackageMetadata], ctx: &CommandContext) -> PackitResult<()> {
    if ctx.output.is_json() {
        return ctx.output.print_json(rows);
    }

    for row in rows {
        ctx.output.line(&format!(
            "{}\t{}@{}",
            row.id,
            row.name,
            ctx.output.highlight(&row.version)
        ));
    }

    Ok(())
}
