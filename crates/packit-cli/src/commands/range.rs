//! `packit range`: synthesize the range describing literal versions

use packit_core::error::{PackitError, PackitResult};
use packit_core::types::Version;
use packit_resolver::{selects_exactly, synthesize, VersionSet};

use super::CommandContext;

pub async fn execute(versions: &[String], ctx: &CommandContext) -> PackitResult<()> {
    let set = parse_versions(versions)?;
    let descriptor = synthesize(&set)?;
    let covers_all = selects_exactly(&descriptor, &set);

    if ctx.output.is_json() {
        return ctx.output.print_json(&serde_json::json!({
            "Range": descriptor.to_string(),
            "Kind": format!("{:?}", descriptor.kind()),
            "SelectsAll": covers_all,
        }));
    }

    ctx.output.line(&ctx.output.highlight_range(&descriptor.to_string()));
    if !covers_all {
        ctx.output.warn(&format!(
            "{} does not select every given version",
            descriptor
        ));
    }

    Ok(())
}

/// Parse literal version strings into a set; the first bad one fails
pub fn parse_versions(versions: &[String]) -> PackitResult<VersionSet> {
    versions
        .iter()
        .map(|raw| {
            raw.parse::<Version>()
                .map_err(|e| PackitError::invalid_version(raw.as_str(), e))
        })
        .collect()
}
