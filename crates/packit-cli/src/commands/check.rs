//! `packit check`: validate configuration and catalog

use std::collections::HashSet;

use packit_core::error::PackitResult;
use packit_resolver::VersionSet;

use super::CommandContext;

/// What a catalog check found
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogReport {
    pub catalog: String,
    pub rows: usize,
    pub packages: usize,
    pub unparseable_rows: Vec<String>,
}

pub async fn execute(ctx: &CommandContext) -> PackitResult<()> {
    ctx.output.info(&format!("Configuration: {:?}", ctx.source));

    let report = inspect_catalog(ctx).await?;

    if ctx.output.is_json() {
        return ctx.output.print_json(&report);
    }

    for id in &report.unparseable_rows {
        ctx.output.warn(&format!("Row {} has an unparseable version and is never matched", id));
    }

    ctx.output.success(&format!(
        "Catalog {} is valid: {} rows across {} packages",
        report.catalog, report.rows, report.packages
    ));

    Ok(())
}

/// Load the configured catalog and summarize it
pub async fn inspect_catalog(ctx: &CommandContext) -> PackitResult<CatalogReport> {
    let service = ctx.open_service().await?;
    let records = service.store().records();

    let packages: HashSet<&str> = records
        .iter()
        .map(|record| record.metadata.name.as_str())
        .collect();

    let (_, skipped) = VersionSet::from_rows(records.iter().map(|record| &record.metadata));

    Ok(CatalogReport {
        catalog: ctx.catalog_path().to_string(),
        rows: records.len(),
        packages: packages.len(),
        unparseable_rows: skipped.into_iter().map(|row| row.id).collect(),
    })
}
