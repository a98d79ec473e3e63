//! Unit tests for CLI commands.

use super::*;
use packit_core::types::{RangeKind, Version};
use packit_resolver::synthesize;
use tempfile::TempDir;

const CATALOG: &str = r#"[
    {"ID": "1", "Name": "lodash", "Version": "1.0.0", "UploadedBy": "jdd", "UploadedTime": "2020-01-01 00:00:00"},
    {"ID": "2", "Name": "lodash", "Version": "1.2.0"},
    {"ID": "3", "Name": "lodash", "Version": "1.2.5"},
    {"ID": "4", "Name": "express", "Version": "4.18.2", "Rating": {
        "BusFactor": 0.5, "Correctness": 0.9, "RampUp": 0.7, "ResponsiveMaintainer": 0.4,
        "LicenseScore": 1.0, "GoodPinningPractice": 0.3, "PullRequest": 0.6, "NetScore": 0.65
    }},
    {"ID": "5", "Name": "express", "Version": "four"}
]"#;

/// Create a temporary directory holding the test catalog
fn create_temp_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    std::fs::write(dir.path().join("catalog.json"), CATALOG).expect("Failed to write catalog");
    dir
}

/// Create a test command context in a temporary directory
fn create_test_context(temp_dir: &TempDir) -> CommandContext {
    CommandContext {
        cwd: Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap(),
        settings: PackitToml::default(),
        source: ConfigSource::Defaults,
        output: crate::output::OutputHandler::new(false),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_suggest_similar_name() {
    let names = ["lodash", "express", "react"];

    assert_eq!(suggest_similar_name("lodahs", names), Some("lodash".to_string()));
    assert_eq!(suggest_similar_name("expres", names), Some("express".to_string()));

    // Exact names are not suggestions
    assert_eq!(suggest_similar_name("react", names), None);
    assert_eq!(suggest_similar_name("completely-different", names), None);
}

#[test]
fn test_edit_distance() {
    assert_eq!(edit_distance("", ""), 0);
    assert_eq!(edit_distance("", "abc"), 3);
    assert_eq!(edit_distance("abc", ""), 3);
    assert_eq!(edit_distance("abc", "abc"), 0);
    assert_eq!(edit_distance("abc", "ab"), 1);
    assert_eq!(edit_distance("abc", "abcd"), 1);
    assert_eq!(edit_distance("lodash", "lodahs"), 2);
    assert_eq!(edit_distance("kitten", "sitting"), 3);
}

#[test]
fn test_parsed_versions_synthesize() {
    let describe = |versions: &[&str]| synthesize(&range::parse_versions(&strings(versions)).unwrap()).unwrap();

    let tilde = describe(&["1.0.0", "1.2.0", "1.2.5"]);
    assert_eq!(tilde.kind(), RangeKind::Tilde);
    assert_eq!(tilde.to_string(), "~1.0.0");

    assert_eq!(describe(&["2.0.0", "2.0.5"]).to_string(), "^2.0.0");
    assert_eq!(describe(&["3.0.0", "1.9.0"]).to_string(), "1.9.0 - 3.0.0");
    assert_eq!(describe(&["1.4.2", "1.4.2"]).to_string(), "1.4.2");
}

#[test]
fn test_parse_versions_rejects_bad_input() {
    let err = range::parse_versions(&strings(&["1.0.0", "1.0"])).unwrap_err();
    assert!(matches!(err, PackitError::InvalidVersion { input, .. } if input == "1.0"));

    let set = range::parse_versions(&strings(&["v1.0.0", "1.0.0"])).unwrap();
    assert_eq!(set.len(), 1);
    assert!(set.contains(&Version::new(1, 0, 0)));
}

#[test]
fn test_range_command_runs_without_catalog() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = create_test_context(&temp_dir);

    let result = tokio_test::block_on(range::execute(&strings(&["1.0.0", "2.0.0"]), &ctx));
    assert!(result.is_ok());
}

#[test]
fn test_parse_query_body() {
    let body = query::parse_body(r#"{"Items": [{"Name": "lodash", "Version": "^1.0.0"}]}"#, "q.json").unwrap();
    assert_eq!(body.items.len(), 1);
    assert_eq!(body.items[0].version, "^1.0.0");

    let err = query::parse_body("[1, 2]", "q.json").unwrap_err();
    assert!(matches!(err, PackitError::InvalidRequest { origin, .. } if origin == "q.json"));
}

#[tokio::test]
async fn test_query_command() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    let file = ctx.cwd.join("query.json");
    tokio::fs::write(&file, r#"{"Items": [{"Name": "lodash", "Version": "1.0.0-1.2.0"}]}"#)
        .await
        .unwrap();

    assert!(query::execute(&file, &ctx).await.is_ok());
}

#[tokio::test]
async fn test_query_command_invalid_range() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    let file = ctx.cwd.join("query.json");
    tokio::fs::write(&file, r#"{"Items": [{"Name": "lodash", "Version": "~one"}]}"#)
        .await
        .unwrap();

    let err = query::execute(&file, &ctx).await.unwrap_err();
    assert!(matches!(err, PackitError::InvalidConstraint { .. }));
}

#[tokio::test]
async fn test_match_command() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    assert!(matcher::execute("lodash", "~1.2.0", &ctx).await.is_ok());

    // No match is not an error
    assert!(matcher::execute("lodahs", "1.0.0", &ctx).await.is_ok());
}

#[tokio::test]
async fn test_search_command() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    assert!(search::execute("^lod", &ctx).await.is_ok());
    assert!(matches!(
        search::execute("[", &ctx).await,
        Err(PackitError::InvalidPattern { .. })
    ));
}

#[tokio::test]
async fn test_history_command() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    assert!(history::execute("lodash", &ctx).await.is_ok());
    assert!(matches!(
        history::execute("lodahs", &ctx).await,
        Err(PackitError::PackageNotFound { .. })
    ));
}

#[tokio::test]
async fn test_rate_command() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    assert!(rate::execute("4", &ctx).await.is_ok());
    assert!(matches!(
        rate::execute("1", &ctx).await,
        Err(PackitError::PackageNotFound { .. })
    ));
}

#[tokio::test]
async fn test_inspect_catalog() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    let report = check::inspect_catalog(&ctx).await.unwrap();
    assert_eq!(report.rows, 5);
    assert_eq!(report.packages, 2);
    assert_eq!(report.unparseable_rows, vec!["5".to_string()]);
}

#[tokio::test]
async fn test_missing_catalog() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = create_test_context(&temp_dir);

    assert!(matches!(ctx.open_service().await, Err(PackitError::Io { .. })));
    assert!(check::execute(&ctx).await.is_err());
}

#[tokio::test]
async fn test_catalog_path_resolution() {
    let temp_dir = create_temp_dir();
    let mut ctx = create_test_context(&temp_dir);
    assert_eq!(ctx.catalog_path(), ctx.cwd.join("catalog.json"));

    ctx.settings.registry.catalog = Utf8PathBuf::from("/srv/packit/catalog.json");
    assert_eq!(ctx.catalog_path().as_str(), "/srv/packit/catalog.json");
}

#[tokio::test]
async fn test_dispatch_command() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir);

    let command = Commands::Search {
        pattern: "^express$".to_string(),
    };
    assert!(dispatch_command(command, &ctx).await.is_ok());
}
