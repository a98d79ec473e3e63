//! Registry request and response bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use packit_core::types::PackageMetadata;

/// Action recorded for every stored version in a package history
pub const UPLOADED_ACTION: &str = "Uploaded";

/// One name/version-range pair of a package query
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PackageQuery {
    /// Exact package name
    #[serde(rename = "Name")]
    pub name: String,
    /// Version-range expression
    #[serde(rename = "Version")]
    pub version: String,
}

/// Body of a batch package query
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct PackagesBody {
    #[serde(rename = "Items", default)]
    pub items: Vec<PackageQuery>,
}

/// Body of a package-name pattern search
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PackageRegExBody {
    #[serde(rename = "RegEx")]
    pub regex: String,
}

/// One package found by a pattern search, with the range covering its versions
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegExReturn {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Version")]
    pub version: String,
}

/// Quality scores for a package
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackageRating {
    pub bus_factor: f64,
    pub correctness: f64,
    pub ramp_up: f64,
    pub responsive_maintainer: f64,
    pub license_score: f64,
    pub good_pinning_practice: f64,
    pub pull_request: f64,
    pub net_score: f64,
}

/// Registry user attached to a history entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub name: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

/// One event in a package's history
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PackageHistoryEntry {
    #[serde(rename = "User")]
    pub user: User,
    /// Upload time, absent when the store has none or it did not parse
    #[serde(rename = "Date", skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "PackageMetadata")]
    pub metadata: PackageMetadata,
    #[serde(rename = "Action")]
    pub action: String,
}
