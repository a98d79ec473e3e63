//! Package metadata rows as stored in the registry.

use super::{Version, VersionError};
use serde::{Deserialize, Serialize};

/// One stored package version, as returned by the metadata store
///
/// The version is kept as the raw stored string; a row may hold a version that
/// does not parse, and callers decide what to do with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageMetadata {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Version")]
    pub version: String,
}

impl PackageMetadata {
    /// Create new package metadata
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Parse the stored version string
    pub fn parsed_version(&self) -> Result<Version, VersionError> {
        self.version.parse()
    }

    /// Check if this is a valid package name
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '@'))
            && !name.starts_with('-')
            && !name.ends_with('-')
    }
}
