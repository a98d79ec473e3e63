//! Metadata store abstraction and the in-memory catalog store.
//!
//! The store owns whatever persistence sits behind the registry. The lookup
//! service only ever sees typed rows coming out of it.

use camino::Utf8Path;
use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use packit_core::error::PackitError;
use packit_core::types::PackageMetadata;

use crate::api::PackageRating;
use crate::RegistryResult;

/// Timestamp layout of stored upload times (UTC)
pub const UPLOAD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A stored version together with its upload details
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub metadata: PackageMetadata,
    pub uploaded_by: Option<String>,
    pub uploaded_at: Option<String>,
}

/// Read access to stored package metadata
pub trait MetadataStore: Send + Sync {
    /// Every stored row for an exact package name
    fn rows_for_name(&self, name: &str) -> RegistryResult<Vec<PackageMetadata>>;

    /// Every stored row whose package name matches `pattern`
    fn rows_matching(&self, pattern: &Regex) -> RegistryResult<Vec<PackageMetadata>>;

    /// The row with the given id
    fn row_by_id(&self, id: &str) -> RegistryResult<Option<PackageMetadata>>;

    /// Every stored row for a package name with its upload details
    fn uploads_for_name(&self, name: &str) -> RegistryResult<Vec<Upload>>;

    /// Rating of the package version with the given id
    fn rating_for_id(&self, id: &str) -> RegistryResult<Option<PackageRating>>;
}

/// One entry of a JSON catalog file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CatalogRecord {
    #[serde(flatten)]
    pub metadata: PackageMetadata,
    #[serde(rename = "UploadedBy", default, skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
    #[serde(rename = "UploadedTime", default, skip_serializing_if = "Option::is_none")]
    pub uploaded_time: Option<String>,
    #[serde(rename = "Rating", default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<PackageRating>,
}

impl CatalogRecord {
    pub fn new(metadata: PackageMetadata) -> Self {
        Self {
            metadata,
            uploaded_by: None,
            uploaded_time: None,
            rating: None,
        }
    }
}

/// Store backed by an in-memory list of catalog records
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<CatalogRecord>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from catalog records
    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON catalog (an array of records)
    pub fn from_json(content: &str, origin: &str) -> RegistryResult<Self> {
        let records: Vec<CatalogRecord> =
            serde_json::from_str(content).map_err(|e| PackitError::CatalogParse {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self::from_records(records))
    }

    /// Load a JSON catalog file
    pub async fn load(path: &Utf8Path) -> RegistryResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PackitError::io(format!("Failed to read catalog {}", path), e))?;

        Self::from_json(&content, path.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order
    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }
}

impl MetadataStore for MemoryStore {
    fn rows_for_name(&self, name: &str) -> RegistryResult<Vec<PackageMetadata>> {
        Ok(self
            .records
            .iter()
            .filter(|record| record.metadata.name == name)
            .map(|record| record.metadata.clone())
            .collect())
    }

    fn rows_matching(&self, pattern: &Regex) -> RegistryResult<Vec<PackageMetadata>> {
        Ok(self
            .records
            .iter()
            .filter(|record| pattern.is_match(&record.metadata.name))
            .map(|record| record.metadata.clone())
            .collect())
    }

    fn row_by_id(&self, id: &str) -> RegistryResult<Option<PackageMetadata>> {
        Ok(self
            .records
            .iter()
            .find(|record| record.metadata.id == id)
            .map(|record| record.metadata.clone()))
    }

    fn uploads_for_name(&self, name: &str) -> RegistryResult<Vec<Upload>> {
        Ok(self
            .records
            .iter()
            .filter(|record| record.metadata.name == name)
            .map(|record| Upload {
                metadata: record.metadata.clone(),
                uploaded_by: record.uploaded_by.clone(),
                uploaded_at: record.uploaded_time.clone(),
            })
            .collect())
    }

    fn rating_for_id(&self, id: &str) -> RegistryResult<Option<PackageRating>> {
        Ok(self
            .records
            .iter()
            .find(|record| record.metadata.id == id)
            .and_then(|record| record.rating.clone()))
    }
}

/// Convert a stored upload time into a UTC timestamp
pub fn parse_upload_time(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw.trim(), UPLOAD_TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"ID": "1", "Name": "lodash", "Version": "4.17.20", "UploadedTime": "2021-02-20 08:15:00"},
        {"ID": "2", "Name": "lodash", "Version": "4.17.21", "UploadedBy": "jdd"},
        {"ID": "3", "Name": "lodash-es", "Version": "4.17.21"},
        {"ID": "4", "Name": "react", "Version": "18.2.0", "Rating": {
            "BusFactor": 0.8, "Correctness": 0.9, "RampUp": 0.6, "ResponsiveMaintainer": 0.7,
            "LicenseScore": 1.0, "GoodPinningPractice": 0.5, "PullRequest": 0.4, "NetScore": 0.75
        }}
    ]"#;

    fn store() -> MemoryStore {
        MemoryStore::from_json(CATALOG, "inline").unwrap()
    }

    #[test]
    fn test_from_json() {
        let store = store();
        assert_eq!(store.len(), 4);
        assert_eq!(store.records()[0].uploaded_time.as_deref(), Some("2021-02-20 08:15:00"));
        assert_eq!(store.records()[1].uploaded_by.as_deref(), Some("jdd"));
    }

    #[test]
    fn test_from_json_rejects_bad_catalog() {
        let err = MemoryStore::from_json(r#"[{"ID": "1"}]"#, "broken.json").unwrap_err();
        assert!(matches!(err, PackitError::CatalogParse { path, .. } if path == "broken.json"));
    }

    #[test]
    fn test_rows_for_name_is_exact() {
        let rows = store().rows_for_name("lodash").unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.name == "lodash"));
        assert!(store().rows_for_name("left-pad").unwrap().is_empty());
    }

    #[test]
    fn test_rows_matching() {
        let pattern = Regex::new("^lodash").unwrap();
        let rows = store().rows_matching(&pattern).unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_row_by_id_and_rating() {
        let store = store();
        assert_eq!(store.row_by_id("3").unwrap().unwrap().name, "lodash-es");
        assert!(store.row_by_id("99").unwrap().is_none());

        assert_eq!(store.rating_for_id("4").unwrap().unwrap().net_score, 0.75);
        assert!(store.rating_for_id("1").unwrap().is_none());
    }

    #[test]
    fn test_uploads_for_name() {
        let uploads = store().uploads_for_name("lodash").unwrap();
        assert_eq!(uploads.len(), 2);
        assert_eq!(uploads[1].uploaded_by.as_deref(), Some("jdd"));
        assert_eq!(uploads[1].uploaded_at, None);
    }

    #[test]
    fn test_parse_upload_time() {
        let parsed = parse_upload_time("2021-02-20 08:15:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2021-02-20T08:15:00+00:00");
        assert!(parse_upload_time("20/02/2021").is_none());
    }

    #[tokio::test]
    async fn test_load_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::try_from(dir.path().join("catalog.json")).unwrap();
        tokio::fs::write(&path, CATALOG).await.unwrap();

        let store = MemoryStore::load(&path).await.unwrap();
        assert_eq!(store.len(), 4);
    }

    #[tokio::test]
    async fn test_load_missing_catalog() {
        let path = Utf8Path::new("/nonexistent/packit/catalog.json");
        assert!(matches!(
            MemoryStore::load(path).await,
            Err(PackitError::Io { .. })
        ));
    }
}
