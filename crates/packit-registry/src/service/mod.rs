//! Registry lookup service.
//!
//! Ties the metadata store to the constraint matcher and the range
//! synthesizer. Transport concerns (routing, auth, response codes) belong to
//! whatever sits in front of this type.

use std::time::Duration;

use indexmap::IndexSet;
use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, warn};

use packit_core::error::PackitError;
use packit_core::types::PackageMetadata;
use packit_resolver::{parse_constraint, selects_exactly, synthesize, SkippedRow, VersionSet};

use crate::api::{
    PackageHistoryEntry, PackageQuery, PackageRating, RegExReturn, User, UPLOADED_ACTION,
};
use crate::cache::RowCache;
use crate::store::{parse_upload_time, MetadataStore};
use crate::RegistryResult;

/// User recorded on history entries whose uploader is unknown
pub const ANONYMOUS_UPLOADER: &str = "anonymous";

/// Package lookup service over a metadata store
#[derive(Debug)]
pub struct RegistryService<S> {
    store: S,
    cache: RowCache,
}

impl<S: MetadataStore> RegistryService<S> {
    /// Create a service with the default row cache
    pub fn new(store: S) -> Self {
        Self {
            store,
            cache: RowCache::new(),
        }
    }

    /// Create a service with a custom row cache TTL (zero disables caching)
    pub fn with_cache_ttl(store: S, ttl: Duration) -> Self {
        Self {
            store,
            cache: RowCache::with_ttl(ttl),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &RowCache {
        &self.cache
    }

    /// All stored rows for a name, served from the cache when fresh
    fn rows_for(&self, name: &str) -> RegistryResult<Vec<PackageMetadata>> {
        if let Some(rows) = self.cache.get(name) {
            debug!("Row cache hit for {}", name);
            return Ok(rows);
        }

        let rows = self.store.rows_for_name(name)?;
        self.cache.insert(name.to_string(), rows.clone());
        Ok(rows)
    }

    /// Resolve a batch of name/range queries into the matching rows
    ///
    /// Queries run in parallel; results keep query order. Any invalid range
    /// fails the whole batch. Rows with unparseable versions are skipped.
    pub fn query_packages(&self, queries: &[PackageQuery]) -> RegistryResult<Vec<PackageMetadata>> {
        let results: Vec<RegistryResult<Vec<PackageMetadata>>> = queries
            .par_iter()
            .map(|query| self.query_package(query))
            .collect();

        let mut matched = Vec::new();
        for result in results {
            matched.extend(result?);
        }

        debug!("{} queries matched {} rows", queries.len(), matched.len());
        Ok(matched)
    }

    /// Rows of one package whose version satisfies the query's range
    pub fn query_package(&self, query: &PackageQuery) -> RegistryResult<Vec<PackageMetadata>> {
        let range = parse_constraint(&query.version)?;
        let rows = self.rows_for(&query.name)?;

        let (candidates, skipped) = VersionSet::from_rows(&rows);
        log_skipped(&query.name, &skipped);

        let matched = candidates.filter(&range);
        debug!(
            "{} {}: {} of {} versions match",
            query.name,
            range,
            matched.len(),
            candidates.len()
        );

        Ok(rows
            .into_iter()
            .filter(|row| matches!(row.parsed_version(), Ok(version) if matched.contains(&version)))
            .collect())
    }

    /// Describe every package whose name matches `pattern` with one version range
    ///
    /// Packages are reported in the order their names first appear in the store.
    pub fn search_by_regex(&self, pattern: &str) -> RegistryResult<Vec<RegExReturn>> {
        let regex = Regex::new(pattern).map_err(|e| PackitError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        let names: IndexSet<String> = self
            .store
            .rows_matching(&regex)?
            .into_iter()
            .map(|row| row.name)
            .collect();
        debug!("Pattern {} matched {} packages", pattern, names.len());

        let names: Vec<String> = names.into_iter().collect();
        names.par_iter().map(|name| self.describe_package(name)).collect()
    }

    /// The synthesized range covering every stored version of one package
    pub fn describe_package(&self, name: &str) -> RegistryResult<RegExReturn> {
        let rows = self.rows_for(name)?;
        let (versions, skipped) = VersionSet::from_rows(&rows);
        log_skipped(name, &skipped);

        let descriptor = synthesize(&versions).map_err(|e| e.for_package(name))?;
        if !selects_exactly(&descriptor, &versions) {
            debug!(
                "Range {} for {} does not cover all {} stored versions",
                descriptor,
                name,
                versions.len()
            );
        }

        Ok(RegExReturn {
            name: name.to_string(),
            version: descriptor.to_string(),
        })
    }

    /// Upload history of a package, one entry per stored version
    pub fn package_history(&self, name: &str) -> RegistryResult<Vec<PackageHistoryEntry>> {
        let uploads = self.store.uploads_for_name(name)?;
        if uploads.is_empty() {
            return Err(PackitError::PackageNotFound {
                name: name.to_string(),
            });
        }

        Ok(uploads
            .into_iter()
            .map(|upload| {
                let date = upload.uploaded_at.as_deref().and_then(|raw| {
                    let parsed = parse_upload_time(raw);
                    if parsed.is_none() {
                        warn!(
                            "Ignoring unparseable upload time '{}' for {} (id {})",
                            raw, name, upload.metadata.id
                        );
                    }
                    parsed
                });

                PackageHistoryEntry {
                    user: User {
                        name: upload
                            .uploaded_by
                            .unwrap_or_else(|| ANONYMOUS_UPLOADER.to_string()),
                        is_admin: false,
                    },
                    date,
                    metadata: upload.metadata,
                    action: UPLOADED_ACTION.to_string(),
                }
            })
            .collect())
    }

    /// Metadata row of one stored package version
    pub fn package(&self, id: &str) -> RegistryResult<PackageMetadata> {
        self.store.row_by_id(id)?.ok_or_else(|| PackitError::PackageNotFound {
            name: format!("id {}", id),
        })
    }

    /// Rating of one stored package version
    pub fn package_rating(&self, id: &str) -> RegistryResult<PackageRating> {
        self.store.rating_for_id(id)?.ok_or_else(|| PackitError::PackageNotFound {
            name: format!("id {}", id),
        })
    }
}

fn log_skipped(name: &str, skipped: &[SkippedRow]) {
    for row in skipped {
        warn!(
            "Skipping {} row {} with unparseable version '{}': {}",
            name, row.id, row.version, row.error
        );
    }
}
