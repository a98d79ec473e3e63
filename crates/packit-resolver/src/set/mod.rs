//! Sets of distinct versions for one package.
//!
//! A `VersionSet` is what both the matcher and the synthesizer operate on. It
//! is built by the caller from registry rows and never mutated by the core.

use std::collections::BTreeSet;

use packit_core::types::{PackageMetadata, Version, VersionError, VersionRange};

/// Distinct versions of one package, kept in ascending order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSet {
    versions: BTreeSet<Version>,
}

/// A registry row whose version string could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub id: String,
    pub version: String,
    pub error: VersionError,
}

impl VersionSet {
    /// Create an empty version set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from registry rows, setting aside rows that do not parse
    ///
    /// A malformed row never fails the batch; it is reported back so the caller
    /// can record it.
    pub fn from_rows<'a, I>(rows: I) -> (Self, Vec<SkippedRow>)
    where
        I: IntoIterator<Item = &'a PackageMetadata>,
    {
        let mut set = Self::new();
        let mut skipped = Vec::new();

        for row in rows {
            match row.parsed_version() {
                Ok(version) => {
                    set.versions.insert(version);
                },
                Err(error) => skipped.push(SkippedRow {
                    id: row.id.clone(),
                    version: row.version.clone(),
                    error,
                }),
            }
        }

        (set, skipped)
    }

    /// Add a version, returning false if it was already present
    pub fn insert(&mut self, version: Version) -> bool {
        self.versions.insert(version)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.versions.contains(version)
    }

    /// Iterate in ascending version order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Version> + ExactSizeIterator {
        self.versions.iter()
    }

    /// Get the lowest version
    pub fn lowest(&self) -> Option<&Version> {
        self.versions.first()
    }

    /// Get the highest version
    pub fn highest(&self) -> Option<&Version> {
        self.versions.last()
    }

    /// All versions inside `range`; every member is checked
    pub fn filter(&self, range: &VersionRange) -> VersionSet {
        self.versions
            .iter()
            .filter(|version| range.matches(version))
            .cloned()
            .collect()
    }
}

impl FromIterator<Version> for VersionSet {
    fn from_iter<T: IntoIterator<Item = Version>>(iter: T) -> Self {
        Self {
            versions: iter.into_iter().collect(),
        }
    }
}

impl Extend<Version> for VersionSet {
    fn extend<T: IntoIterator<Item = Version>>(&mut self, iter: T) {
        self.versions.extend(iter);
    }
}

impl IntoIterator for VersionSet {
    type Item = Version;
    type IntoIter = std::collections::btree_set::IntoIter<Version>;

    fn into_iter(self) -> Self::IntoIter {
        self.versions.into_iter()
    }
}

impl<'a> IntoIterator for &'a VersionSet {
    type Item = &'a Version;
    type IntoIter = std::collections::btree_set::Iter<'a, Version>;

    fn into_iter(self) -> Self::IntoIter {
        self.versions.iter()
    }
}
