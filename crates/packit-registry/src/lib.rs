//! Package metadata lookup service for packit
//!
//! This crate answers registry lookups over stored package metadata:
//! batch name/range queries, name-pattern searches that describe each match
//! with a synthesized range, upload history, and ratings. Stored rows are
//! cached per package name with a TTL.

pub mod api;
pub mod cache;
pub mod service;
pub mod store;

// Re-export main types
pub use api::{
    PackageHistoryEntry, PackageQuery, PackageRating, PackageRegExBody, PackagesBody,
    RegExReturn, User,
};
pub use cache::{CacheEntry, RowCache};
pub use service::RegistryService;
pub use store::{CatalogRecord, MemoryStore, MetadataStore, Upload};

use packit_core::error::PackitError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, PackitError>;
