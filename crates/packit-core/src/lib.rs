//! # packit-core
//!
//! Core types shared across all packit crates.
//!
//! This crate provides:
//! - `Version` with its semver total ordering
//! - `VersionRange`, the four range forms and their match predicate
//! - `PackageMetadata` rows as stored in the registry
//! - `PackitError` for unified error handling
//!
//! Nothing in here performs I/O or logging.

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{PackitError, PackitResult};
pub use types::{PackageMetadata, RangeKind, Version, VersionError, VersionRange};
