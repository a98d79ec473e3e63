//! Core data types for the packit registry.
//!
//! - Version types and their ordering
//! - Version ranges (exact, dash, tilde, caret)
//! - Stored package metadata rows

pub mod package;
pub mod range;
pub mod version;

// Re-export all public types
pub use package::PackageMetadata;
pub use range::{split_bare_dash, RangeKind, VersionRange};
pub use version::{Version, VersionError};
