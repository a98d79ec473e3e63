//! Version constraint matching and range synthesis for packit
//!
//! This crate holds the two algorithms of the registry lookup service:
//! - the constraint matcher, selecting the versions a range expression accepts
//! - the range synthesizer, describing a set of versions with a single range
//!
//! Both are pure functions over in-memory `VersionSet`s and are safe to call
//! from any number of threads.

pub mod constraint;
pub mod set;
pub mod synth;

// Re-export main types
pub use constraint::{match_versions, normalize_expression, parse_constraint, ConstraintExpression};
pub use set::{SkippedRow, VersionSet};
pub use synth::{selects_exactly, synthesize, RangeDescriptor};

use packit_core::error::PackitError;

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, PackitError>;
