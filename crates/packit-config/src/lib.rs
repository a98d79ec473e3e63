//! Configuration parsing for packit
//!
//! This crate handles parsing and validation of packit.toml and layers it with
//! environment variables and command-line flags into one settings value.

pub mod toml;
pub mod merge;

// Re-export main types
pub use toml::{LogFormat, LogLevel, LogSection, PackitToml, RegistrySection};
pub use merge::{ConfigLayering, ConfigLoader, ConfigSource};

use packit_core::error::PackitError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, PackitError>;
