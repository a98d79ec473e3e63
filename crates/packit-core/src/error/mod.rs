//! Error types and result aliases for packit operations.
//!
//! One error type covers every failure across the workspace, from a version
//! string that does not parse to a catalog file that cannot be read.

use crate::types::VersionError;
use thiserror::Error;

/// Unified error type for all packit operations
#[derive(Error, Debug)]
pub enum PackitError {
    // Version and range errors
    #[error("Invalid version '{input}': {source}")]
    InvalidVersion {
        input: String,
        #[source]
        source: VersionError,
    },

    #[error("Invalid version constraint '{expression}': {reason}")]
    InvalidConstraint { expression: String, reason: String },

    #[error("No versions to describe{}", package_suffix(.package))]
    EmptyVersionSet { package: Option<String> },

    // Registry errors
    #[error("Package '{name}' not found in registry")]
    PackageNotFound { name: String },

    #[error("Invalid package name pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Failed to parse catalog {path}: {message}")]
    CatalogParse { path: String, message: String },

    #[error("Invalid request body {origin}: {message}")]
    InvalidRequest { origin: String, message: String },

    // Config errors
    #[error("Failed to parse packit.toml: {message}")]
    TomlParse { message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for packit operations
pub type PackitResult<T> = Result<T, PackitError>;

impl PackitError {
    /// Create an invalid-version error for the given input
    pub fn invalid_version(input: impl Into<String>, source: VersionError) -> Self {
        Self::InvalidVersion {
            input: input.into(),
            source,
        }
    }

    /// Create an invalid-constraint error
    pub fn invalid_constraint(expression: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConstraint {
            expression: expression.into(),
            reason: reason.into(),
        }
    }

    /// Attach the package name to an empty-version-set error
    pub fn for_package(self, name: &str) -> Self {
        match self {
            PackitError::EmptyVersionSet { package: None } => PackitError::EmptyVersionSet {
                package: Some(name.to_string()),
            },
            other => other,
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Check if this error was caused by malformed client input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PackitError::InvalidConstraint { .. }
                | PackitError::InvalidPattern { .. }
                | PackitError::InvalidRequest { .. }
                | PackitError::InvalidVersion { .. }
                | PackitError::PackageNotFound { .. }
        )
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            PackitError::InvalidConstraint { .. } => {
                Some("Use an exact version (1.2.3), a range (1.2.3 - 2.0.0), ~1.2.3 or ^1.2.3")
            },
            PackitError::InvalidVersion { .. } => Some("Versions look like major.minor.patch, e.g. 1.4.2"),
            PackitError::PackageNotFound { .. } => Some("Check the package name spelling or search with 'packit search'"),
            PackitError::InvalidPattern { .. } => Some("Package name patterns use regular expression syntax"),
            PackitError::InvalidRequest { .. } => Some(r#"Query bodies look like {"Items": [{"Name": "lodash", "Version": "^4.17.0"}]}"#),
            PackitError::ConfigValidation { .. } | PackitError::TomlParse { .. } => {
                Some("Run 'packit check' to validate your configuration")
            },
            _ => None,
        }
    }
}

fn package_suffix(package: &Option<String>) -> String {
    package
        .as_deref()
        .map(|name| format!(" for package '{}'", name))
        .unwrap_or_default()
}

impl From<VersionError> for PackitError {
    fn from(source: VersionError) -> Self {
        let input = match &source {
            VersionError::InvalidFormat { input } => input.clone(),
            VersionError::InvalidNumber { component } => component.clone(),
            VersionError::InvalidPrerelease { prerelease } => prerelease.clone(),
            VersionError::InvalidBuild { build } => build.clone(),
        };
        Self::InvalidVersion { input, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_version_keeps_source() {
        let source = "1.2".parse::<crate::Version>().unwrap_err();
        let err = PackitError::invalid_version("1.2", source);

        assert_eq!(
            err.to_string(),
            "Invalid version '1.2': Invalid version format: '1.2'"
        );
        assert!(err.source().is_some());
        assert!(err.is_client_error());
    }

    #[test]
    fn test_suggestions() {
        let err = PackitError::invalid_constraint("abc", "not a version");
        assert!(err.suggestion().is_some());

        let err = PackitError::EmptyVersionSet { package: None };
        assert!(err.suggestion().is_none());
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_empty_version_set_naming() {
        let err = PackitError::EmptyVersionSet { package: None };
        assert_eq!(err.to_string(), "No versions to describe");

        let err = err.for_package("left-pad");
        assert_eq!(err.to_string(), "No versions to describe for package 'left-pad'");

        let err = PackitError::invalid_constraint("abc", "bad").for_package("left-pad");
        assert!(matches!(err, PackitError::InvalidConstraint { .. }));
    }
}
