//! packit.toml configuration parsing and serialization

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use packit_core::error::PackitError;
use crate::ConfigResult;

/// Configuration file name looked up in the project tree
pub const CONFIG_FILE_NAME: &str = "packit.toml";

/// Catalog path used when nothing else is configured
pub const DEFAULT_CATALOG: &str = "catalog.json";

/// Default row cache TTL in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Longest accepted row cache TTL (one day)
pub const MAX_CACHE_TTL_SECS: u64 = 86_400;

const KNOWN_SECTIONS: &[&str] = &["registry", "log"];

/// Complete packit.toml configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PackitToml {
    /// Metadata store settings
    #[serde(default)]
    pub registry: RegistrySection,

    /// Logging settings
    #[serde(default)]
    pub log: LogSection,
}

/// Metadata store section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegistrySection {
    /// Path to the JSON catalog
    #[serde(default = "default_catalog")]
    pub catalog: Utf8PathBuf,

    /// Row cache TTL; 0 disables caching
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

/// Logging section
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogSection {
    #[serde(default)]
    pub level: LogLevel,

    #[serde(default)]
    pub format: LogFormat,
}

/// Minimum level of emitted log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

fn default_catalog() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_CATALOG)
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl RegistrySection {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl LogLevel {
    /// Directive understood by tracing's env filter
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = PackitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(PackitError::ConfigValidation {
                field: "log.level".to_string(),
                reason: format!("Unknown log level '{}' (expected trace, debug, info, warn or error)", other),
            }),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = PackitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(PackitError::ConfigValidation {
                field: "log.format".to_string(),
                reason: format!("Unknown log format '{}' (expected pretty or json)", other),
            }),
        }
    }
}

/// Parse TOML string to PackitToml configuration
pub fn parse_packit_toml(content: &str) -> ConfigResult<PackitToml> {
    // First parse with toml_edit for better error reporting
    let document = content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|e| PackitError::TomlParse {
            message: format!("TOML syntax error: {}", e),
        })?;

    if let Some((key, _)) = document
        .iter()
        .find(|(key, _)| !KNOWN_SECTIONS.contains(key))
    {
        return Err(PackitError::ConfigValidation {
            field: key.to_string(),
            reason: format!("Unknown section (expected one of: {})", KNOWN_SECTIONS.join(", ")),
        });
    }

    // Then parse with serde for type safety
    let config: PackitToml = toml::from_str(content).map_err(|e| PackitError::TomlParse {
        message: format!("TOML parsing error: {}", e),
    })?;

    validate_config(&config)?;

    Ok(config)
}

/// Serialize PackitToml to TOML string
pub fn serialize_packit_toml(config: &PackitToml) -> ConfigResult<String> {
    toml::to_string_pretty(config).map_err(|e| PackitError::TomlParse {
        message: format!("TOML serialization error: {}", e),
    })
}

/// Validate configuration values
pub fn validate_config(config: &PackitToml) -> ConfigResult<()> {
    if config.registry.catalog.as_str().trim().is_empty() {
        return Err(PackitError::ConfigValidation {
            field: "registry.catalog".to_string(),
            reason: "Catalog path must not be empty".to_string(),
        });
    }

    if config.registry.cache_ttl_secs > MAX_CACHE_TTL_SECS {
        return Err(PackitError::ConfigValidation {
            field: "registry.cache-ttl-secs".to_string(),
            reason: format!(
                "Cache TTL of {}s exceeds the maximum of {}s",
                config.registry.cache_ttl_secs, MAX_CACHE_TTL_SECS
            ),
        });
    }

    Ok(())
}

/// Load and parse packit.toml from file path
///
/// A relative catalog path is taken relative to the file's directory.
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<PackitToml> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PackitError::io(format!("Failed to read {}", path), e))?;

    let mut config = parse_packit_toml(&content).map_err(|e| match e {
        PackitError::TomlParse { message } => PackitError::TomlParse {
            message: format!("In file {}: {}", path, message),
        },
        PackitError::ConfigValidation { field, reason } => PackitError::ConfigValidation {
            field,
            reason: format!("In file {}: {}", path, reason),
        },
        other => other,
    })?;

    if config.registry.catalog.is_relative() {
        if let Some(dir) = path.parent() {
            config.registry.catalog = dir.join(&config.registry.catalog);
        }
    }

    Ok(config)
}
