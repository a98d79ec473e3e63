//! Configuration layering, fallback logic, and environment overrides

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};

use packit_core::error::PackitError;
use crate::toml::{validate_config, PackitToml, CONFIG_FILE_NAME};
use crate::ConfigResult;

/// Prefix of environment variables read as overrides
pub const ENV_PREFIX: &str = "PACKIT_";

/// Main configuration loading interface
pub struct ConfigLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
}

/// Configuration layering and merging
pub struct ConfigLayering;

/// Configuration source tracking
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Built-in defaults only
    Defaults,
    /// Global config file
    Global(Utf8PathBuf),
    /// Project packit.toml file
    Project(Utf8PathBuf),
    /// File named on the command line
    Explicit(Utf8PathBuf),
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd }
    }

    pub fn cwd(&self) -> &Utf8Path {
        &self.cwd
    }

    /// Load the file layer: an explicit file, else the project file, else the global file
    pub async fn load(&self, explicit: Option<&Utf8Path>) -> ConfigResult<(Option<PackitToml>, ConfigSource)> {
        if let Some(path) = explicit {
            let config = crate::toml::load_from_file(path).await?;
            return Ok((Some(config), ConfigSource::Explicit(path.to_path_buf())));
        }

        if let Some((config, source)) = self.load_project_config().await? {
            return Ok((Some(config), source));
        }

        if let Some(path) = global_config_path() {
            if path.exists() {
                let config = crate::toml::load_from_file(&path).await?;
                return Ok((Some(config), ConfigSource::Global(path)));
            }
        }

        Ok((None, ConfigSource::Defaults))
    }

    /// Load project configuration if a packit.toml exists up the tree
    pub async fn load_project_config(&self) -> ConfigResult<Option<(PackitToml, ConfigSource)>> {
        let path = self.resolve_config_path(CONFIG_FILE_NAME)?;
        if !path.exists() {
            return Ok(None);
        }

        let config = crate::toml::load_from_file(&path).await?;
        Ok(Some((config, ConfigSource::Project(path))))
    }

    /// Find configuration file in project (walks up directory tree)
    pub fn resolve_config_path(&self, filename: &str) -> ConfigResult<Utf8PathBuf> {
        let mut current = self.cwd.as_path();

        loop {
            let config_path = current.join(filename);
            if config_path.exists() {
                return Ok(config_path);
            }

            // Move up one directory
            if let Some(parent) = current.parent() {
                current = parent;
            } else {
                // Reached filesystem root
                break;
            }
        }

        // Return path in current directory even if it doesn't exist
        Ok(self.cwd.join(filename))
    }
}

/// `~/.packit/config.toml`, when a home directory is known
pub fn global_config_path() -> Option<Utf8PathBuf> {
    let home_dir = dirs::home_dir()?;
    let home_dir = Utf8PathBuf::try_from(home_dir).ok()?;
    Some(home_dir.join(".packit").join("config.toml"))
}

impl ConfigLayering {
    /// Merge the configuration layers
    ///
    /// Precedence, lowest first: defaults, file, environment, CLI flags.
    pub fn merge_configs(
        file_config: Option<PackitToml>,
        env_overrides: &HashMap<String, String>,
        cli_overrides: &HashMap<String, String>,
    ) -> ConfigResult<PackitToml> {
        let mut merged = file_config.unwrap_or_default();

        // Apply environment variable overrides
        Self::apply_env_overrides(&mut merged, env_overrides)?;

        // Apply CLI flag overrides (highest priority)
        Self::apply_cli_overrides(&mut merged, cli_overrides)?;

        validate_config(&merged)?;

        Ok(merged)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(config: &mut PackitToml, overrides: &HashMap<String, String>) -> ConfigResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "PACKIT_CATALOG" => apply(config, "catalog", value, key)?,
                "PACKIT_CACHE_TTL_SECS" => apply(config, "cache-ttl-secs", value, key)?,
                "PACKIT_LOG_LEVEL" => apply(config, "log-level", value, key)?,
                "PACKIT_LOG_FORMAT" => apply(config, "log-format", value, key)?,
                _ => {
                    // Unknown environment variable, ignore
                },
            }
        }

        Ok(())
    }

    /// Apply CLI flag overrides
    fn apply_cli_overrides(config: &mut PackitToml, overrides: &HashMap<String, String>) -> ConfigResult<()> {
        for (key, value) in overrides {
            let flag = format!("--{}", key);
            apply(config, key, value, &flag)?;
        }

        Ok(())
    }

    /// Collect environment variable overrides
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect()
    }
}

/// Set one setting by its override key; `origin` names where the value came from
fn apply(config: &mut PackitToml, key: &str, value: &str, origin: &str) -> ConfigResult<()> {
    match key {
        "catalog" => {
            config.registry.catalog = Utf8PathBuf::from(value.trim());
        },
        "cache-ttl-secs" => {
            config.registry.cache_ttl_secs =
                value.trim().parse().map_err(|e| PackitError::ConfigValidation {
                    field: origin.to_string(),
                    reason: format!("Invalid cache TTL '{}': {}", value, e),
                })?;
        },
        "log-level" => config.log.level = value.parse()?,
        "log-format" => config.log.format = value.parse()?,
        _ => {
            // Unknown override, ignore
        },
    }

    Ok(())
}
