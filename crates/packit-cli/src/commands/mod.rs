//! Command implementations and dispatch logic.
//!
//! Each command is an async function taking the shared `CommandContext`.

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use packit_config::{ConfigLayering, ConfigLoader, ConfigSource, PackitToml};
use packit_core::error::{PackitError, PackitResult};
use packit_registry::{MemoryStore, RegistryService};

pub mod check;
pub mod history;
pub mod matcher;
pub mod query;
pub mod range;
pub mod rate;
pub mod search;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Cli, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub settings: PackitToml,
    pub source: ConfigSource,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Resolve configuration for the given command line
    pub async fn from_cli(cli: &Cli) -> PackitResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| PackitError::io("Failed to get current directory".to_string(), e))?;
        let cwd = utf8_path(cwd)?;

        let explicit = cli.config.clone().map(utf8_path).transpose()?;
        let loader = ConfigLoader::new(cwd.clone());
        let (file_config, source) = loader.load(explicit.as_deref()).await?;

        let settings = ConfigLayering::merge_configs(
            file_config,
            &ConfigLayering::collect_env_overrides(),
            &cli_overrides(cli),
        )?;

        Ok(Self {
            cwd,
            settings,
            source,
            output: OutputHandler::new(cli.json),
        })
    }

    /// Catalog path, relative paths taken from the working directory
    pub fn catalog_path(&self) -> Utf8PathBuf {
        let catalog = &self.settings.registry.catalog;
        if catalog.is_relative() {
            self.cwd.join(catalog)
        } else {
            catalog.clone()
        }
    }

    /// Load the catalog and wrap it in a lookup service
    pub async fn open_service(&self) -> PackitResult<RegistryService<MemoryStore>> {
        let path = self.catalog_path();
        let store = MemoryStore::load(&path).await?;
        debug!("Loaded {} catalog rows from {}", store.len(), path);

        Ok(RegistryService::with_cache_ttl(store, self.settings.registry.cache_ttl()))
    }
}

fn cli_overrides(cli: &Cli) -> HashMap<String, String> {
    let mut overrides = HashMap::new();

    if let Some(catalog) = &cli.catalog {
        overrides.insert("catalog".to_string(), catalog.clone());
    }
    if let Some(ttl) = cli.cache_ttl_secs {
        overrides.insert("cache-ttl-secs".to_string(), ttl.to_string());
    }
    if let Some(format) = &cli.log_format {
        overrides.insert("log-format".to_string(), format.clone());
    }

    overrides
}

fn utf8_path(path: std::path::PathBuf) -> PackitResult<Utf8PathBuf> {
    Utf8PathBuf::try_from(path).map_err(|e| PackitError::ConfigValidation {
        field: "path".to_string(),
        reason: format!("Path is not valid UTF-8: {}", e),
    })
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> PackitResult<()> {
    match command {
        Commands::Match { name, range } => {
            info!("Matching {} against {}", name, range);
            matcher::execute(&name, &range, ctx).await
        },
        Commands::Query { file } => {
            let file = utf8_path(file)?;
            info!("Running batch query from {}", file);
            query::execute(&file, ctx).await
        },
        Commands::Search { pattern } => {
            info!("Searching package names matching {}", pattern);
            search::execute(&pattern, ctx).await
        },
        Commands::Range { versions } => range::execute(&versions, ctx).await,
        Commands::History { name } => {
            info!("Showing history of {}", name);
            history::execute(&name, ctx).await
        },
        Commands::Rate { id } => {
            info!("Showing rating of package id {}", id);
            rate::execute(&id, ctx).await
        },
        Commands::Check => {
            info!("Checking configuration and catalog");
            check::execute(ctx).await
        },
    }
}

/// Point the user at a stored package name close to the one they typed
pub fn hint_similar_name(name: &str, service: &RegistryService<MemoryStore>, ctx: &CommandContext) {
    let names = service
        .store()
        .records()
        .iter()
        .map(|record| record.metadata.name.as_str());

    if let Some(suggestion) = suggest_similar_name(name, names) {
        ctx.output.info(&format!("Did you mean '{}'?", suggestion));
    }
}

/// Suggest a similar package name based on edit distance
pub fn suggest_similar_name<'a>(input: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut best_match = None;
    let mut best_distance = usize::MAX;

    for candidate in candidates {
        if candidate == input {
            continue;
        }

        let distance = edit_distance(input, candidate);
        if distance < best_distance && distance <= 2 {
            best_distance = distance;
            best_match = Some(candidate);
        }
    }

    best_match.map(|s| s.to_string())
}

/// Calculate edit distance between two strings
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut previous: Vec<usize> = (0..=b_len).collect();
    let mut current = vec![0; b_len + 1];

    for i in 1..=a_len {
        current[0] = i;
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            current[j] = (previous[j] + 1) // deletion
                .min(current[j - 1] + 1) // insertion
                .min(previous[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_len]
}

/// Read a file into a string with a readable error
pub async fn read_input(path: &Utf8Path) -> PackitResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PackitError::io(format!("Failed to read {}", path), e))
}
