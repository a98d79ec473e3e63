//! # packit-cli
//!
//! Command-line front end for the packit registry lookup service.
//!
//! This is the main entry point for the packit tool. It parses arguments,
//! resolves configuration, sets up logging and dispatches to the command
//! handlers. Results go to stdout; logs and errors go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use packit_config::{LogFormat, LogLevel};
use packit_core::error::PackitError;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Package registry lookups: version matching and range synthesis
#[derive(Parser)]
#[command(name = "packit", version, about = "Package registry lookups over a metadata catalog")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to the nearest packit.toml)
    #[arg(long, global = true, value_name = "PATH", env = "PACKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON catalog of package metadata
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<String>,

    /// Row cache TTL in seconds (0 disables caching)
    #[arg(long, global = true, value_name = "SECS")]
    pub cache_ttl_secs: Option<u64>,

    /// Log line format: pretty or json
    #[arg(long, global = true, value_name = "FORMAT")]
    pub log_format: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the rows of a package whose version satisfies a range
    Match {
        name: String,
        /// Exact version, dash range, ~tilde or ^caret expression
        range: String,
    },
    /// Run a batch query body ({"Items": [{"Name": .., "Version": ..}]})
    Query {
        file: PathBuf,
    },
    /// Describe every package whose name matches a pattern with one range
    Search {
        pattern: String,
    },
    /// Synthesize the range describing a list of versions
    Range {
        #[arg(required = true)]
        versions: Vec<String>,
    },
    /// Show the upload history of a package
    History {
        name: String,
    },
    /// Show the rating of a stored package version
    Rate {
        id: String,
    },
    /// Validate configuration and catalog
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_panic_handler();

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn run_cli(cli: Cli) -> anyhow::Result<()> {
    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    rt.block_on(async move {
        let ctx = CommandContext::from_cli(&cli).await?;

        setup_logging(ctx.settings.log.level, ctx.settings.log.format, cli.verbose);
        debug!("Starting packit v{}", env!("CARGO_PKG_VERSION"));
        debug!("Configuration from {:?}", ctx.source);

        commands::dispatch_command(cli.command, &ctx).await?;
        Ok::<(), anyhow::Error>(())
    })
}

fn report(err: &anyhow::Error) -> ExitCode {
    let formatter = ErrorFormatter::new();

    match err.downcast_ref::<PackitError>() {
        Some(packit_err) => {
            eprint!("{}", formatter.format_error(packit_err));
            if packit_err.is_client_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        },
        None => {
            eprintln!("{}", formatter.format_simple(&format!("{:#}", err)));
            ExitCode::FAILURE
        },
    }
}

fn setup_logging(level: LogLevel, format: LogFormat, verbose: bool) {
    let level = if verbose { LogLevel::Debug } else { level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "packit={level},packit_registry={level},packit_config={level}",
            level = level
        ))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("packit encountered an unexpected error: {}", panic_info);
        eprintln!("packit crashed! This is a bug.");
        eprintln!("Error: {}", panic_info);
    }));
}
