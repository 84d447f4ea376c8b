//! CLI adapter for pinecheck
//!
//! Parses arguments with clap, loads configuration, connects a session
//! and dispatches to the command handlers in [`commands`].
//!
//! ```text
//!   .env / env / config.toml ──► Config ──► Services ──► commands::*
//!                                                          │
//!                                                   stdout / stderr
//! ```

pub mod commands;
pub mod output;

use crate::core::config::{load_env_file, Config, ResolveMode, DEFAULT_ENV_FILE};
use crate::core::error::Result;
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub use crate::core::types::OutputFormat;

/// pinecheck - Pinecone connectivity check
///
/// Reads PINECONE_API_KEY and PINECONE_INDEX (optionally from a .env
/// file), connects to the index and prints its statistics.
#[derive(Parser, Debug)]
#[command(name = "pinecheck")]
#[command(version)]
#[command(about = "Pinecone connectivity and index statistics check", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Env file merged into the environment before reading configuration
    ///
    /// Defaults to ./.env when present; a missing explicit file is an error.
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Index to check (overrides PINECONE_INDEX)
    #[arg(long, short = 'i', global = true)]
    pub index: Option<String>,

    /// Defer index resolution to the first statistics query
    #[arg(long, global = true)]
    pub lazy: bool,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Command to run (defaults to `check`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to the index and print its statistics
    Check(commands::CheckArgs),

    /// Verify the configured index exists and summarize it
    #[command(name = "setup-check")]
    SetupCheck(commands::SetupArgs),

    /// List indexes visible to the API key
    #[command(name = "list-indexes")]
    ListIndexes(commands::ListIndexesArgs),

    /// Show the effective configuration (API key redacted)
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  pinecheck completions bash > ~/.local/share/bash-completion/completions/pinecheck
    ///   zsh:   pinecheck completions zsh > ~/.zfunc/_pinecheck
    ///   fish:  pinecheck completions fish > ~/.config/fish/completions/pinecheck.fish
    Completions(commands::CompletionsArgs),
}

impl Cli {
    /// Apply command-line overrides on top of loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(index) = &self.index {
            config.probe.index_name = index.clone();
        }
        if self.lazy {
            config.probe.resolve = ResolveMode::Lazy;
        }
    }
}

/// Initialize tracing on stderr
///
/// `RUST_LOG` wins; otherwise only warnings are shown unless `verbose`.
pub fn init_logging(verbose: bool, json: bool) {
    let default_filter = if verbose {
        "pinecheck=debug"
    } else {
        "pinecheck=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    // try_init: tests may install a subscriber more than once
    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.compact().with_ansi(false).try_init();
    }
}

/// Load `.env` and configuration the way the binary does
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.env_file {
        Some(path) => load_env_file(path, true)?,
        None => load_env_file(Path::new(DEFAULT_ENV_FILE), false)?,
    };

    let mut config = Config::load_with_xdg(&XdgDirs::new())?;
    cli.apply_overrides(&mut config);
    config.log_config();
    Ok(config)
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_output(cli, &mut out).await
}

/// Run the CLI writing command output to `out`
pub async fn run_with_output<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    // Handle completions command early (doesn't need configuration)
    if let Some(Commands::Completions(args)) = &cli.command {
        return commands::completions::execute(args, out);
    }

    let config = load_config(&cli)?;

    // show-config must work without credentials
    if let Some(Commands::ShowConfig(args)) = &cli.command {
        return commands::config::execute(args, &config, cli.format, out);
    }

    let services = Services::connect(config)?;
    dispatch(cli.command, &services, cli.format, out).await
}

/// Execute a command against connected services
pub async fn dispatch<W: Write>(
    command: Option<Commands>,
    services: &Services,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match command {
        None => commands::check::execute(&commands::CheckArgs::default(), services, format, out)
            .await,
        Some(Commands::Check(args)) => {
            commands::check::execute(&args, services, format, out).await
        }
        Some(Commands::SetupCheck(args)) => {
            commands::setup::execute(&args, services, format, out).await
        }
        Some(Commands::ListIndexes(args)) => {
            commands::indexes::execute(&args, services, format, out).await
        }
        Some(Commands::ShowConfig(args)) => {
            commands::config::execute(&args, &services.config, format, out)
        }
        Some(Commands::Completions(args)) => commands::completions::execute(&args, out),
    }
}
