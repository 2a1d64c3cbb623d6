//! Command-line interface for lazyreactor.
//!
//! # Commands
//!
//! - `expand <REQUIREMENT>` - show the concrete scopes a requirement expands to
//! - `modules <REACTOR>` - list the descendants an aggregator step would visit
//! - `plan <REACTOR>` - run a reactor file's steps and report every resolution
//! - `config` - show the effective global configuration or its path
//!
//! # Global Options
//!
//! - `--verbose` - debug logging on stderr
//! - `--quiet` - errors only
//! - `--config` - path to a custom global configuration file
//!
//! `RUST_LOG` always takes precedence over `--verbose` and `--quiet`.

mod config;
mod expand;
mod modules;
mod plan;

pub use plan::{PlanReport, StepReport, run_plan};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runtime settings derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive; `None` falls back to the quiet default.
    pub log_level: Option<String>,

    /// Explicit global configuration path.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber on stderr. Safe to call twice.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("error"))
        });

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Lazy, non-destructive dependency resolution for multi-module builds.
#[derive(Parser)]
#[command(
    name = "lazyreactor",
    about = "Lazy, per-module dependency scope resolution for build reactors",
    version,
    long_about = "lazyreactor resolves dependencies per module and per scope, only for what each build step declares, instead of eagerly resolving the whole reactor before every step."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the global configuration file (overrides LAZYREACTOR_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the scopes a requirement expands to
    Expand(expand::ExpandCommand),

    /// List the descendants of a module in visiting order
    Modules(modules::ModulesCommand),

    /// Run every step of a reactor file and report resolver activity
    Plan(plan::PlanCommand),

    /// Show the global configuration
    Config(config::ConfigCommand),
}

impl Cli {
    /// Execute the parsed command line.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Derive runtime settings from the global flags.
    ///
    /// ```rust,no_run
    /// use clap::Parser;
    /// use lazyreactor_cli::cli::Cli;
    ///
    /// let cli = Cli::parse_from(["lazyreactor", "--verbose", "expand", "test"]);
    /// assert_eq!(cli.build_config().log_level.as_deref(), Some("debug"));
    /// ```
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute with explicit runtime settings.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Expand(cmd) => cmd.execute(config.config_path).await,
            Commands::Modules(cmd) => cmd.execute().await,
            Commands::Plan(cmd) => cmd.execute(config.config_path).await,
            Commands::Config(cmd) => cmd.execute(config.config_path).await,
        }
    }
}
