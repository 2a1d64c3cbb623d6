//! `lazyreactor config` - inspect the global configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::GlobalConfig;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the effective configuration (default)
    Show,
    /// Print the configuration file location
    Path,
}

impl ConfigCommand {
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        match self.command {
            Some(ConfigSubcommands::Show) | None => Self::show(config_path).await,
            Some(ConfigSubcommands::Path) => Self::show_path(config_path),
        }
    }

    async fn show(config_path: Option<PathBuf>) -> Result<()> {
        let path = match &config_path {
            Some(path) => path.clone(),
            None => GlobalConfig::resolve_path()?,
        };
        let config = GlobalConfig::load_with_optional(config_path).await?;

        println!("{}", format!("# {}", path.display()).dimmed());
        print!("{}", config.to_toml()?);
        Ok(())
    }

    fn show_path(config_path: Option<PathBuf>) -> Result<()> {
        let path = match config_path {
            Some(path) => path,
            None => GlobalConfig::resolve_path()?,
        };
        println!("{}", path.display());
        Ok(())
    }
}
