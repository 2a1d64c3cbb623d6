//! Global (per-user) configuration.
//!
//! Stored at `~/.lazyreactor/config.toml` (`%LOCALAPPDATA%\lazyreactor\config.toml`
//! on Windows). The location can be overridden with `--config` or the
//! `LAZYREACTOR_CONFIG` environment variable. A missing file is not an error;
//! defaults apply.
//!
//! ```toml
//! # Executor the host composes in: "non-destructive" (default) or "eager"
//! strategy = "non-destructive"
//!
//! # Report format for `lazyreactor plan`: "text" (default) or "json"
//! format = "text"
//! ```

use crate::constants::{CONFIG_DIR_NAME, CONFIG_ENV_VAR, CONFIG_FILE_NAME, WINDOWS_CONFIG_DIR_NAME};
use crate::core::LazyreactorError;
use crate::resolver::Strategy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Output format for command reports.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable, coloured text
    #[default]
    Text,
    /// Machine readable JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Settings shared by every command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    /// Resolution strategy composed into the executor.
    #[serde(default)]
    pub strategy: Strategy,

    /// Default report format.
    #[serde(default)]
    pub format: OutputFormat,
}

impl GlobalConfig {
    /// Load from `path` if given, otherwise from [`GlobalConfig::resolve_path`].
    ///
    /// An explicitly given path must exist. The default location may be absent.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(&path).await;
        }

        let path = Self::resolve_path()?;
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        toml::from_str(&content).map_err(|e| {
            LazyreactorError::ConfigError {
                message: format!("{}: {}", path.display(), e.message()),
            }
            .into()
        })
    }

    /// The configuration path: `LAZYREACTOR_CONFIG` if set, else
    /// [`GlobalConfig::default_path`].
    pub fn resolve_path() -> Result<PathBuf> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => Self::default_path(),
        }
    }

    /// The platform default configuration path.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join(WINDOWS_CONFIG_DIR_NAME)
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(CONFIG_DIR_NAME)
        };

        Ok(config_dir.join(CONFIG_FILE_NAME))
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize configuration")
    }
}
