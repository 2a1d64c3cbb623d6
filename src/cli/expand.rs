//! `lazyreactor expand` - show what a scope requirement expands to.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{GlobalConfig, OutputFormat};
use crate::scope::{ScopeRequirement, expand};

#[derive(Args)]
pub struct ExpandCommand {
    /// Requirement as declared by a build step, e.g. `runtime+system`
    requirement: String,

    /// Output format (defaults to the configured format)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl ExpandCommand {
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let config = GlobalConfig::load_with_optional(config_path).await?;
        let requirement = ScopeRequirement::parse(&self.requirement);
        let scopes = expand(requirement.as_ref());
        let names: Vec<&str> = scopes.iter().map(|scope| scope.as_str()).collect();

        match self.format.unwrap_or(config.format) {
            OutputFormat::Json => println!("{}", serde_json::to_string(&names)?),
            OutputFormat::Text => {
                if let Some(ScopeRequirement::Other(name)) = &requirement {
                    tracing::warn!("'{name}' is not a known scope requirement");
                }
                if names.is_empty() {
                    println!("{}", "(no scopes)".dimmed());
                } else {
                    println!("{}", names.join(", "));
                }
            }
        }
        Ok(())
    }
}
