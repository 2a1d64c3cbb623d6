//! `lazyreactor modules` - list the descendants an aggregator step visits.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::core::LazyreactorError;
use crate::reactor::{ModuleId, ReactorFile, collect_child_modules};

#[derive(Args)]
pub struct ModulesCommand {
    /// Reactor description file
    reactor: PathBuf,

    /// Module whose descendants to list (defaults to the file's `current`)
    #[arg(long)]
    root: Option<String>,
}

impl ModulesCommand {
    pub async fn execute(self) -> Result<()> {
        let file = ReactorFile::load(&self.reactor).await?;
        let session = file.to_session()?;

        let root = self.root.map_or_else(|| session.current().clone(), ModuleId::new);
        if session.module(&root).is_none() {
            return Err(LazyreactorError::ModuleNotFound {
                id: root.to_string(),
            }
            .into());
        }

        for id in collect_child_modules(&root, session.modules()) {
            println!("{id}");
        }
        Ok(())
    }
}
