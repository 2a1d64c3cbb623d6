//! Reactor description files.
//!
//! A reactor file is a TOML document describing one build session: its modules
//! (in session order), the module currently being built and the steps to run.
//!
//! ```toml
//! current = "parent"
//!
//! [[modules]]
//! id = "parent"
//!
//! [[modules]]
//! id = "core"
//! parent = "parent"
//!
//! [[modules.dependencies]]
//! coordinate = "org.slf4j:slf4j-api:2.0.13"
//!
//! [[modules.dependencies]]
//! coordinate = "org.junit:junit-bom:5.10.2"
//! scope = "test"
//! available = false
//!
//! [[steps]]
//! name = "compiler:compile"
//! resolution = "compile"
//!
//! [[steps]]
//! name = "javadoc:aggregate"
//! aggregator = true
//! resolution = "compile"
//! ```

use super::{Artifact, Module, ModuleId, Session};
use crate::core::LazyreactorError;
use crate::models::StepDescriptor;
use crate::scope::Scope;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top level of a reactor file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactorFile {
    /// Module currently being built
    pub current: String,
    /// Modules in session order
    #[serde(default)]
    pub modules: Vec<ModuleEntry>,
    /// Steps to run, in order
    #[serde(default)]
    pub steps: Vec<StepEntry>,
}

/// A `[[modules]]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<DependencyEntry>,
}

/// A `[[modules.dependencies]]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyEntry {
    pub coordinate: String,
    #[serde(default = "default_scope")]
    pub scope: Scope,
    /// Whether the repository can supply the artifact
    #[serde(default = "default_available")]
    pub available: bool,
}

/// A `[[steps]]` table. Empty requirements mean "none".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepEntry {
    pub name: String,
    #[serde(default)]
    pub aggregator: bool,
    #[serde(default)]
    pub collection: String,
    #[serde(default)]
    pub resolution: String,
}

const fn default_scope() -> Scope {
    Scope::Compile
}

const fn default_available() -> bool {
    true
}

impl ReactorFile {
    /// Read and parse a reactor file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not a valid reactor description.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read reactor file {}", path.display()))?;

        Self::parse(&content).map_err(|e| match e {
            LazyreactorError::ReactorParseError {
                reason,
                ..
            } => LazyreactorError::ReactorParseError {
                file: path.display().to_string(),
                reason,
            }
            .into(),
            other => other.into(),
        })
    }

    /// Parse a reactor description from TOML text.
    pub fn parse(content: &str) -> Result<Self, LazyreactorError> {
        toml::from_str(content).map_err(|e| LazyreactorError::ReactorParseError {
            file: "<inline>".to_string(),
            reason: e.message().to_string(),
        })
    }

    /// Build the session this file describes.
    pub fn to_session(&self) -> Result<Session, LazyreactorError> {
        let modules = self
            .modules
            .iter()
            .map(|entry| {
                let mut module = Module::new(ModuleId::new(&entry.id));
                if let Some(parent) = &entry.parent {
                    module = module.with_parent(ModuleId::new(parent));
                }
                entry.dependencies.iter().fold(module, |module, dep| {
                    module.with_dependency(Artifact::new(&dep.coordinate, dep.scope), dep.available)
                })
            })
            .collect();

        Session::new(modules, ModuleId::new(&self.current))
    }

    /// Step descriptors in declaration order.
    pub fn step_descriptors(&self) -> Vec<StepDescriptor> {
        self.steps
            .iter()
            .map(|step| {
                let descriptor = StepDescriptor::new(&step.name)
                    .with_collection(&step.collection)
                    .with_resolution(&step.resolution);
                if step.aggregator { descriptor.aggregating() } else { descriptor }
            })
            .collect()
    }
}
