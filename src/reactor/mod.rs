//! The reactor: modules participating in one build session.
//!
//! The module tree is owned by the host. It arrives as a flat, ordered list of
//! [`Module`]s carrying parent pointers, wrapped in a [`Session`] that also knows
//! which module is currently being built. The resolution core only walks this
//! tree ([`traversal`]); the per-module state it writes is limited to the
//! artifact filter, while the resolver writes the dependency artifacts.

pub mod manifest;
pub mod traversal;

pub use manifest::{ReactorFile, StepEntry};
pub use traversal::collect_child_modules;

use crate::core::LazyreactorError;
use crate::resolver::ArtifactFilter;
use crate::scope::Scope;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Stable identity of a module within a session.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A dependency artifact as seen on a module's classpath.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Artifact {
    /// `group:name:version` coordinate
    pub coordinate: String,
    /// Scope the artifact was declared with
    pub scope: Scope,
}

impl Artifact {
    pub fn new(coordinate: impl Into<String>, scope: Scope) -> Self {
        Self {
            coordinate: coordinate.into(),
            scope,
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.coordinate, self.scope)
    }
}

/// A declared dependency together with whether the repository can supply it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub artifact: Artifact,
    pub available: bool,
}

/// One node of the reactor tree plus the host-owned state attached to it.
#[derive(Debug, Clone)]
pub struct Module {
    id: ModuleId,
    parent: Option<ModuleId>,
    dependencies: Vec<Dependency>,
    /// Artifacts in the collected dependency graph.
    dependency_artifacts: BTreeSet<Artifact>,
    /// Artifacts that were materialized.
    resolved_artifacts: BTreeSet<Artifact>,
    artifact_filter: Option<ArtifactFilter>,
}

impl Module {
    /// A root module with no dependencies.
    pub fn new(id: impl Into<ModuleId>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            dependencies: Vec::new(),
            dependency_artifacts: BTreeSet::new(),
            resolved_artifacts: BTreeSet::new(),
            artifact_filter: None,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<ModuleId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn with_dependency(mut self, artifact: Artifact, available: bool) -> Self {
        self.dependencies.push(Dependency {
            artifact,
            available,
        });
        self
    }

    pub const fn id(&self) -> &ModuleId {
        &self.id
    }

    pub const fn parent(&self) -> Option<&ModuleId> {
        self.parent.as_ref()
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub const fn dependency_artifacts(&self) -> &BTreeSet<Artifact> {
        &self.dependency_artifacts
    }

    pub fn set_dependency_artifacts(&mut self, artifacts: BTreeSet<Artifact>) {
        self.dependency_artifacts = artifacts;
    }

    pub const fn resolved_artifacts(&self) -> &BTreeSet<Artifact> {
        &self.resolved_artifacts
    }

    pub fn set_resolved_artifacts(&mut self, artifacts: BTreeSet<Artifact>) {
        self.resolved_artifacts = artifacts;
    }

    pub const fn artifact_filter(&self) -> Option<&ArtifactFilter> {
        self.artifact_filter.as_ref()
    }

    /// Replace the artifact filter; `None` clears it.
    pub fn set_artifact_filter(&mut self, filter: Option<ArtifactFilter>) {
        self.artifact_filter = filter;
    }

    /// Resolved artifacts that pass the attached filter. With no filter every
    /// resolved artifact is visible.
    pub fn visible_artifacts(&self) -> impl Iterator<Item = &Artifact> {
        self.resolved_artifacts
            .iter()
            .filter(|artifact| self.artifact_filter.as_ref().is_none_or(|f| f.includes(artifact)))
    }
}

/// All modules of one build session and the module currently being built.
#[derive(Debug, Clone)]
pub struct Session {
    modules: Vec<Module>,
    current: ModuleId,
}

impl Session {
    /// Build a session, checking that module ids are unique and that the
    /// current module is one of them.
    ///
    /// Parent pointers are not validated: dangling or cyclic parents are
    /// tolerated by the traversal.
    pub fn new(modules: Vec<Module>, current: impl Into<ModuleId>) -> Result<Self, LazyreactorError> {
        let current = current.into();
        let mut seen = HashSet::new();
        for module in &modules {
            if !seen.insert(module.id()) {
                return Err(LazyreactorError::DuplicateModule {
                    id: module.id().to_string(),
                });
            }
        }
        if !seen.contains(&current) {
            return Err(LazyreactorError::ModuleNotFound {
                id: current.to_string(),
            });
        }
        Ok(Self {
            modules,
            current,
        })
    }

    /// Modules in session order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub const fn current(&self) -> &ModuleId {
        &self.current
    }

    pub fn module(&self, id: &ModuleId) -> Option<&Module> {
        self.modules.iter().find(|module| module.id() == id)
    }

    pub fn module_mut(&mut self, id: &ModuleId) -> Option<&mut Module> {
        self.modules.iter_mut().find(|module| module.id() == id)
    }

    /// Modules a step applies to: every module for aggregator steps, otherwise
    /// only the current one.
    pub fn projects_for(&self, aggregating: bool) -> Vec<ModuleId> {
        if aggregating {
            self.modules.iter().map(|module| module.id().clone()).collect()
        } else {
            vec![self.current.clone()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reactor() -> Vec<Module> {
        vec![
            Module::new("parent"),
            Module::new("core").with_parent("parent"),
            Module::new("app").with_parent("parent"),
        ]
    }

    #[test]
    fn test_session_rejects_duplicate_ids() {
        let mut modules = reactor();
        modules.push(Module::new("core"));
        let err = Session::new(modules, "app").unwrap_err();
        assert!(matches!(err, LazyreactorError::DuplicateModule { id } if id == "core"));
    }

    #[test]
    fn test_session_requires_known_current_module() {
        let err = Session::new(reactor(), "ghost").unwrap_err();
        assert!(matches!(err, LazyreactorError::ModuleNotFound { id } if id == "ghost"));
    }

    #[test]
    fn test_projects_for_aggregator_covers_whole_session() {
        let session = Session::new(reactor(), "core").unwrap();
        assert_eq!(session.projects_for(false), vec![ModuleId::from("core")]);
        assert_eq!(
            session.projects_for(true),
            vec![ModuleId::from("parent"), ModuleId::from("core"), ModuleId::from("app")]
        );
    }

    #[test]
    fn test_visible_artifacts_without_filter() {
        let mut module = Module::new("app");
        let artifacts: BTreeSet<_> = [
            Artifact::new("org.example:lib:1.0", Scope::Compile),
            Artifact::new("org.example:junit:4.13", Scope::Test),
        ]
        .into_iter()
        .collect();
        module.set_resolved_artifacts(artifacts);
        assert_eq!(module.visible_artifacts().count(), 2);
    }
}
