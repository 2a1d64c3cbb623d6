//! Per-invocation resolution state.

use crate::models::StepDescriptor;
use crate::reactor::{Artifact, Module, ModuleId};
use crate::scope::ScopeSet;
use std::collections::BTreeSet;

/// The state of the module last synchronized into a context.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ProjectSnapshot {
    module: ModuleId,
    dependency_artifacts: BTreeSet<Artifact>,
}

/// Tracks what has already been resolved for the module being built and for the
/// aggregated module set.
///
/// A context is threaded explicitly through every step invocation of one build
/// cycle. It answers two independent questions:
///
/// - does the *current module* need (re)resolution? Yes when it has scopes to
///   collect or resolve and the context has not been synchronized with its
///   current dependency state;
/// - does the *aggregated set* need resolution for a given pair of scope sets?
///   Yes when any of those scopes has not been resolved for the aggregated set in
///   this cycle.
#[derive(Debug, Clone)]
pub struct DependencyContext {
    module: ModuleId,
    scopes_to_collect: ScopeSet,
    scopes_to_resolve: ScopeSet,
    synchronized: Option<ProjectSnapshot>,
    aggregated_collect: ScopeSet,
    aggregated_resolve: ScopeSet,
}

impl DependencyContext {
    /// A fresh context for `module` with the scopes its build plan needs.
    pub fn new(module: impl Into<ModuleId>, scopes_to_collect: ScopeSet, scopes_to_resolve: ScopeSet) -> Self {
        Self {
            module: module.into(),
            scopes_to_collect,
            scopes_to_resolve,
            synchronized: None,
            aggregated_collect: ScopeSet::new(),
            aggregated_resolve: ScopeSet::new(),
        }
    }

    /// A context whose current-module scopes are the union of what every step
    /// of a build plan declares.
    pub fn for_plan<'a>(module: impl Into<ModuleId>, steps: impl IntoIterator<Item = &'a StepDescriptor>) -> Self {
        let mut collect = ScopeSet::new();
        let mut resolve = ScopeSet::new();
        for step in steps {
            collect.extend(step.scopes_to_collect());
            resolve.extend(step.scopes_to_resolve());
        }
        Self::new(module, collect, resolve)
    }

    /// The module this context resolves.
    pub const fn module(&self) -> &ModuleId {
        &self.module
    }

    /// Scopes whose dependency graph the current module needs collected.
    pub const fn scopes_to_collect_for_current_module(&self) -> &ScopeSet {
        &self.scopes_to_collect
    }

    /// Scopes whose artifacts the current module needs materialized.
    pub const fn scopes_to_resolve_for_current_module(&self) -> &ScopeSet {
        &self.scopes_to_resolve
    }

    /// Whether `module` needs resolution before the step can run.
    ///
    /// Never true when no scopes are requested. Otherwise true until the context
    /// has been synchronized with this module, and again whenever the module's
    /// dependency artifacts changed since that synchronization.
    pub fn is_resolution_required_for_current_module(&self, module: &Module) -> bool {
        if self.scopes_to_collect.is_empty() && self.scopes_to_resolve.is_empty() {
            return false;
        }

        match &self.synchronized {
            Some(snapshot) => {
                snapshot.module != *module.id()
                    || snapshot.dependency_artifacts != *module.dependency_artifacts()
            }
            None => true,
        }
    }

    /// Record `module`'s current dependency state as up to date.
    pub fn synchronize_with_project_state(&mut self, module: &Module) {
        self.synchronized = Some(ProjectSnapshot {
            module: module.id().clone(),
            dependency_artifacts: module.dependency_artifacts().clone(),
        });
    }

    /// Whether the aggregated module set still needs any of these scopes.
    pub fn is_resolution_required_for_aggregated_modules(
        &self,
        scopes_to_collect: &ScopeSet,
        scopes_to_resolve: &ScopeSet,
    ) -> bool {
        !scopes_to_collect.is_subset(&self.aggregated_collect)
            || !scopes_to_resolve.is_subset(&self.aggregated_resolve)
    }

    /// Record scopes as resolved for the aggregated module set.
    pub fn mark_aggregated_resolved(&mut self, scopes_to_collect: &ScopeSet, scopes_to_resolve: &ScopeSet) {
        self.aggregated_collect.extend(scopes_to_collect.iter().copied());
        self.aggregated_resolve.extend(scopes_to_resolve.iter().copied());
    }
}
