//! The "ensure dependencies are resolved" entry point and its strategies.

use super::{DependencyContext, DependencyResolver, build_artifact_filter};
use crate::core::LifecycleError;
use crate::models::StepDescriptor;
use crate::reactor::{Module, ModuleId, Session, collect_child_modules};
use crate::scope::{ScopeSet, display_scopes};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Makes sure a build step's dependencies are resolved before it runs.
///
/// The host calls this exactly once per step invocation.
pub trait EnsureDependencies {
    /// Resolve whatever `descriptor` needs and attach the step's artifact filter.
    ///
    /// # Errors
    ///
    /// Resolver failures are returned unchanged; nothing is retried.
    fn ensure_dependencies_resolved(
        &mut self,
        descriptor: &StepDescriptor,
        session: &mut Session,
        context: &mut DependencyContext,
    ) -> Result<(), LifecycleError>;
}

/// Which [`EnsureDependencies`] implementation the host composes in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Resolve lazily, per module and per scope, touching only the step's subtree.
    #[default]
    NonDestructive,
    /// Resolve the current module before every step and, for aggregator steps,
    /// every module of the session.
    Eager,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonDestructive => f.write_str("non-destructive"),
            Self::Eager => f.write_str("eager"),
        }
    }
}

/// Lazy resolution: only what the step declares, only for the modules it
/// touches, only once per cycle.
///
/// For an aggregator step, the step's own requirements (not the narrower
/// current-module scopes held by the context) are resolved for every descendant
/// of the current module. Modules outside that subtree are never re-resolved.
#[derive(Debug)]
pub struct NonDestructiveExecutor<R> {
    resolver: R,
}

impl<R> NonDestructiveExecutor<R> {
    pub const fn new(resolver: R) -> Self {
        Self {
            resolver,
        }
    }

    pub const fn resolver(&self) -> &R {
        &self.resolver
    }
}

impl<R: DependencyResolver> EnsureDependencies for NonDestructiveExecutor<R> {
    fn ensure_dependencies_resolved(
        &mut self,
        descriptor: &StepDescriptor,
        session: &mut Session,
        context: &mut DependencyContext,
    ) -> Result<(), LifecycleError> {
        let aggregating = descriptor.aggregator;
        tracing::debug!("Ensuring dependencies for step '{}' (aggregator: {aggregating})", descriptor.name);

        if is_current_module_stale(session, context)? {
            resolve_current_module(&mut self.resolver, session, context, aggregating)?;
        }

        if aggregating {
            let scopes_to_collect = descriptor.scopes_to_collect();
            let scopes_to_resolve = descriptor.scopes_to_resolve();

            if context.is_resolution_required_for_aggregated_modules(&scopes_to_collect, &scopes_to_resolve) {
                let children = collect_child_modules(context.module(), session.modules());
                tracing::debug!(
                    "Step '{}' aggregates {} module(s) below '{}'",
                    descriptor.name,
                    children.len(),
                    context.module()
                );
                resolve_modules(&mut self.resolver, session, &children, &scopes_to_collect, &scopes_to_resolve)?;
                context.mark_aggregated_resolved(&scopes_to_collect, &scopes_to_resolve);
            } else {
                tracing::debug!("Aggregated modules already resolved for step '{}'", descriptor.name);
            }
        }

        attach_artifact_filter(descriptor, session);
        Ok(())
    }
}

/// The eager baseline the non-destructive executor replaces.
///
/// The current module is re-resolved before every step, and aggregator steps
/// re-resolve every other module of the session, whether or not anything
/// changed.
#[derive(Debug)]
pub struct EagerExecutor<R> {
    resolver: R,
}

impl<R> EagerExecutor<R> {
    pub const fn new(resolver: R) -> Self {
        Self {
            resolver,
        }
    }

    pub const fn resolver(&self) -> &R {
        &self.resolver
    }
}

impl<R: DependencyResolver> EnsureDependencies for EagerExecutor<R> {
    fn ensure_dependencies_resolved(
        &mut self,
        descriptor: &StepDescriptor,
        session: &mut Session,
        context: &mut DependencyContext,
    ) -> Result<(), LifecycleError> {
        let aggregating = descriptor.aggregator;
        resolve_current_module(&mut self.resolver, session, context, aggregating)?;

        if aggregating {
            let others: Vec<ModuleId> = session
                .modules()
                .iter()
                .map(Module::id)
                .filter(|id| *id != context.module())
                .cloned()
                .collect();
            resolve_modules(
                &mut self.resolver,
                session,
                &others,
                &descriptor.scopes_to_collect(),
                &descriptor.scopes_to_resolve(),
            )?;
        }

        attach_artifact_filter(descriptor, session);
        Ok(())
    }
}

/// An executor selected by [`Strategy`] at composition time.
#[derive(Debug)]
pub enum Executor<R> {
    NonDestructive(NonDestructiveExecutor<R>),
    Eager(EagerExecutor<R>),
}

impl<R> Executor<R> {
    pub fn new(strategy: Strategy, resolver: R) -> Self {
        match strategy {
            Strategy::NonDestructive => Self::NonDestructive(NonDestructiveExecutor::new(resolver)),
            Strategy::Eager => Self::Eager(EagerExecutor::new(resolver)),
        }
    }

    pub const fn strategy(&self) -> Strategy {
        match self {
            Self::NonDestructive(_) => Strategy::NonDestructive,
            Self::Eager(_) => Strategy::Eager,
        }
    }

    pub const fn resolver(&self) -> &R {
        match self {
            Self::NonDestructive(executor) => executor.resolver(),
            Self::Eager(executor) => executor.resolver(),
        }
    }
}

impl<R: DependencyResolver> EnsureDependencies for Executor<R> {
    fn ensure_dependencies_resolved(
        &mut self,
        descriptor: &StepDescriptor,
        session: &mut Session,
        context: &mut DependencyContext,
    ) -> Result<(), LifecycleError> {
        match self {
            Self::NonDestructive(executor) => executor.ensure_dependencies_resolved(descriptor, session, context),
            Self::Eager(executor) => executor.ensure_dependencies_resolved(descriptor, session, context),
        }
    }
}

fn missing_module(id: &ModuleId, scopes: &ScopeSet) -> LifecycleError {
    LifecycleError::ResolutionFailed {
        module: id.to_string(),
        scopes: display_scopes(scopes),
        reason: "module is not part of the session".to_string(),
    }
}

fn is_current_module_stale(session: &Session, context: &DependencyContext) -> Result<bool, LifecycleError> {
    let module = session
        .module(context.module())
        .ok_or_else(|| missing_module(context.module(), context.scopes_to_resolve_for_current_module()))?;
    Ok(context.is_resolution_required_for_current_module(module))
}

/// Resolve the context's module with the context's scopes, then synchronize.
fn resolve_current_module<R: DependencyResolver>(
    resolver: &mut R,
    session: &mut Session,
    context: &mut DependencyContext,
    aggregating: bool,
) -> Result<(), LifecycleError> {
    let id = context.module().clone();
    let module = session
        .module_mut(&id)
        .ok_or_else(|| missing_module(&id, context.scopes_to_resolve_for_current_module()))?;

    resolver.resolve_project_dependencies(
        module,
        context.scopes_to_collect_for_current_module(),
        context.scopes_to_resolve_for_current_module(),
        aggregating,
    )?;
    context.synchronize_with_project_state(module);
    Ok(())
}

fn resolve_modules<R: DependencyResolver>(
    resolver: &mut R,
    session: &mut Session,
    ids: &[ModuleId],
    scopes_to_collect: &ScopeSet,
    scopes_to_resolve: &ScopeSet,
) -> Result<(), LifecycleError> {
    for id in ids {
        let module = session.module_mut(id).ok_or_else(|| missing_module(id, scopes_to_resolve))?;
        resolver.resolve_project_dependencies(module, scopes_to_collect, scopes_to_resolve, true)?;
    }
    Ok(())
}

/// Attach the step's filter to the current module, or to every module of the
/// session for aggregator steps. A step without requirements clears filters.
fn attach_artifact_filter(descriptor: &StepDescriptor, session: &mut Session) {
    let filter = build_artifact_filter(descriptor);
    for id in session.projects_for(descriptor.aggregator) {
        if let Some(module) = session.module_mut(&id) {
            module.set_artifact_filter(filter.clone());
        }
    }
}
