//! Lazy, non-destructive dependency resolution for build steps.
//!
//! Before each build step runs, the host asks an [`EnsureDependencies`]
//! implementation to make sure the step's dependencies are available. The
//! default behaviour of a build tool is to eagerly resolve every scope for every
//! reactor module. The [`NonDestructiveExecutor`] instead resolves only what the
//! step declares, only for the modules it touches, and only when that has not
//! already happened in the current cycle.
//!
//! # Pieces
//!
//! - [`crate::scope::expand`] turns declared requirements into concrete scopes.
//! - [`DependencyContext`] remembers what was already resolved, so repeated
//!   invocations do not repeat external resolution.
//! - [`crate::reactor::collect_child_modules`] discovers the subtree of an
//!   aggregator step.
//! - [`build_artifact_filter`] derives the [`ArtifactFilter`] attached to every
//!   module the step can see.
//! - [`DependencyResolver`] is the external engine performing the actual
//!   fetch. [`CatalogResolver`] is an in-memory implementation over the modules'
//!   declared dependencies.
//!
//! # Control flow
//!
//! ```text
//! context says current module needs it? ── yes ──> resolve current, synchronize
//!          │
//! aggregator step and new aggregated scopes? ── yes ──> resolve each descendant
//!          │
//! build filter from literal requirements ──> attach to every relevant module
//! ```

mod catalog;
mod context;
mod executor;
mod filter;

pub use catalog::{CatalogResolver, ResolutionRecord};
pub use context::DependencyContext;
pub use executor::{EagerExecutor, EnsureDependencies, Executor, NonDestructiveExecutor, Strategy};
pub use filter::{ArtifactFilter, build_artifact_filter};

use crate::core::LifecycleError;
use crate::reactor::Module;
use crate::scope::ScopeSet;

/// The external engine that collects and materializes a module's dependencies.
///
/// Implementations write the outcome onto the module (its dependency artifacts
/// and resolved artifacts). Failures are reported as
/// [`LifecycleError::ResolutionFailed`] and must not be retried by callers.
pub trait DependencyResolver {
    /// Resolve `module` for the given scopes.
    ///
    /// `aggregating` tells the engine the request is part of an aggregator
    /// step, which lets it relax checks that only make sense for a single
    /// module build.
    fn resolve_project_dependencies(
        &mut self,
        module: &mut Module,
        scopes_to_collect: &ScopeSet,
        scopes_to_resolve: &ScopeSet,
        aggregating: bool,
    ) -> Result<(), LifecycleError>;
}

impl<R: DependencyResolver + ?Sized> DependencyResolver for &mut R {
    fn resolve_project_dependencies(
        &mut self,
        module: &mut Module,
        scopes_to_collect: &ScopeSet,
        scopes_to_resolve: &ScopeSet,
        aggregating: bool,
    ) -> Result<(), LifecycleError> {
        (**self).resolve_project_dependencies(module, scopes_to_collect, scopes_to_resolve, aggregating)
    }
}
