//! lazyreactor - lazy, non-destructive dependency resolution for build reactors
//!
//! A build tool running a multi-module build (a *reactor*) normally resolves
//! every dependency scope of every module before every build step. lazyreactor
//! replaces that step with a policy that resolves per module and per scope, and
//! only for what the currently executing step declares it needs. Modules outside
//! the step's reach are never re-resolved.
//!
//! # Architecture Overview
//!
//! - **Scope expansion** ([`scope`]) - a step's minimal requirement
//!   (`compile`, `runtime`, `compile+runtime`, `runtime+system`, `test`) becomes
//!   the concrete set of scopes to resolve. Unknown requirements expand to
//!   nothing.
//! - **Reactor model** ([`reactor`]) - the host's flat module list with parent
//!   pointers, the current module, and pre-order descendant discovery.
//! - **Resolution** ([`resolver`]) - the [`resolver::EnsureDependencies`] entry
//!   point, the per-cycle [`resolver::DependencyContext`], artifact filters and the
//!   [`resolver::DependencyResolver`] seam to the external engine.
//!
//! The host chooses an executor at composition time through
//! [`resolver::Strategy`]: the [`resolver::NonDestructiveExecutor`] or the eager
//! baseline it replaces.
//!
//! # Example
//!
//! ```
//! use lazyreactor_cli::models::StepDescriptor;
//! use lazyreactor_cli::reactor::{Module, Session};
//! use lazyreactor_cli::resolver::{
//!     CatalogResolver, DependencyContext, EnsureDependencies, NonDestructiveExecutor,
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut session = Session::new(
//!     vec![Module::new("parent"), Module::new("core").with_parent("parent")],
//!     "parent",
//! )?;
//! let step = StepDescriptor::new("javadoc:aggregate").aggregating().with_resolution("compile");
//! let mut context = DependencyContext::for_plan("parent", [&step]);
//! let mut executor = NonDestructiveExecutor::new(CatalogResolver::new());
//!
//! executor.ensure_dependencies_resolved(&step, &mut session, &mut context)?;
//! executor.ensure_dependencies_resolved(&step, &mut session, &mut context)?;
//!
//! // `parent` once, `core` once: the second invocation had nothing to do.
//! assert_eq!(executor.resolver().records().len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`cli`] - the `lazyreactor` command line
//! - [`config`] - global configuration (`~/.lazyreactor/config.toml`)
//! - [`core`] - error types and user-facing error presentation
//! - [`models`] - build step descriptors

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod models;
pub mod reactor;
pub mod resolver;
pub mod scope;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
