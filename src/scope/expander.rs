//! Requirement → concrete scope expansion.
//!
//! Build steps declare the *minimal* scope they need. Resolving exactly that one
//! scope would under-resolve, since compile-time artifacts are also needed on a
//! runtime or test classpath. This module maps every requirement to the full set
//! of scopes that satisfy it:
//!
//! | requirement       | expands to                                 |
//! |-------------------|--------------------------------------------|
//! | (absent)          | {}                                         |
//! | `compile`         | {compile, system, provided}                |
//! | `runtime`         | {compile, runtime}                         |
//! | `compile+runtime` | {compile, system, provided, runtime}       |
//! | `runtime+system`  | {compile, system, runtime}                 |
//! | `test`            | {compile, system, provided, runtime, test} |
//! | anything else     | {}                                         |
//!
//! Expansion is total: unknown requirements degrade to the empty set, which in
//! turn means no resolution is triggered for them.

use super::{Scope, ScopeRequirement, ScopeSet};

/// Expand a declared requirement into the scopes to collect or resolve.
///
/// # Examples
///
/// ```
/// use lazyreactor_cli::scope::{expand, Scope, ScopeRequirement};
///
/// let scopes = expand(Some(&ScopeRequirement::Runtime));
/// assert_eq!(scopes.into_iter().collect::<Vec<_>>(), vec![Scope::Compile, Scope::Runtime]);
/// assert!(expand(None).is_empty());
/// ```
#[must_use]
pub fn expand(requirement: Option<&ScopeRequirement>) -> ScopeSet {
    let scopes: &[Scope] = match requirement {
        None | Some(ScopeRequirement::Other(_)) => &[],
        Some(ScopeRequirement::Compile) => &[Scope::Compile, Scope::System, Scope::Provided],
        Some(ScopeRequirement::Runtime) => &[Scope::Compile, Scope::Runtime],
        Some(ScopeRequirement::CompileRuntime) => {
            &[Scope::Compile, Scope::System, Scope::Provided, Scope::Runtime]
        }
        Some(ScopeRequirement::RuntimeSystem) => &[Scope::Compile, Scope::System, Scope::Runtime],
        Some(ScopeRequirement::Test) => {
            &[Scope::Compile, Scope::System, Scope::Provided, Scope::Runtime, Scope::Test]
        }
    };
    scopes.iter().copied().collect()
}

/// Expand a raw requirement string. Empty and unknown strings yield `{}`.
#[must_use]
pub fn expand_str(requirement: &str) -> ScopeSet {
    expand(ScopeRequirement::parse(requirement).as_ref())
}
