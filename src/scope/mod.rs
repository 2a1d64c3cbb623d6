//! Dependency scopes and the scope requirements build steps declare.
//!
//! A [`Scope`] is one of the five fixed dependency visibility categories. A
//! [`ScopeRequirement`] is the nominal value a step descriptor carries for
//! collection or resolution (for example `"runtime+system"`), which the
//! [`expander`] turns into the concrete [`ScopeSet`] handed to the resolver.
//!
//! # Broadness
//!
//! Scopes are ordered from narrowest to broadest as far as the requirement
//! lattice is concerned:
//!
//! ```text
//! test ⊇ runtime+system ⊇ compile ⊇ ...
//! ```
//!
//! The derived [`Ord`] on [`Scope`] only fixes a stable iteration order for
//! [`ScopeSet`]; it is not the inclusion lattice itself, which lives in
//! [`expander::expand`].

pub mod expander;

pub use expander::{expand, expand_str};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A concrete set of scopes, iterated in [`Scope`] declaration order.
pub type ScopeSet = BTreeSet<Scope>;

/// A named category of dependency visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Needed to compile and at runtime.
    Compile,
    /// Needed to compile, supplied by the runtime environment.
    Provided,
    /// Like provided, but located through an explicit path on the system.
    System,
    /// Needed only at runtime.
    Runtime,
    /// Needed only to compile and run tests.
    Test,
}

impl Scope {
    /// Every scope, narrowest first.
    pub const ALL: [Scope; 5] =
        [Scope::Compile, Scope::Provided, Scope::System, Scope::Runtime, Scope::Test];

    /// The canonical lowercase name of this scope.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Provided => "provided",
            Self::System => "system",
            Self::Runtime => "runtime",
            Self::Test => "test",
        }
    }

    /// Parse a scope name. Returns `None` for anything that is not an exact
    /// scope name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scope| scope.as_str() == name)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The minimal scope a build step declares it needs.
///
/// Unrecognized names are preserved in [`ScopeRequirement::Other`] rather than
/// rejected: they still show up as literal tags on artifact filters, but they
/// expand to no scopes at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeRequirement {
    /// `compile`
    Compile,
    /// `runtime`
    Runtime,
    /// `compile+runtime`
    CompileRuntime,
    /// `runtime+system`
    RuntimeSystem,
    /// `test`
    Test,
    /// Any other non-empty value.
    Other(String),
}

impl ScopeRequirement {
    /// Parse a requirement as written on a step descriptor.
    ///
    /// Only the empty string means "no requirement" and yields `None`. Names are
    /// matched exactly, so padded input such as `" test "` is kept as
    /// [`ScopeRequirement::Other`].
    ///
    /// # Examples
    ///
    /// ```
    /// use lazyreactor_cli::scope::ScopeRequirement;
    ///
    /// assert_eq!(ScopeRequirement::parse("test"), Some(ScopeRequirement::Test));
    /// assert_eq!(ScopeRequirement::parse(""), None);
    /// assert_eq!(
    ///     ScopeRequirement::parse("bogus"),
    ///     Some(ScopeRequirement::Other("bogus".to_string()))
    /// );
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        Some(match value {
            "compile" => Self::Compile,
            "runtime" => Self::Runtime,
            "compile+runtime" => Self::CompileRuntime,
            "runtime+system" => Self::RuntimeSystem,
            "test" => Self::Test,
            other => Self::Other(other.to_string()),
        })
    }

    /// The literal requirement name, exactly as declared.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Compile => "compile",
            Self::Runtime => "runtime",
            Self::CompileRuntime => "compile+runtime",
            Self::RuntimeSystem => "runtime+system",
            Self::Test => "test",
            Self::Other(name) => name,
        }
    }

    /// Whether this requirement names one of the known lattice entries.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for ScopeRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a scope set as `compile, system, runtime` for messages and logs.
#[must_use]
pub fn display_scopes(scopes: &ScopeSet) -> String {
    scopes.iter().map(|scope| scope.as_str()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_round_trips_through_name() {
        for scope in Scope::ALL {
            assert_eq!(Scope::parse(scope.as_str()), Some(scope));
        }
        assert_eq!(Scope::parse("Compile"), None);
        assert_eq!(Scope::parse("import"), None);
    }

    #[test]
    fn test_requirement_keeps_unknown_names() {
        let requirement = ScopeRequirement::parse("import").unwrap();
        assert_eq!(requirement.as_str(), "import");
        assert!(!requirement.is_recognized());
        assert!(ScopeRequirement::parse("compile+runtime").unwrap().is_recognized());
    }

    #[test]
    fn test_only_empty_requirement_is_absent() {
        assert_eq!(ScopeRequirement::parse(""), None);
        assert_eq!(ScopeRequirement::parse("   "), Some(ScopeRequirement::Other("   ".to_string())));
        assert_eq!(ScopeRequirement::parse(" test "), Some(ScopeRequirement::Other(" test ".to_string())));
    }

    #[test]
    fn test_display_scopes_uses_declaration_order() {
        let scopes: ScopeSet = [Scope::Runtime, Scope::Compile, Scope::System].into_iter().collect();
        assert_eq!(display_scopes(&scopes), "compile, system, runtime");
        assert_eq!(display_scopes(&ScopeSet::new()), "");
    }
}
