//! Shared data models describing the build steps whose dependencies get
//! resolved.

use crate::scope::{ScopeRequirement, ScopeSet, expand};
use serde::{Deserialize, Serialize};

/// Metadata a build step declares about its dependency needs.
///
/// The host supplies one descriptor per step invocation. Collection (discovering
/// the dependency graph) and resolution (materializing artifacts) are declared
/// independently and either may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepDescriptor {
    /// Human readable step name, e.g. `compiler:compile`
    pub name: String,
    /// Whether the step applies to the whole subtree below the current module
    #[serde(default)]
    pub aggregator: bool,
    /// Minimal scope needed to collect the dependency graph
    #[serde(default, with = "requirement_serde")]
    pub collection_required: Option<ScopeRequirement>,
    /// Minimal scope needed to materialize artifacts
    #[serde(default, with = "requirement_serde")]
    pub resolution_required: Option<ScopeRequirement>,
}

impl StepDescriptor {
    /// A step that requires nothing and does not aggregate.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Mark the step as an aggregator.
    #[must_use]
    pub const fn aggregating(mut self) -> Self {
        self.aggregator = true;
        self
    }

    /// Set the collection requirement from its declared string; an empty string clears it.
    #[must_use]
    pub fn with_collection(mut self, requirement: &str) -> Self {
        self.collection_required = ScopeRequirement::parse(requirement);
        self
    }

    /// Set the resolution requirement from its declared string; an empty string clears it.
    #[must_use]
    pub fn with_resolution(mut self, requirement: &str) -> Self {
        self.resolution_required = ScopeRequirement::parse(requirement);
        self
    }

    /// Concrete scopes this step needs collected.
    #[must_use]
    pub fn scopes_to_collect(&self) -> ScopeSet {
        expand(self.collection_required.as_ref())
    }

    /// Concrete scopes this step needs resolved.
    #[must_use]
    pub fn scopes_to_resolve(&self) -> ScopeSet {
        expand(self.resolution_required.as_ref())
    }
}

mod requirement_serde {
    use crate::scope::ScopeRequirement;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<ScopeRequirement>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_ref().map_or("", ScopeRequirement::as_str))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ScopeRequirement>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ScopeRequirement::parse(&raw))
    }
}
