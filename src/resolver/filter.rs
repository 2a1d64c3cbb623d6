//! Artifact filters derived from step descriptors.

use crate::models::StepDescriptor;
use crate::reactor::Artifact;
use crate::scope::expand_str;
use serde::Serialize;
use std::collections::BTreeSet;

/// A cumulative scope filter: the union of a set of literal scope tags.
///
/// Tags are stored exactly as the step declared them (`"runtime+system"` stays
/// one tag). [`ArtifactFilter::includes`] reads each tag through the scope
/// lattice, so a `"compile"` tag admits compile, provided and system artifacts.
/// Unknown tags admit nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArtifactFilter {
    scopes: BTreeSet<String>,
}

impl ArtifactFilter {
    pub fn new<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }

    /// The literal tags this filter covers.
    pub const fn scopes(&self) -> &BTreeSet<String> {
        &self.scopes
    }

    /// Whether an artifact is visible through this filter.
    pub fn includes(&self, artifact: &Artifact) -> bool {
        self.scopes.iter().any(|tag| expand_str(tag).contains(&artifact.scope))
    }
}

/// Build the filter for a step from its literal collection and resolution
/// requirements.
///
/// Returns `None` when the step declares neither.
///
/// # Examples
///
/// ```
/// use lazyreactor_cli::models::StepDescriptor;
/// use lazyreactor_cli::resolver::build_artifact_filter;
///
/// let step = StepDescriptor::new("compile").with_collection("compile").with_resolution("test");
/// let filter = build_artifact_filter(&step).unwrap();
/// assert_eq!(filter.scopes().iter().collect::<Vec<_>>(), ["compile", "test"]);
///
/// assert!(build_artifact_filter(&StepDescriptor::new("clean")).is_none());
/// ```
pub fn build_artifact_filter(descriptor: &StepDescriptor) -> Option<ArtifactFilter> {
    let scopes: Vec<&str> = [&descriptor.collection_required, &descriptor.resolution_required]
        .into_iter()
        .flatten()
        .map(|requirement| requirement.as_str())
        .collect();

    if scopes.is_empty() { None } else { Some(ArtifactFilter::new(scopes)) }
}
