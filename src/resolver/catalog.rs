//! In-memory resolver over the modules' declared dependencies.

use super::DependencyResolver;
use crate::core::LifecycleError;
use crate::reactor::{Artifact, Module, ModuleId};
use crate::scope::{ScopeSet, display_scopes};
use serde::Serialize;
use std::collections::BTreeSet;

/// One call into the resolver, as recorded by [`CatalogResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionRecord {
    pub module: ModuleId,
    pub scopes_to_collect: ScopeSet,
    pub scopes_to_resolve: ScopeSet,
    pub aggregating: bool,
}

/// Resolves modules against the dependencies they declare.
///
/// Artifacts whose scope is in the collect or resolve set become the module's
/// dependency artifacts; those in the resolve set are also materialized, which
/// fails if the dependency is marked unavailable. Every call is recorded, so the
/// amount of resolution work a strategy causes can be audited.
#[derive(Debug, Default)]
pub struct CatalogResolver {
    records: Vec<ResolutionRecord>,
}

impl CatalogResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call made so far, oldest first.
    pub fn records(&self) -> &[ResolutionRecord] {
        &self.records
    }

    /// Number of calls made for one module.
    pub fn calls_for(&self, module: &ModuleId) -> usize {
        self.records.iter().filter(|record| &record.module == module).count()
    }
}

impl DependencyResolver for CatalogResolver {
    fn resolve_project_dependencies(
        &mut self,
        module: &mut Module,
        scopes_to_collect: &ScopeSet,
        scopes_to_resolve: &ScopeSet,
        aggregating: bool,
    ) -> Result<(), LifecycleError> {
        tracing::info!(
            "Resolving '{}' (collect: [{}], resolve: [{}], aggregating: {})",
            module.id(),
            display_scopes(scopes_to_collect),
            display_scopes(scopes_to_resolve),
            aggregating
        );
        self.records.push(ResolutionRecord {
            module: module.id().clone(),
            scopes_to_collect: scopes_to_collect.clone(),
            scopes_to_resolve: scopes_to_resolve.clone(),
            aggregating,
        });

        let mut collected = BTreeSet::new();
        let mut resolved: BTreeSet<Artifact> = BTreeSet::new();

        for dependency in module.dependencies() {
            let scope = dependency.artifact.scope;
            let materialize = scopes_to_resolve.contains(&scope);
            if !materialize && !scopes_to_collect.contains(&scope) {
                continue;
            }

            collected.insert(dependency.artifact.clone());
            if materialize {
                if !dependency.available {
                    return Err(LifecycleError::ResolutionFailed {
                        module: module.id().to_string(),
                        scopes: display_scopes(scopes_to_resolve),
                        reason: format!("artifact {} is not available", dependency.artifact.coordinate),
                    });
                }
                resolved.insert(dependency.artifact.clone());
            }
        }

        tracing::debug!(
            "Module '{}' now has {} collected and {} resolved artifacts",
            module.id(),
            collected.len(),
            resolved.len()
        );
        module.set_dependency_artifacts(collected);
        module.set_resolved_artifacts(resolved);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::{Scope, expand_str};

    fn module() -> Module {
        Module::new("app")
            .with_dependency(Artifact::new("org.example:api:1.0", Scope::Compile), true)
            .with_dependency(Artifact::new("org.example:driver:1.0", Scope::Runtime), true)
            .with_dependency(Artifact::new("org.example:junit:4.13", Scope::Test), true)
    }

    #[test]
    fn test_resolves_only_requested_scopes() {
        let mut resolver = CatalogResolver::new();
        let mut module = module();

        resolver
            .resolve_project_dependencies(&mut module, &ScopeSet::new(), &expand_str("runtime"), false)
            .unwrap();

        let resolved: Vec<_> = module.resolved_artifacts().iter().map(|a| a.coordinate.as_str()).collect();
        assert_eq!(resolved, ["org.example:api:1.0", "org.example:driver:1.0"]);
        assert_eq!(module.dependency_artifacts().len(), 2);
        assert_eq!(resolver.calls_for(&"app".into()), 1);
    }

    #[test]
    fn test_collect_only_does_not_materialize() {
        let mut resolver = CatalogResolver::new();
        let mut module = module();

        resolver
            .resolve_project_dependencies(&mut module, &expand_str("test"), &ScopeSet::new(), true)
            .unwrap();

        assert_eq!(module.dependency_artifacts().len(), 3);
        assert!(module.resolved_artifacts().is_empty());
        assert!(resolver.records()[0].aggregating);
    }

    #[test]
    fn test_unavailable_artifact_fails_only_when_materialized() {
        let mut resolver = CatalogResolver::new();
        let mut module = Module::new("app")
            .with_dependency(Artifact::new("org.example:api:1.0", Scope::Compile), true)
            .with_dependency(Artifact::new("org.example:missing:1.0", Scope::Test), false);

        resolver
            .resolve_project_dependencies(&mut module, &expand_str("test"), &expand_str("compile"), false)
            .unwrap();

        let err = resolver
            .resolve_project_dependencies(&mut module, &ScopeSet::new(), &expand_str("test"), false)
            .unwrap_err();
        assert!(err.to_string().contains("org.example:missing:1.0"));
        assert_eq!(resolver.records().len(), 2);
    }
}
