//! Descendant discovery over the parent-pointer module tree.

use super::{Module, ModuleId};
use std::collections::HashSet;

/// Collect every descendant of `parent` in pre-order.
///
/// Each child appears immediately after its parent, followed by its own
/// descendants before its next sibling. Siblings keep their order in `modules`.
/// `parent` itself is never part of the result.
///
/// Children are found by a linear scan of `modules` filtered on parent id,
/// applied recursively. A visited set guarantees termination and that no module
/// is reported twice, even if parent pointers form a cycle or a module names
/// itself as its parent.
///
/// # Examples
///
/// ```
/// use lazyreactor_cli::reactor::{collect_child_modules, Module, ModuleId};
///
/// let modules = vec![
///     Module::new("a"),
///     Module::new("b").with_parent("a"),
///     Module::new("c").with_parent("a"),
///     Module::new("d").with_parent("b"),
/// ];
/// let order: Vec<String> = collect_child_modules(&ModuleId::from("a"), &modules)
///     .into_iter()
///     .map(|id| id.to_string())
///     .collect();
/// assert_eq!(order, ["b", "d", "c"]);
/// ```
pub fn collect_child_modules(parent: &ModuleId, modules: &[Module]) -> Vec<ModuleId> {
    let mut visited = HashSet::from([parent.clone()]);
    let mut children = Vec::new();
    collect_into(parent, modules, &mut visited, &mut children);
    children
}

fn collect_into(
    parent: &ModuleId,
    modules: &[Module],
    visited: &mut HashSet<ModuleId>,
    children: &mut Vec<ModuleId>,
) {
    for module in modules {
        if module.parent() != Some(parent) {
            continue;
        }

        if !visited.insert(module.id().clone()) {
            tracing::warn!(
                "Module '{}' is reachable from '{}' more than once; parent pointers form a cycle",
                module.id(),
                parent
            );
            continue;
        }

        tracing::trace!("Found child module '{}' of '{}'", module.id(), parent);
        children.push(module.id().clone());
        collect_into(module.id(), modules, visited, children);
    }
}
