//! Dependency analysis for unit systems
//!
//! Shared by the validator and by tools that want to list units in
//! definition order.

use crate::unit_system::UnitSystem;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Build the dependency graph of a unit system
///
/// Maps each defined unit to the names its definition refers to.
/// Base units map to an empty set.
pub fn build_dependency_graph(system: &UnitSystem) -> HashMap<String, HashSet<String>> {
    let mut graph = HashMap::new();

    for (name, definition) in system {
        let dependencies: HashSet<String> = definition
            .references()
            .into_iter()
            .map(str::to_string)
            .collect();
        graph.insert(name.clone(), dependencies);
    }

    graph
}

/// Result of peeling a dependency graph in topological order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologicalOrder {
    /// Nodes whose dependencies were all peeled first, dependencies first
    pub order: Vec<String>,
    /// Nodes on a cycle or depending on one
    pub blocked: BTreeSet<String>,
}

/// Kahn's algorithm. Nodes that never reach zero remaining dependencies
/// are returned as `blocked` instead of failing.
pub fn topological_sort(graph: &HashMap<String, HashSet<String>>) -> TopologicalOrder {
    // Build reverse graph: node -> set of nodes that depend on it
    let mut reverse_graph: HashMap<&str, HashSet<&str>> = HashMap::new();
    let mut all_nodes: HashSet<&str> = HashSet::new();

    for (node, dependencies) in graph {
        all_nodes.insert(node);
        reverse_graph.entry(node).or_default();

        for dep in dependencies {
            all_nodes.insert(dep);
            reverse_graph.entry(dep).or_default().insert(node);
        }
    }

    let mut dependency_count: HashMap<&str, usize> = all_nodes
        .iter()
        .map(|node| (*node, graph.get(*node).map_or(0, HashSet::len)))
        .collect();

    // Sorted start so the order is stable between runs
    let mut ready: Vec<&str> = dependency_count
        .iter()
        .filter(|(_, &count)| count == 0)
        .map(|(node, _)| *node)
        .collect();
    ready.sort_unstable();
    let mut queue: VecDeque<&str> = ready.into();

    let mut order = Vec::new();
    while let Some(node) = queue.pop_front() {
        order.push(node.to_string());

        if let Some(dependents) = reverse_graph.get(node) {
            let mut unblocked = Vec::new();
            for dependent in dependents {
                if let Some(count) = dependency_count.get_mut(dependent) {
                    *count -= 1;
                    if *count == 0 {
                        unblocked.push(*dependent);
                    }
                }
            }
            unblocked.sort_unstable();
            queue.extend(unblocked);
        }
    }

    let blocked = dependency_count
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(node, _)| node.to_string())
        .collect();

    TopologicalOrder { order, blocked }
}

/// Names referenced by some definition but not defined themselves, as
/// `(unit, missing reference)` pairs
pub fn dangling_references(system: &UnitSystem) -> Vec<(String, String)> {
    let mut dangling = Vec::new();
    for (name, definition) in system {
        for reference in definition.references() {
            if !system.contains(reference) {
                dangling.push((name.clone(), reference.to_string()));
            }
        }
    }
    dangling
}
