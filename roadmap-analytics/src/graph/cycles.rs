//! Cycle detection via depth-first search with an explicit recursion stack.

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;

use roadmap_core::types::collections::FxHashSet;

use super::types::{EdgeKind, GraphWarning, WorkNode};

/// Find every dependency cycle in the graph.
///
/// A node revisited while still on the traversal stack closes a cycle; the
/// stack slice from its first occurrence is the full cycle, reported in
/// traversal order. Detection never aborts the build.
///
/// Returns the warnings and the set of all nodes on any cycle.
pub fn find_cycles(
    graph: &StableDiGraph<WorkNode, EdgeKind>,
) -> (Vec<GraphWarning>, FxHashSet<NodeIndex>) {
    let mut visited: FxHashSet<NodeIndex> = FxHashSet::default();
    let mut warnings = Vec::new();
    let mut cyclic: FxHashSet<NodeIndex> = FxHashSet::default();

    for start in graph.node_indices() {
        if visited.contains(&start) {
            continue;
        }
        let mut path = Vec::new();
        let mut on_stack = FxHashSet::default();
        dfs(
            graph,
            start,
            &mut visited,
            &mut path,
            &mut on_stack,
            &mut warnings,
            &mut cyclic,
        );
    }

    (warnings, cyclic)
}

fn dfs(
    graph: &StableDiGraph<WorkNode, EdgeKind>,
    node: NodeIndex,
    visited: &mut FxHashSet<NodeIndex>,
    path: &mut Vec<NodeIndex>,
    on_stack: &mut FxHashSet<NodeIndex>,
    warnings: &mut Vec<GraphWarning>,
    cyclic: &mut FxHashSet<NodeIndex>,
) {
    visited.insert(node);
    on_stack.insert(node);
    path.push(node);

    // Sorted neighbors keep cycle reports deterministic across builds.
    let mut neighbors: Vec<NodeIndex> = graph.neighbors_directed(node, Direction::Outgoing).collect();
    neighbors.sort_by(|a, b| graph[*a].id.cmp(&graph[*b].id));

    for next in neighbors {
        if on_stack.contains(&next) {
            let cycle_start = path.iter().position(|n| *n == next).unwrap_or(0);
            let members = &path[cycle_start..];
            cyclic.extend(members.iter().copied());
            warnings.push(GraphWarning {
                cycle: members.iter().map(|n| graph[*n].id.clone()).collect(),
            });
        } else if !visited.contains(&next) {
            dfs(graph, next, visited, path, on_stack, warnings, cyclic);
        }
    }

    on_stack.remove(&node);
    path.pop();
}
