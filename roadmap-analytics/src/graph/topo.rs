//! Topological ordering of the acyclic portion of the graph.

use std::collections::BTreeMap;

use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;

use roadmap_core::types::collections::FxHashMap;

use super::types::DependencyGraph;

/// Kahn's algorithm over the nodes outside any cycle.
///
/// Edges touching cyclic nodes are ignored entirely; an acyclic node whose
/// only prerequisites are cyclic is treated as a root. Ready nodes are taken
/// in id order, so the result is deterministic.
pub fn topological_order(dep_graph: &DependencyGraph) -> Vec<NodeIndex> {
    let graph = &dep_graph.graph;

    let mut indegree: FxHashMap<NodeIndex, usize> = FxHashMap::default();
    for idx in graph.node_indices() {
        if dep_graph.is_cyclic(idx) {
            continue;
        }
        let degree = graph
            .neighbors_directed(idx, Direction::Incoming)
            .filter(|pred| !dep_graph.is_cyclic(*pred))
            .count();
        indegree.insert(idx, degree);
    }

    let mut ready: BTreeMap<String, NodeIndex> = indegree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(idx, _)| (graph[*idx].id.clone(), *idx))
        .collect();

    let mut order = Vec::with_capacity(indegree.len());
    while let Some((_, idx)) = ready.pop_first() {
        order.push(idx);
        for next in graph.neighbors_directed(idx, Direction::Outgoing) {
            if let Some(degree) = indegree.get_mut(&next) {
                *degree -= 1;
                if *degree == 0 {
                    ready.insert(graph[next].id.clone(), next);
                }
            }
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::cycles::find_cycles;
    use crate::graph::types::{EdgeKind, NodeKind, WorkNode};
    use petgraph::stable_graph::StableDiGraph;
    use roadmap_core::types::collections::FxHashMap;

    fn node(id: &str) -> WorkNode {
        WorkNode {
            id: id.to_string(),
            kind: NodeKind::Feature,
            remaining_weight: 1.0,
            is_done: false,
        }
    }

    fn graph_of(edges: &[(&str, &str)], nodes: &[&str]) -> DependencyGraph {
        let mut graph = StableDiGraph::new();
        let mut node_ids = FxHashMap::default();
        for id in nodes {
            let idx = graph.add_node(node(id));
            node_ids.insert((*id).to_string(), idx);
        }
        for (src, dst) in edges {
            graph.add_edge(node_ids[*src], node_ids[*dst], EdgeKind::Dependency);
        }
        let (warnings, cyclic) = find_cycles(&graph);
        DependencyGraph {
            graph,
            node_ids,
            warnings,
            cyclic,
        }
    }

    fn ids(dep_graph: &DependencyGraph, order: &[NodeIndex]) -> Vec<String> {
        order.iter().map(|i| dep_graph.graph[*i].id.clone()).collect()
    }

    #[test]
    fn test_diamond_ordering() {
        let dep_graph = graph_of(
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
            &["a", "b", "c", "d"],
        );
        let order = topological_order(&dep_graph);
        assert_eq!(ids(&dep_graph, &order), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_cyclic_nodes_excluded() {
        let dep_graph = graph_of(
            &[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d"), ("e", "d")],
            &["a", "b", "c", "d", "e"],
        );
        let order = topological_order(&dep_graph);
        let ordered = ids(&dep_graph, &order);
        // The a→b→c cycle is out; d still orders after its acyclic
        // prerequisite e.
        assert_eq!(ordered, vec!["e", "d"]);
    }

    #[test]
    fn test_independent_nodes_come_in_id_order() {
        let dep_graph = graph_of(&[], &["c", "a", "b"]);
        let order = topological_order(&dep_graph);
        assert_eq!(ids(&dep_graph, &order), vec!["a", "b", "c"]);
    }
}
