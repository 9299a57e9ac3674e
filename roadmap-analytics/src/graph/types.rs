//! Core types for the dependency graph.

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use roadmap_core::types::collections::{FxHashMap, FxHashSet};

/// What a graph node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Feature,
    Milestone,
}

/// Node payload: one feature or milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkNode {
    /// Snapshot id of the feature or milestone.
    pub id: String,
    pub kind: NodeKind,
    /// Remaining effort in the configured unit. Milestones carry none of
    /// their own; their effort lives on the member features.
    pub remaining_weight: f64,
    /// Done features, and milestones whose members are all done.
    pub is_done: bool,
}

/// Why an edge exists. Edges always point prerequisite → dependent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Declared dependency: the source must finish before the target starts.
    Dependency,
    /// Milestone membership: the source feature is part of the target
    /// milestone.
    Membership,
}

/// A dependency cycle. Non-fatal: the build completes and downstream passes
/// run on the acyclic remainder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphWarning {
    /// Node ids along the cycle, in traversal order.
    pub cycle: Vec<String>,
}

/// Shape summary of a built graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStats {
    pub feature_count: usize,
    pub milestone_count: usize,
    pub dependency_edges: usize,
    pub membership_edges: usize,
    /// Nodes with no prerequisites.
    pub root_count: usize,
    /// Nodes nothing depends on.
    pub leaf_count: usize,
    pub cycle_count: usize,
}

/// The dependency graph over one snapshot.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    pub graph: StableDiGraph<WorkNode, EdgeKind>,
    /// Node id → index lookup.
    pub node_ids: FxHashMap<String, NodeIndex>,
    /// Cycles found at build time, one warning per cycle.
    pub warnings: Vec<GraphWarning>,
    /// Every node that participates in some cycle.
    pub cyclic: FxHashSet<NodeIndex>,
}

impl DependencyGraph {
    pub fn node(&self, id: &str) -> Option<NodeIndex> {
        self.node_ids.get(id).copied()
    }

    pub fn is_cyclic(&self, index: NodeIndex) -> bool {
        self.cyclic.contains(&index)
    }

    /// Ids of every node on a cycle, sorted for stable output.
    pub fn cyclic_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .cyclic
            .iter()
            .map(|idx| self.graph[*idx].id.clone())
            .collect();
        ids.sort();
        ids
    }

    pub fn stats(&self) -> GraphStats {
        let mut feature_count = 0;
        let mut milestone_count = 0;
        for idx in self.graph.node_indices() {
            match self.graph[idx].kind {
                NodeKind::Feature => feature_count += 1,
                NodeKind::Milestone => milestone_count += 1,
            }
        }
        let mut dependency_edges = 0;
        let mut membership_edges = 0;
        for edge in self.graph.edge_indices() {
            match self.graph[edge] {
                EdgeKind::Dependency => dependency_edges += 1,
                EdgeKind::Membership => membership_edges += 1,
            }
        }
        let root_count = self
            .graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .count();
        let leaf_count = self
            .graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Outgoing)
                    .next()
                    .is_none()
            })
            .count();
        GraphStats {
            feature_count,
            milestone_count,
            dependency_edges,
            membership_edges,
            root_count,
            leaf_count,
            cycle_count: self.warnings.len(),
        }
    }
}
