//! Critical path analysis — CPM forward pass over the acyclic portion.
//!
//! Earliest finish of a node is the max earliest finish over its
//! prerequisites plus its own duration; the critical path is traced back
//! from the global maximum through the predecessor that achieved each
//! maximum. Every tie breaks toward the lowest node id, so results are
//! stable across runs.

use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use tracing::debug;

use roadmap_core::types::collections::FxHashMap;

use crate::graph::{topological_order, DependencyGraph};

/// One node on the critical path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalPathNode {
    pub id: String,
    /// Estimated days of work on this node.
    pub duration_days: f64,
    /// Day offset, from the start of the chain, at which the node finishes.
    pub earliest_finish: f64,
}

/// The longest dependency chain by estimated duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalPath {
    /// Ordered node ids, first prerequisite to final dependent.
    pub nodes: Vec<String>,
    /// Per-node duration and earliest finish along the path.
    pub breakdown: Vec<CriticalPathNode>,
    /// Earliest finish of the final node.
    pub total_duration_days: f64,
    /// Nodes left out because they sit on a cycle, sorted by id.
    pub excluded: Vec<String>,
}

impl CriticalPath {
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n == id)
    }
}

/// Compute the critical path with durations derived from node weights.
///
/// `daily_velocity` converts remaining weight to days. With no usable
/// velocity the weights themselves order the chain and the totals read as
/// relative effort rather than days.
pub fn analyze(dep_graph: &DependencyGraph, daily_velocity: f64) -> CriticalPath {
    let per_day = if daily_velocity.is_finite() && daily_velocity > 0.0 {
        daily_velocity
    } else {
        1.0
    };
    forward_pass(dep_graph, |idx| dep_graph.graph[idx].remaining_weight / per_day)
}

/// Compute the critical path with caller-supplied durations by node id.
/// Nodes absent from the map count as zero duration.
pub fn analyze_with_durations(
    dep_graph: &DependencyGraph,
    durations: &FxHashMap<String, f64>,
) -> CriticalPath {
    forward_pass(dep_graph, |idx| {
        durations
            .get(&dep_graph.graph[idx].id)
            .copied()
            .unwrap_or(0.0)
    })
}

fn forward_pass(
    dep_graph: &DependencyGraph,
    duration_of: impl Fn(NodeIndex) -> f64,
) -> CriticalPath {
    let graph = &dep_graph.graph;
    let order = topological_order(dep_graph);

    let mut finish: FxHashMap<NodeIndex, f64> = FxHashMap::default();
    let mut prev: FxHashMap<NodeIndex, NodeIndex> = FxHashMap::default();

    for &idx in &order {
        let mut best: Option<(NodeIndex, f64)> = None;
        for pred in graph.neighbors_directed(idx, Direction::Incoming) {
            let Some(&pred_finish) = finish.get(&pred) else {
                continue;
            };
            let better = match best {
                None => true,
                Some((best_pred, best_finish)) => {
                    pred_finish > best_finish
                        || (pred_finish == best_finish && graph[pred].id < graph[best_pred].id)
                }
            };
            if better {
                best = Some((pred, pred_finish));
            }
        }

        let start = best.map(|(_, f)| f).unwrap_or(0.0);
        finish.insert(idx, start + duration_of(idx));
        if let Some((pred, _)) = best {
            prev.insert(idx, pred);
        }
    }

    let mut terminal: Option<(NodeIndex, f64)> = None;
    for (&idx, &node_finish) in &finish {
        let better = match terminal {
            None => true,
            Some((best_idx, best_finish)) => {
                node_finish > best_finish
                    || (node_finish == best_finish && graph[idx].id < graph[best_idx].id)
            }
        };
        if better {
            terminal = Some((idx, node_finish));
        }
    }

    let mut path = Vec::new();
    let mut total = 0.0;
    if let Some((end, end_finish)) = terminal {
        total = end_finish;
        let mut current = end;
        path.push(current);
        while let Some(&pred) = prev.get(&current) {
            path.push(pred);
            current = pred;
        }
        path.reverse();
    }

    let breakdown: Vec<CriticalPathNode> = path
        .iter()
        .map(|&idx| CriticalPathNode {
            id: graph[idx].id.clone(),
            duration_days: duration_of(idx),
            earliest_finish: finish.get(&idx).copied().unwrap_or(0.0),
        })
        .collect();

    debug!(
        length = path.len(),
        total_days = total,
        excluded = dep_graph.cyclic.len(),
        "critical path computed"
    );

    CriticalPath {
        nodes: breakdown.iter().map(|n| n.id.clone()).collect(),
        breakdown,
        total_duration_days: total,
        excluded: dep_graph.cyclic_ids(),
    }
}
