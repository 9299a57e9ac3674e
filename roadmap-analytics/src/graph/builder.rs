//! Building the dependency graph from a snapshot.

use petgraph::stable_graph::StableDiGraph;
use tracing::{debug, warn};

use roadmap_core::config::AnalyticsConfig;
use roadmap_core::model::RoadmapSnapshot;
use roadmap_core::types::collections::FxHashMap;

use super::cycles::find_cycles;
use super::types::{DependencyGraph, EdgeKind, NodeKind, WorkNode};

/// Build the dependency graph for a snapshot.
///
/// One node per feature and per milestone; one edge per declared dependency
/// (prerequisite → dependent) and one per milestone membership (member
/// feature → milestone). Assumes a validated snapshot; references that do
/// not resolve are skipped. Cycles are reported as warnings, never as
/// failures.
pub fn build(snapshot: &RoadmapSnapshot, config: &AnalyticsConfig) -> DependencyGraph {
    let unit = config.effective_velocity_unit();
    let mut graph = StableDiGraph::new();
    let mut node_ids = FxHashMap::default();

    for feature in &snapshot.features {
        let idx = graph.add_node(WorkNode {
            id: feature.id.clone(),
            kind: NodeKind::Feature,
            remaining_weight: feature.remaining_weight(unit),
            is_done: feature.is_done(),
        });
        node_ids.insert(feature.id.clone(), idx);
    }

    for milestone in &snapshot.milestones {
        let members = snapshot.milestone_features(milestone);
        let idx = graph.add_node(WorkNode {
            id: milestone.id.clone(),
            kind: NodeKind::Milestone,
            remaining_weight: 0.0,
            is_done: !members.is_empty() && members.iter().all(|f| f.is_done()),
        });
        node_ids.insert(milestone.id.clone(), idx);
    }

    for feature in &snapshot.features {
        let Some(&dependent) = node_ids.get(&feature.id) else {
            continue;
        };
        for dep in &feature.depends_on {
            if let Some(&prerequisite) = node_ids.get(dep) {
                if graph.find_edge(prerequisite, dependent).is_none() {
                    graph.add_edge(prerequisite, dependent, EdgeKind::Dependency);
                }
            }
        }
    }

    for milestone in &snapshot.milestones {
        let Some(&milestone_idx) = node_ids.get(&milestone.id) else {
            continue;
        };
        for feature_id in &milestone.feature_ids {
            if let Some(&member) = node_ids.get(feature_id) {
                if graph.find_edge(member, milestone_idx).is_none() {
                    graph.add_edge(member, milestone_idx, EdgeKind::Membership);
                }
            }
        }
    }

    let (warnings, cyclic) = find_cycles(&graph);
    for warning in &warnings {
        warn!(cycle = ?warning.cycle, "dependency cycle detected");
    }
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        cycles = warnings.len(),
        "built dependency graph"
    );

    DependencyGraph {
        graph,
        node_ids,
        warnings,
        cyclic,
    }
}
