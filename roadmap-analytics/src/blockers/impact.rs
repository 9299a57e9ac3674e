//! Transitive impact of a blocked feature.

use std::collections::VecDeque;

use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;

use roadmap_core::types::collections::FxHashSet;

use crate::graph::{DependencyGraph, NodeKind};

/// Work stuck behind one feature.
#[derive(Debug, Clone)]
pub struct BlockerImpact {
    /// The feature itself plus every transitive dependent, feature first,
    /// dependents sorted by id.
    pub affected_feature_ids: Vec<String>,
    /// Remaining weight of the affected set.
    pub points_blocked: f64,
    /// Milestones reachable from the affected set, sorted by id.
    pub milestones_at_risk: Vec<String>,
}

/// Forward BFS from a feature along prerequisite → dependent edges.
///
/// Every feature reached is transitively stuck behind `start`; milestone
/// nodes reached through membership edges are the milestones at risk.
pub fn compute_impact(dep_graph: &DependencyGraph, start: NodeIndex) -> BlockerImpact {
    let graph = &dep_graph.graph;
    let mut visited: FxHashSet<NodeIndex> = FxHashSet::default();
    let mut queue = VecDeque::new();
    let mut dependents = Vec::new();
    let mut milestones = Vec::new();
    let mut points_blocked = 0.0;

    visited.insert(start);
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        let work = &graph[node];
        match work.kind {
            NodeKind::Feature => {
                points_blocked += work.remaining_weight;
                if node != start {
                    dependents.push(work.id.clone());
                }
            }
            NodeKind::Milestone => milestones.push(work.id.clone()),
        }

        for next in graph.neighbors_directed(node, Direction::Outgoing) {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    dependents.sort();
    milestones.sort();

    let mut affected_feature_ids = Vec::with_capacity(dependents.len() + 1);
    affected_feature_ids.push(graph[start].id.clone());
    affected_feature_ids.extend(dependents);

    BlockerImpact {
        affected_feature_ids,
        points_blocked,
        milestones_at_risk: milestones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roadmap_core::config::AnalyticsConfig;
    use roadmap_core::model::{Feature, FeatureStatus, Milestone, RoadmapSnapshot};

    fn feature(id: &str, points: f64, depends_on: &[&str]) -> Feature {
        Feature {
            id: id.to_string(),
            estimated_points: points,
            completed_points: 0.0,
            status: FeatureStatus::Planned,
            depends_on: depends_on.iter().map(|d| (*d).to_string()).collect(),
            last_activity_date: None,
            notes: None,
        }
    }

    #[test]
    fn test_impact_covers_the_forward_closure() {
        // a blocks b, b blocks c; d is unrelated. m1 contains c.
        let snapshot = RoadmapSnapshot {
            as_of_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            features: vec![
                feature("a", 3.0, &[]),
                feature("b", 5.0, &["a"]),
                feature("c", 8.0, &["b"]),
                feature("d", 13.0, &[]),
            ],
            milestones: vec![Milestone {
                id: "m1".to_string(),
                due_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
                feature_ids: vec!["c".to_string()],
            }],
            sprint_history: Vec::new(),
            transitions: Vec::new(),
        };
        let dep_graph = crate::graph::build(&snapshot, &AnalyticsConfig::default());
        let impact = compute_impact(&dep_graph, dep_graph.node("a").unwrap());

        assert_eq!(impact.affected_feature_ids, vec!["a", "b", "c"]);
        assert_eq!(impact.points_blocked, 16.0);
        assert_eq!(impact.milestones_at_risk, vec!["m1"]);
    }

    #[test]
    fn test_leaf_feature_impact_is_itself() {
        let snapshot = RoadmapSnapshot {
            as_of_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            features: vec![feature("a", 3.0, &[]), feature("b", 5.0, &["a"])],
            milestones: Vec::new(),
            sprint_history: Vec::new(),
            transitions: Vec::new(),
        };
        let dep_graph = crate::graph::build(&snapshot, &AnalyticsConfig::default());
        let impact = compute_impact(&dep_graph, dep_graph.node("b").unwrap());

        assert_eq!(impact.affected_feature_ids, vec!["b"]);
        assert_eq!(impact.points_blocked, 5.0);
        assert!(impact.milestones_at_risk.is_empty());
    }
}
