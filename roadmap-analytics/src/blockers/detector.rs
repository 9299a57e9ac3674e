//! Blocker detection passes.
//!
//! Three passes over the snapshot produce tagged blockers: stale work,
//! unmet dependencies, and external waits flagged in feature notes. A
//! feature can carry several blockers at once, one per cause.

use tracing::debug;

use roadmap_core::config::AnalyticsConfig;
use roadmap_core::errors::AnalyticsError;
use roadmap_core::model::{Feature, FeatureStatus, RoadmapSnapshot};

use crate::critical_path::CriticalPath;
use crate::graph::DependencyGraph;

use super::impact::compute_impact;
use super::patterns::BlockerPatternSet;
use super::types::{Blocker, BlockerKind, Severity};

/// Detect every blocker in the snapshot.
///
/// Results are ranked by severity, then points blocked descending, then
/// feature id; ties between causes on the same feature order by cause name.
pub fn detect(
    snapshot: &RoadmapSnapshot,
    dep_graph: &DependencyGraph,
    critical_path: &CriticalPath,
    config: &AnalyticsConfig,
) -> Result<Vec<Blocker>, AnalyticsError> {
    let pattern_set = BlockerPatternSet::compile(&config.effective_external_patterns())?;
    let index = snapshot.feature_index();
    let mut blockers = Vec::new();

    for feature in &snapshot.features {
        let mut causes: Vec<(BlockerKind, Severity)> = Vec::new();

        if let Some(severity) = stale_severity(feature, snapshot, config) {
            causes.push((BlockerKind::Stale, severity));
        }

        if feature.status != FeatureStatus::Done {
            let unmet: Vec<String> = feature
                .depends_on
                .iter()
                .filter(|dep| {
                    index
                        .get(dep.as_str())
                        .is_some_and(|prerequisite| !prerequisite.is_done())
                })
                .cloned()
                .collect();
            if !unmet.is_empty() {
                let severity = if critical_path.contains(&feature.id) {
                    Severity::High
                } else {
                    Severity::Medium
                };
                causes.push((BlockerKind::Dependency { unmet }, severity));
            }

            if let Some(notes) = &feature.notes {
                if let Some(matched) = pattern_set.match_notes(notes) {
                    causes.push((
                        BlockerKind::External {
                            pattern: matched.pattern,
                        },
                        matched.severity,
                    ));
                }
            }
        }

        if causes.is_empty() {
            continue;
        }

        let impact = match dep_graph.node(&feature.id) {
            Some(node) => compute_impact(dep_graph, node),
            None => continue,
        };
        let days_blocked = idle_days(feature, snapshot);

        for (kind, severity) in causes {
            blockers.push(Blocker {
                feature_id: feature.id.clone(),
                kind,
                severity,
                days_blocked,
                affected_feature_ids: impact.affected_feature_ids.clone(),
                points_blocked: impact.points_blocked,
                milestones_at_risk: impact.milestones_at_risk.clone(),
            });
        }
    }

    rank(&mut blockers);
    debug!(count = blockers.len(), "blocker detection finished");
    Ok(blockers)
}

/// Staleness: in progress, with recorded activity longer ago than the
/// threshold. Features with no activity date at all cannot be measured and
/// are never reported stale.
fn stale_severity(
    feature: &Feature,
    snapshot: &RoadmapSnapshot,
    config: &AnalyticsConfig,
) -> Option<Severity> {
    if feature.status != FeatureStatus::InProgress {
        return None;
    }
    let last_activity = feature.last_activity_date?;
    let days = (snapshot.as_of_date - last_activity).num_days();
    Severity::from_stale_days(days, config)
}

fn idle_days(feature: &Feature, snapshot: &RoadmapSnapshot) -> i64 {
    feature
        .last_activity_date
        .map(|last| (snapshot.as_of_date - last).num_days().max(0))
        .unwrap_or(0)
}

fn rank(blockers: &mut [Blocker]) {
    blockers.sort_by(|a, b| {
        b.severity
            .rank()
            .cmp(&a.severity.rank())
            .then_with(|| {
                b.points_blocked
                    .partial_cmp(&a.points_blocked)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.feature_id.cmp(&b.feature_id))
            .then_with(|| a.kind.name().cmp(b.kind.name()))
    });
}
