//! The immutable roadmap snapshot and its validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::VelocityUnit;
use crate::errors::SnapshotError;
use crate::types::collections::{FxHashMap, FxHashSet};

use super::{Feature, Milestone, SprintRecord, StatusTransition};

/// A point-in-time capture of a project's planning state.
/// Every analytics component borrows the snapshot immutably; nothing in the
/// engine mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapSnapshot {
    /// The day the snapshot was taken. All staleness and forecast math is
    /// relative to this date, never to wall-clock time.
    pub as_of_date: NaiveDate,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    /// Completed sprints, ascending by sequence number.
    #[serde(default)]
    pub sprint_history: Vec<SprintRecord>,
    /// Per-day status transition log, the flow generator's input.
    #[serde(default)]
    pub transitions: Vec<StatusTransition>,
}

impl RoadmapSnapshot {
    /// Deserialize a snapshot from its JSON exchange form and validate it.
    /// This is the convenience entry for collaborators that hand snapshots
    /// across a process boundary.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| SnapshotError::Malformed {
                message: e.to_string(),
            })?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Serialize the snapshot to its JSON exchange form.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Malformed {
            message: e.to_string(),
        })
    }

    /// Check the snapshot's structural invariants.
    ///
    /// The first violated rule is reported together with the offending ids.
    /// A dangling reference is an error, never silently dropped.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut feature_ids: FxHashSet<&str> = FxHashSet::default();
        for feature in &self.features {
            if !feature_ids.insert(feature.id.as_str()) {
                return Err(SnapshotError::DuplicateFeatureId {
                    id: feature.id.clone(),
                });
            }
        }

        for feature in &self.features {
            if feature.estimated_points < 0.0 {
                return Err(SnapshotError::NegativePoints {
                    feature_id: feature.id.clone(),
                    field: "estimated_points",
                    value: feature.estimated_points,
                });
            }
            if feature.completed_points < 0.0 {
                return Err(SnapshotError::NegativePoints {
                    feature_id: feature.id.clone(),
                    field: "completed_points",
                    value: feature.completed_points,
                });
            }
            if feature.completed_points > feature.estimated_points {
                return Err(SnapshotError::CompletedExceedsEstimated {
                    feature_id: feature.id.clone(),
                    completed: feature.completed_points,
                    estimated: feature.estimated_points,
                });
            }
            for dep in &feature.depends_on {
                if !feature_ids.contains(dep.as_str()) {
                    return Err(SnapshotError::DanglingDependency {
                        feature_id: feature.id.clone(),
                        depends_on: dep.clone(),
                    });
                }
            }
        }

        let mut milestone_ids: FxHashSet<&str> = FxHashSet::default();
        for milestone in &self.milestones {
            if !milestone_ids.insert(milestone.id.as_str()) {
                return Err(SnapshotError::DuplicateMilestoneId {
                    id: milestone.id.clone(),
                });
            }
            for feature_id in &milestone.feature_ids {
                if !feature_ids.contains(feature_id.as_str()) {
                    return Err(SnapshotError::DanglingMilestoneFeature {
                        milestone_id: milestone.id.clone(),
                        feature_id: feature_id.clone(),
                    });
                }
            }
        }

        for transition in &self.transitions {
            if !feature_ids.contains(transition.feature_id.as_str()) {
                return Err(SnapshotError::DanglingTransitionFeature {
                    feature_id: transition.feature_id.clone(),
                    date: transition.date.to_string(),
                });
            }
        }

        let mut sequences: FxHashSet<u32> = FxHashSet::default();
        for sprint in &self.sprint_history {
            if !sequences.insert(sprint.sequence_number) {
                return Err(SnapshotError::DuplicateSprintSequence {
                    sequence: sprint.sequence_number,
                });
            }
            if sprint.end_date <= sprint.start_date {
                return Err(SnapshotError::InvalidSprintWindow {
                    sequence: sprint.sequence_number,
                    start: sprint.start_date.to_string(),
                    end: sprint.end_date.to_string(),
                });
            }
        }
        for pair in self.sprint_history.windows(2) {
            let (earlier, later) = (&pair[0], &pair[1]);
            if later.sequence_number <= earlier.sequence_number {
                return Err(SnapshotError::NonMonotonicSprintSequence {
                    sequence: later.sequence_number,
                    previous: earlier.sequence_number,
                });
            }
            if later.start_date < earlier.end_date {
                return Err(SnapshotError::OverlappingSprints {
                    first: earlier.sequence_number,
                    second: later.sequence_number,
                });
            }
        }

        Ok(())
    }

    /// Id-to-feature lookup map.
    pub fn feature_index(&self) -> FxHashMap<&str, &Feature> {
        self.features
            .iter()
            .map(|feature| (feature.id.as_str(), feature))
            .collect()
    }

    pub fn milestone(&self, id: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == id)
    }

    /// Member features of a milestone, in declaration order.
    /// References the snapshot has already validated resolve; any that do
    /// not are skipped.
    pub fn milestone_features<'a>(&'a self, milestone: &Milestone) -> Vec<&'a Feature> {
        let index = self.feature_index();
        milestone
            .feature_ids
            .iter()
            .filter_map(|id| index.get(id.as_str()).copied())
            .collect()
    }

    /// Total remaining work across the snapshot in the given unit.
    pub fn remaining_total(&self, unit: VelocityUnit) -> f64 {
        self.features.iter().map(|f| f.remaining_weight(unit)).sum()
    }
}
