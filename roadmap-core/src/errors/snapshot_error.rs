//! Snapshot validation errors.

use super::error_code::{self, RoadmapErrorCode};

/// Errors raised when a snapshot violates its structural invariants.
/// Validation reports the first violation together with the offending ids;
/// a malformed snapshot is never silently repaired.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Malformed snapshot JSON: {message}")]
    Malformed { message: String },

    #[error("Duplicate feature id: {id}")]
    DuplicateFeatureId { id: String },

    #[error("Duplicate milestone id: {id}")]
    DuplicateMilestoneId { id: String },

    #[error("Duplicate sprint sequence number: {sequence}")]
    DuplicateSprintSequence { sequence: u32 },

    #[error("Feature {feature_id} depends on unknown feature {depends_on}")]
    DanglingDependency {
        feature_id: String,
        depends_on: String,
    },

    #[error("Milestone {milestone_id} references unknown feature {feature_id}")]
    DanglingMilestoneFeature {
        milestone_id: String,
        feature_id: String,
    },

    #[error("Transition on {date} references unknown feature {feature_id}")]
    DanglingTransitionFeature { feature_id: String, date: String },

    #[error("Feature {feature_id}: {field} is negative ({value})")]
    NegativePoints {
        feature_id: String,
        field: &'static str,
        value: f64,
    },

    #[error(
        "Feature {feature_id}: completed points ({completed}) exceed estimated points ({estimated})"
    )]
    CompletedExceedsEstimated {
        feature_id: String,
        completed: f64,
        estimated: f64,
    },

    #[error("Sprint {sequence}: end date {end} is not after start date {start}")]
    InvalidSprintWindow {
        sequence: u32,
        start: String,
        end: String,
    },

    #[error("Sprint {sequence} follows sprint {previous}: sequence numbers must increase")]
    NonMonotonicSprintSequence { sequence: u32, previous: u32 },

    #[error("Sprint {second} overlaps sprint {first}")]
    OverlappingSprints { first: u32, second: u32 },
}

impl RoadmapErrorCode for SnapshotError {
    fn error_code(&self) -> &'static str {
        error_code::SNAPSHOT_ERROR
    }
}
