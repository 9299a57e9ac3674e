//! Flow series types shared by the burndown, burnup, and CFD generators.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use roadmap_core::model::FeatureStatus;

/// Workflow stage tracked by the cumulative flow diagram.
///
/// Ordering is pipeline order: work passes Backlog, then InProgress, then
/// Done. Blocked features still occupy the InProgress stage; blocked work
/// is work in progress that is not moving.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum FlowStage {
    Backlog,
    InProgress,
    Done,
}

impl FlowStage {
    /// All stages in pipeline order.
    pub const ALL: [FlowStage; 3] = [FlowStage::Backlog, FlowStage::InProgress, FlowStage::Done];

    /// The stage work moves to next, if any.
    pub fn next(self) -> Option<FlowStage> {
        match self {
            FlowStage::Backlog => Some(FlowStage::InProgress),
            FlowStage::InProgress => Some(FlowStage::Done),
            FlowStage::Done => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FlowStage::Backlog => "backlog",
            FlowStage::InProgress => "in-progress",
            FlowStage::Done => "done",
        }
    }
}

impl std::fmt::Display for FlowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<FeatureStatus> for FlowStage {
    fn from(status: FeatureStatus) -> Self {
        match status {
            FeatureStatus::Planned => FlowStage::Backlog,
            FeatureStatus::InProgress | FeatureStatus::Blocked => FlowStage::InProgress,
            FeatureStatus::Done => FlowStage::Done,
        }
    }
}

/// One day on a sprint burndown chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurndownPoint {
    pub date: NaiveDate,
    /// Outstanding points at end of day, scope changes included.
    pub remaining: f64,
    /// Linear reference line from the day-zero total down to zero.
    pub ideal: f64,
    /// Points added to the sprint on this day, zero on most days.
    pub scope_added: f64,
}

/// Burndown series for one sprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurndownSeries {
    pub sprint_sequence: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Committed scope at sprint start.
    pub initial_points: f64,
    pub points: Vec<BurndownPoint>,
}

/// One day on a milestone burnup chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnupPoint {
    pub date: NaiveDate,
    /// Cumulative completed points, never decreasing.
    pub completed: f64,
    /// Known scope at end of day, grows as scope is added.
    pub total: f64,
    /// Linear reference line from zero to the final total at the due date.
    pub ideal: f64,
}

/// Burnup series for one milestone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnupSeries {
    pub milestone_id: String,
    pub due_date: NaiveDate,
    pub points: Vec<BurnupPoint>,
}

/// One day of one stage band on the cumulative flow diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfdPoint {
    pub date: NaiveDate,
    /// Items that have reached or passed the stage by this day.
    pub count: u32,
}

/// Cumulative count series for one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfdSeries {
    pub stage: FlowStage,
    pub points: Vec<CfdPoint>,
}

/// A stage whose lead over the next stage grew past the configured ratio
/// across the trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bottleneck {
    pub stage: FlowStage,
    /// Gap to the next stage at the window start.
    pub previous_gap: u32,
    /// Gap to the next stage on the final day.
    pub current_gap: u32,
    pub window_days: u32,
}

/// Cumulative flow diagram: one series per stage plus any flagged
/// bottlenecks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativeFlow {
    pub stages: Vec<CfdSeries>,
    pub bottlenecks: Vec<Bottleneck>,
}

impl CumulativeFlow {
    /// The series for one stage, if present.
    pub fn stage(&self, stage: FlowStage) -> Option<&CfdSeries> {
        self.stages.iter().find(|series| series.stage == stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_follows_pipeline() {
        assert!(FlowStage::Backlog < FlowStage::InProgress);
        assert!(FlowStage::InProgress < FlowStage::Done);
        assert_eq!(FlowStage::Backlog.next(), Some(FlowStage::InProgress));
        assert_eq!(FlowStage::Done.next(), None);
    }

    #[test]
    fn test_blocked_maps_to_in_progress() {
        assert_eq!(FlowStage::from(FeatureStatus::Blocked), FlowStage::InProgress);
        assert_eq!(FlowStage::from(FeatureStatus::Planned), FlowStage::Backlog);
        assert_eq!(FlowStage::from(FeatureStatus::Done), FlowStage::Done);
    }
}
