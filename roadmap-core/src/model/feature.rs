//! Features — the unit of roadmap work.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::VelocityUnit;
use chrono::NaiveDate;

/// Lifecycle status of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureStatus {
    /// Scheduled but not started.
    Planned,
    /// Actively being worked.
    InProgress,
    /// Delivered.
    Done,
    /// Explicitly marked blocked.
    Blocked,
}

impl FeatureStatus {
    /// Status name as string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::InProgress => "in-progress",
            Self::Done => "done",
            Self::Blocked => "blocked",
        }
    }
}

impl fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single roadmap feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    /// Unique id within the snapshot.
    pub id: String,
    /// Estimated effort in story points. Never negative.
    pub estimated_points: f64,
    /// Completed effort in story points. Between 0 and `estimated_points`.
    pub completed_points: f64,
    /// Current lifecycle status.
    pub status: FeatureStatus,
    /// Ids of features that must complete before this one.
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// Last day any activity was recorded against this feature.
    #[serde(default)]
    pub last_activity_date: Option<NaiveDate>,
    /// Free-form notes; scanned for external-blocker keywords.
    #[serde(default)]
    pub notes: Option<String>,
}

impl Feature {
    /// Remaining effort in story points, clamped at zero.
    pub fn remaining_points(&self) -> f64 {
        (self.estimated_points - self.completed_points).max(0.0)
    }

    /// Remaining effort in the configured unit.
    /// Under item-count every unfinished feature weighs exactly 1.
    pub fn remaining_weight(&self, unit: VelocityUnit) -> f64 {
        match unit {
            VelocityUnit::StoryPoints => self.remaining_points(),
            VelocityUnit::ItemCount => {
                if self.is_done() {
                    0.0
                } else {
                    1.0
                }
            }
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == FeatureStatus::Done
    }
}
