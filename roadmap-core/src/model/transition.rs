//! Status transition log entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::FeatureStatus;

/// One status change recorded against a feature on a given day.
/// The flow generator derives burndown, burnup, and cumulative-flow series
/// from this log; the engine itself never writes to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusTransition {
    /// Feature the change applies to.
    pub feature_id: String,
    /// Day the change took effect.
    pub date: NaiveDate,
    /// Status before the change. `None` means the feature entered tracking
    /// on this day, i.e. a scope addition.
    #[serde(default)]
    pub from: Option<FeatureStatus>,
    /// Status after the change.
    pub to: FeatureStatus,
    /// The feature's estimated points at transition time.
    pub points: f64,
}

impl StatusTransition {
    /// True when this entry added the feature to tracked scope.
    pub fn is_scope_entry(&self) -> bool {
        self.from.is_none()
    }
}
