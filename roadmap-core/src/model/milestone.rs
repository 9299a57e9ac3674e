//! Milestones — dated groupings of features.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A milestone with a due date and member features.
/// Completion percentage and forecast date are computed outputs, never
/// stored on the milestone itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    /// Unique id within the snapshot.
    pub id: String,
    /// Target delivery date.
    pub due_date: NaiveDate,
    /// Ids of the features that make up this milestone.
    #[serde(default)]
    pub feature_ids: Vec<String>,
}
