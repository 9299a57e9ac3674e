//! Historical sprint records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::VelocityUnit;

/// One completed sprint.
/// Stored ascending by `sequence_number` (most recent last); the velocity
/// calculator consumes the history most recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SprintRecord {
    /// Strictly increasing sprint number.
    pub sequence_number: u32,
    /// First day of the sprint.
    pub start_date: NaiveDate,
    /// Last day of the sprint. Always after `start_date`.
    pub end_date: NaiveDate,
    /// Points committed at sprint start.
    pub planned_points: f64,
    /// Points delivered by sprint end.
    pub completed_points: f64,
    /// Items delivered by sprint end; feeds the item-count velocity variant.
    #[serde(default)]
    pub completed_items: u32,
}

impl SprintRecord {
    /// Sprint length in calendar days.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Delivered amount in the configured velocity unit.
    pub fn completed_in(&self, unit: VelocityUnit) -> f64 {
        match unit {
            VelocityUnit::StoryPoints => self.completed_points,
            VelocityUnit::ItemCount => f64::from(self.completed_items),
        }
    }
}
