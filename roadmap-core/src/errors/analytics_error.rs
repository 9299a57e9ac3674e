//! Engine-level errors.

use super::error_code::{self, RoadmapErrorCode};
use super::{ConfigError, SnapshotError};

/// Errors that can occur while computing analytics over a snapshot.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("Invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The requested metric needs history the snapshot does not have.
    /// Velocity over an empty sprint history is the canonical case; the
    /// engine never substitutes a silent zero.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Unknown milestone: {0}")]
    UnknownMilestone(String),
}

impl RoadmapErrorCode for AnalyticsError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Snapshot(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::InsufficientData(_) => error_code::INSUFFICIENT_DATA,
            Self::UnknownMilestone(_) => error_code::ANALYTICS_ERROR,
        }
    }
}
