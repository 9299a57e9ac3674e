//! Error handling for the roadmap analytics engine.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod analytics_error;
pub mod config_error;
pub mod error_code;
pub mod snapshot_error;

pub use analytics_error::AnalyticsError;
pub use config_error::ConfigError;
pub use error_code::RoadmapErrorCode;
pub use snapshot_error::SnapshotError;
