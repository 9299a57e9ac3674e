//! Core building blocks for the roadmap analytics engine: the snapshot data
//! model and its validation, configuration, the error taxonomy with stable
//! error codes, shared collection aliases, and tracing setup.

pub mod config;
pub mod errors;
pub mod model;
pub mod telemetry;
pub mod types;

pub use config::{AnalyticsConfig, ExternalPattern, VelocityUnit};
pub use errors::{AnalyticsError, ConfigError, RoadmapErrorCode, SnapshotError};
pub use model::{
    Feature, FeatureStatus, Milestone, RoadmapSnapshot, SprintRecord, StatusTransition,
};
