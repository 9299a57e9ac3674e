//! Configuration for the analytics engine.
//! The engine performs no file I/O; callers construct and pass configs.

pub mod analytics_config;

pub use analytics_config::{
    default_external_patterns, AnalyticsConfig, ExternalPattern, VelocityUnit,
};
