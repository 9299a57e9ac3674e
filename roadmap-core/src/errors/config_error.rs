//! Configuration errors.

use super::error_code::{self, RoadmapErrorCode};

/// Errors raised when a configuration fails validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Invalid blocker pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl RoadmapErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
