//! Stable error codes surfaced at the API boundary.

/// Trait for mapping errors to stable string codes.
/// Codes are part of the public contract and must not change between releases.
pub trait RoadmapErrorCode {
    /// Returns the stable error code for this error.
    fn error_code(&self) -> &'static str;
}

pub const SNAPSHOT_ERROR: &str = "ROADMAP_SNAPSHOT_ERROR";
pub const CONFIG_ERROR: &str = "ROADMAP_CONFIG_ERROR";
pub const INSUFFICIENT_DATA: &str = "ROADMAP_INSUFFICIENT_DATA";
pub const ANALYTICS_ERROR: &str = "ROADMAP_ANALYTICS_ERROR";
