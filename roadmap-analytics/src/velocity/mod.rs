//! Velocity metrics over the sprint history.
//!
//! The calculator consumes the history most recent first and reports the
//! latest sprint's completion, short and long rolling means, the median and
//! population standard deviation over the long window, a trend direction,
//! and a coefficient-of-variation reliability score.

pub mod stats;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use roadmap_core::config::{AnalyticsConfig, VelocityUnit};
use roadmap_core::errors::AnalyticsError;
use roadmap_core::model::RoadmapSnapshot;

use stats::{median, population_std_dev, rolling_mean};

/// Window width for the long rolling mean, median, and standard deviation.
pub const LONG_WINDOW: usize = 6;
/// Window width for the short rolling mean and for trend comparison.
pub const SHORT_WINDOW: usize = 3;
/// Relative change between trend windows that counts as movement.
const TREND_BAND: f64 = 0.10;

/// Direction the team's velocity is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendDirection {
    /// Recent window mean is more than 10% above the prior window.
    Increasing,
    /// Recent and prior window means are within 10% of each other.
    Stable,
    /// Recent window mean is more than 10% below the prior window.
    Decreasing,
}

impl TrendDirection {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Stable => "stable",
            Self::Decreasing => "decreasing",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Computed velocity metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VelocityMetrics {
    /// Completion of the most recent sprint.
    pub current: f64,
    /// Mean over the 3 most recent sprints.
    pub rolling3: f64,
    /// Mean over the 6 most recent sprints.
    pub rolling6: f64,
    /// Median over the long window.
    pub median: f64,
    /// Population standard deviation over the long window.
    pub std_dev: f64,
    /// Velocity trend over the last six sprints.
    pub trend: TrendDirection,
    /// 0-100 consistency score; 100 means perfectly steady delivery.
    pub reliability: f64,
    /// True when fewer sprints exist than the long window wants.
    pub partial_window: bool,
    /// Number of sprint records consumed.
    pub sample_count: usize,
    /// Unit the series was measured in.
    pub unit: VelocityUnit,
}

impl VelocityMetrics {
    /// Metrics for a team with no recorded sprints. Every figure is zero,
    /// so downstream forecasts read indeterminate rather than inventing
    /// a pace.
    pub fn empty(unit: VelocityUnit) -> Self {
        Self {
            current: 0.0,
            rolling3: 0.0,
            rolling6: 0.0,
            median: 0.0,
            std_dev: 0.0,
            trend: TrendDirection::Stable,
            reliability: 0.0,
            partial_window: true,
            sample_count: 0,
            unit,
        }
    }
}

/// Compute velocity metrics for a snapshot.
///
/// Fails with `InsufficientData` when the sprint history is empty; shorter
/// histories than the rolling windows are served with `partial_window` set.
pub fn compute(
    snapshot: &RoadmapSnapshot,
    config: &AnalyticsConfig,
) -> Result<VelocityMetrics, AnalyticsError> {
    let unit = config.effective_velocity_unit();
    let series: Vec<f64> = snapshot
        .sprint_history
        .iter()
        .rev()
        .map(|sprint| sprint.completed_in(unit))
        .collect();
    from_series(&series, unit)
}

/// Compute velocity metrics from a raw completion series, most recent first.
pub fn from_series(series: &[f64], unit: VelocityUnit) -> Result<VelocityMetrics, AnalyticsError> {
    if series.is_empty() {
        return Err(AnalyticsError::InsufficientData(
            "velocity requires at least one completed sprint".to_string(),
        ));
    }

    let window = &series[..series.len().min(LONG_WINDOW)];
    let rolling6 = rolling_mean(series, LONG_WINDOW);
    let std_dev = population_std_dev(window);
    let metrics = VelocityMetrics {
        current: series[0],
        rolling3: rolling_mean(series, SHORT_WINDOW),
        rolling6,
        median: median(window),
        std_dev,
        trend: trend_direction(series),
        reliability: reliability_score(rolling6, std_dev),
        partial_window: series.len() < LONG_WINDOW,
        sample_count: series.len(),
        unit,
    };
    debug!(
        sprints = metrics.sample_count,
        current = metrics.current,
        rolling3 = metrics.rolling3,
        trend = %metrics.trend,
        "computed velocity metrics"
    );
    Ok(metrics)
}

/// Compare the mean of the 3 most recent sprints against the 3 before them.
/// Histories shorter than both windows read as stable.
fn trend_direction(series: &[f64]) -> TrendDirection {
    if series.len() < SHORT_WINDOW * 2 {
        return TrendDirection::Stable;
    }
    let recent = rolling_mean(series, SHORT_WINDOW);
    let prior = rolling_mean(&series[SHORT_WINDOW..], SHORT_WINDOW);
    if recent > prior * (1.0 + TREND_BAND) {
        TrendDirection::Increasing
    } else if recent < prior * (1.0 - TREND_BAND) {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

/// Coefficient-of-variation score: 100 − (stddev / mean) × 100, clamped to
/// [0, 100]. A window with no mean velocity scores 0.
fn reliability_score(mean: f64, std_dev: f64) -> f64 {
    if mean <= 0.0 || !mean.is_finite() {
        return 0.0;
    }
    (100.0 - (std_dev / mean) * 100.0).clamp(0.0, 100.0)
}
