//! Percentile completion forecasts from a Normal velocity model.
//!
//! Per-sprint velocity is modelled as Normal(rolling-3 mean, stddev) and
//! completion-day percentiles come from the inverse CDF: the 10th percentile
//! of days corresponds to the 90th percentile of velocity. Closed-form
//! quantiles keep the result deterministic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use roadmap_core::config::AnalyticsConfig;

use crate::velocity::VelocityMetrics;

use super::{project, Estimate, Scenario};

/// Completion-day percentiles. P10 is the fast case, P90 the slow one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PercentileForecast {
    /// Only a 10% chance of finishing sooner than this.
    pub p10: Estimate,
    /// The median outcome.
    pub p50: Estimate,
    /// A 90% chance of finishing by this date.
    pub p90: Estimate,
}

impl PercentileForecast {
    /// Percentiles must not cross: either all three are dates in order, or
    /// all three are indeterminate.
    pub fn is_valid(&self) -> bool {
        match (self.p10.date(), self.p50.date(), self.p90.date()) {
            (Some(p10), Some(p50), Some(p90)) => p10 <= p50 && p50 <= p90,
            (None, None, None) => true,
            _ => false,
        }
    }

    fn all(estimate: Estimate) -> Self {
        Self {
            p10: estimate,
            p50: estimate,
            p90: estimate,
        }
    }
}

/// Compute completion-day percentiles for a known amount of remaining work.
///
/// Falls back to the plain realistic projection when the velocity history
/// has no spread, and to indeterminate when it has no positive mean.
pub fn percentile_forecast(
    remaining: f64,
    as_of_date: NaiveDate,
    metrics: &VelocityMetrics,
    config: &AnalyticsConfig,
) -> PercentileForecast {
    if remaining <= 0.0 {
        return PercentileForecast::all(Estimate::Date(as_of_date));
    }

    let mean = metrics.rolling3;
    let std_dev = metrics.std_dev;
    if mean <= 0.0 || !mean.is_finite() {
        return PercentileForecast::all(Estimate::Indeterminate);
    }

    let sprint_days = config.effective_sprint_calendar_days();
    let floor = config.effective_conservative_floor();
    let completion_at = |velocity: f64| {
        project(
            Scenario::Realistic,
            velocity.max(floor),
            remaining,
            as_of_date,
            sprint_days,
        )
        .completion
    };

    if std_dev <= 0.0 || !std_dev.is_finite() {
        // Perfectly steady history: every percentile lands on the same day.
        return PercentileForecast::all(completion_at(mean));
    }

    match Normal::new(mean, std_dev) {
        Ok(dist) => PercentileForecast {
            p10: completion_at(dist.inverse_cdf(0.90)),
            p50: completion_at(dist.inverse_cdf(0.50)),
            p90: completion_at(dist.inverse_cdf(0.10)),
        },
        Err(_) => PercentileForecast::all(completion_at(mean)),
    }
}
