//! Completion forecasting from velocity scenarios.
//!
//! Three named scenarios share one projection: optimistic assumes the
//! current sprint's pace holds, realistic the rolling-3 mean, conservative
//! the rolling-6 mean less one standard deviation (floored). A scenario with
//! no positive velocity refuses a date and reads `indeterminate` instead of
//! producing a past or unbounded one.

pub mod percentiles;

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use roadmap_core::config::AnalyticsConfig;
use roadmap_core::errors::AnalyticsError;
use roadmap_core::model::RoadmapSnapshot;

use crate::velocity::VelocityMetrics;

pub use percentiles::{percentile_forecast, PercentileForecast};

/// A completion estimate: a calendar date, or an explicit refusal when the
/// velocity gives no basis for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "date", rename_all = "kebab-case")]
pub enum Estimate {
    Date(NaiveDate),
    Indeterminate,
}

impl Estimate {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Indeterminate => None,
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Self::Indeterminate)
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{date}"),
            Self::Indeterminate => f.write_str("indeterminate"),
        }
    }
}

/// Forecast scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
    /// Assumes the most recent sprint's velocity.
    Optimistic,
    /// Assumes the rolling-3 mean velocity.
    Realistic,
    /// Assumes the rolling-6 mean minus one standard deviation.
    Conservative,
}

impl Scenario {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Optimistic => "optimistic",
            Self::Realistic => "realistic",
            Self::Conservative => "conservative",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One scenario's projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioForecast {
    pub scenario: Scenario,
    /// Velocity the scenario assumed, per sprint in the configured unit.
    pub velocity: f64,
    /// Whole sprints needed for the remaining work; 0 when already complete
    /// or indeterminate.
    pub sprints_needed: u32,
    pub completion: Estimate,
}

/// The three named forecasts for one scope of work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Milestone the forecast covers, or `None` for the whole snapshot.
    pub milestone_id: Option<String>,
    /// Remaining work in the configured unit.
    pub remaining: f64,
    pub as_of_date: NaiveDate,
    pub optimistic: ScenarioForecast,
    pub realistic: ScenarioForecast,
    pub conservative: ScenarioForecast,
}

impl ForecastResult {
    /// True when nothing remains and all scenarios resolved to the as-of day.
    pub fn is_already_complete(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn scenarios(&self) -> [&ScenarioForecast; 3] {
        [&self.optimistic, &self.realistic, &self.conservative]
    }
}

/// Forecast completion of all remaining work in the snapshot.
pub fn forecast_snapshot(
    snapshot: &RoadmapSnapshot,
    metrics: &VelocityMetrics,
    config: &AnalyticsConfig,
) -> ForecastResult {
    let remaining = snapshot.remaining_total(config.effective_velocity_unit());
    forecast_remaining(remaining, snapshot.as_of_date, metrics, config, None)
}

/// Forecast completion of one milestone's member features.
pub fn forecast_milestone(
    snapshot: &RoadmapSnapshot,
    milestone_id: &str,
    metrics: &VelocityMetrics,
    config: &AnalyticsConfig,
) -> Result<ForecastResult, AnalyticsError> {
    let milestone = snapshot
        .milestone(milestone_id)
        .ok_or_else(|| AnalyticsError::UnknownMilestone(milestone_id.to_string()))?;
    let unit = config.effective_velocity_unit();
    let remaining: f64 = snapshot
        .milestone_features(milestone)
        .iter()
        .map(|f| f.remaining_weight(unit))
        .sum();
    Ok(forecast_remaining(
        remaining,
        snapshot.as_of_date,
        metrics,
        config,
        Some(milestone_id.to_string()),
    ))
}

/// Forecast a known amount of remaining work.
pub fn forecast_remaining(
    remaining: f64,
    as_of_date: NaiveDate,
    metrics: &VelocityMetrics,
    config: &AnalyticsConfig,
    milestone_id: Option<String>,
) -> ForecastResult {
    let sprint_days = config.effective_sprint_calendar_days();
    let result = ForecastResult {
        milestone_id,
        remaining,
        as_of_date,
        optimistic: project(
            Scenario::Optimistic,
            metrics.current,
            remaining,
            as_of_date,
            sprint_days,
        ),
        realistic: project(
            Scenario::Realistic,
            metrics.rolling3,
            remaining,
            as_of_date,
            sprint_days,
        ),
        conservative: project(
            Scenario::Conservative,
            conservative_velocity(metrics, config),
            remaining,
            as_of_date,
            sprint_days,
        ),
    };
    debug!(
        remaining = result.remaining,
        optimistic = %result.optimistic.completion,
        realistic = %result.realistic.completion,
        conservative = %result.conservative.completion,
        "forecast computed"
    );
    result
}

/// Rolling-6 mean minus one standard deviation, floored at the configured
/// minimum. With no observed velocity at all there is nothing to floor and
/// the scenario stays indeterminate.
fn conservative_velocity(metrics: &VelocityMetrics, config: &AnalyticsConfig) -> f64 {
    if metrics.rolling6 <= 0.0 {
        return 0.0;
    }
    (metrics.rolling6 - metrics.std_dev).max(config.effective_conservative_floor())
}

fn project(
    scenario: Scenario,
    velocity: f64,
    remaining: f64,
    as_of_date: NaiveDate,
    sprint_days: f64,
) -> ScenarioForecast {
    if remaining <= 0.0 {
        return ScenarioForecast {
            scenario,
            velocity,
            sprints_needed: 0,
            completion: Estimate::Date(as_of_date),
        };
    }
    if velocity <= 0.0 || !velocity.is_finite() {
        warn!(scenario = %scenario, velocity, "no usable velocity; forecast indeterminate");
        return ScenarioForecast {
            scenario,
            velocity,
            sprints_needed: 0,
            completion: Estimate::Indeterminate,
        };
    }

    let sprints = (remaining / velocity).ceil();
    let days = (sprints * sprint_days).ceil();
    if !sprints.is_finite() || sprints > f64::from(u32::MAX) || !days.is_finite() {
        return ScenarioForecast {
            scenario,
            velocity,
            sprints_needed: 0,
            completion: Estimate::Indeterminate,
        };
    }

    // A date past the calendar range is as good as no date.
    let completion = as_of_date
        .checked_add_signed(Duration::days(days as i64))
        .map(Estimate::Date)
        .unwrap_or(Estimate::Indeterminate);

    ScenarioForecast {
        scenario,
        velocity,
        sprints_needed: sprints as u32,
        completion,
    }
}
