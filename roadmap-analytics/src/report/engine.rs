//! Top-level analytics engine orchestrator.
//!
//! Runs every analysis over one validated snapshot and assembles the full
//! report. Graph analysis and flow series are independent of each other
//! and run on both sides of a rayon join.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use roadmap_core::config::AnalyticsConfig;
use roadmap_core::errors::AnalyticsError;
use roadmap_core::model::RoadmapSnapshot;

use crate::blockers::{self, Blocker, Severity};
use crate::critical_path::{self, CriticalPath};
use crate::flow::{self, BurndownSeries, BurnupSeries, CumulativeFlow};
use crate::forecast::{self, Estimate, ForecastResult, PercentileForecast};
use crate::graph::{self, GraphStats, GraphWarning};
use crate::velocity::{self, VelocityMetrics};

/// The analytics engine.
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
}

impl AnalyticsEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    /// Create an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(AnalyticsConfig::default())
    }

    /// Run every analysis and assemble the full report.
    ///
    /// Fails only on a malformed snapshot or configuration. Conditions the
    /// analyses can work around, cycles and missing history among them,
    /// degrade the affected sections and the rest of the report comes out.
    pub fn run(&self, snapshot: &RoadmapSnapshot) -> Result<RoadmapReport, AnalyticsError> {
        // Phase 1: reject malformed input before any analysis runs.
        self.config.validate()?;
        snapshot.validate()?;

        // Phase 2: velocity. An empty history is degraded, not fatal.
        let velocity = match velocity::compute(snapshot, &self.config) {
            Ok(metrics) => Some(metrics),
            Err(AnalyticsError::InsufficientData(reason)) => {
                warn!(reason, "no sprint history; velocity omitted from report");
                None
            }
            Err(other) => return Err(other),
        };
        let metrics = velocity.clone().unwrap_or_else(|| {
            VelocityMetrics::empty(self.config.effective_velocity_unit())
        });
        let daily_velocity = metrics.rolling3 / self.config.effective_sprint_calendar_days();

        // Phase 3: graph analysis and flow series, side by side.
        let (graph_outcome, (burndown, burnup, cumulative_flow)) = rayon::join(
            || {
                let dep_graph = graph::build(snapshot, &self.config);
                let critical_path = critical_path::analyze(&dep_graph, daily_velocity);
                let blockers =
                    blockers::detect(snapshot, &dep_graph, &critical_path, &self.config)?;
                Ok::<_, AnalyticsError>((dep_graph, critical_path, blockers))
            },
            || {
                (
                    flow::generate_burndown(snapshot),
                    flow::generate_burnup(snapshot),
                    flow::generate_cfd(snapshot, &self.config),
                )
            },
        );
        let (dep_graph, critical_path, blockers) = graph_outcome?;

        // Phase 4: forecasts for the whole snapshot and per milestone.
        let forecast = forecast::forecast_snapshot(snapshot, &metrics, &self.config);
        let percentile_forecast = forecast::percentile_forecast(
            forecast.remaining,
            snapshot.as_of_date,
            &metrics,
            &self.config,
        );
        let milestone_forecasts: Vec<ForecastResult> = snapshot
            .milestones
            .iter()
            .map(|m| forecast::forecast_milestone(snapshot, &m.id, &metrics, &self.config))
            .collect::<Result<_, _>>()?;

        // Phase 5: milestone progress from the same forecasts.
        let milestone_progress = Self::milestone_progress(snapshot, &milestone_forecasts);

        // Phase 6: diagnostics summary.
        let diagnostics = Self::compute_diagnostics(
            snapshot,
            &critical_path,
            &dep_graph.warnings,
            &blockers,
            velocity.is_some(),
        );
        debug!(%diagnostics, "analytics report assembled");

        Ok(RoadmapReport {
            as_of_date: snapshot.as_of_date,
            velocity,
            forecast,
            percentile_forecast,
            milestone_forecasts,
            critical_path,
            graph_warnings: dep_graph.warnings.clone(),
            graph_stats: dep_graph.stats(),
            blockers,
            burndown,
            burnup,
            cumulative_flow,
            milestone_progress,
            diagnostics,
        })
    }

    fn milestone_progress(
        snapshot: &RoadmapSnapshot,
        forecasts: &[ForecastResult],
    ) -> Vec<MilestoneProgress> {
        snapshot
            .milestones
            .iter()
            .zip(forecasts)
            .map(|(milestone, forecast)| {
                let members = snapshot.milestone_features(milestone);
                let total_points: f64 = members.iter().map(|f| f.estimated_points).sum();
                let completed_points: f64 = members.iter().map(|f| f.completed_points).sum();
                let features_done = members.iter().filter(|f| f.is_done()).count();
                let completion_percent = if total_points > 0.0 {
                    (completed_points / total_points * 100.0).clamp(0.0, 100.0)
                } else if !members.is_empty() && features_done == members.len() {
                    100.0
                } else {
                    0.0
                };
                let projected_completion = forecast.realistic.completion;
                let due_at_risk = match projected_completion {
                    Estimate::Date(date) => date > milestone.due_date,
                    Estimate::Indeterminate => forecast.remaining > 0.0,
                };
                MilestoneProgress {
                    milestone_id: milestone.id.clone(),
                    due_date: milestone.due_date,
                    total_points,
                    completed_points,
                    completion_percent,
                    features_total: members.len(),
                    features_done,
                    projected_completion,
                    due_at_risk,
                }
            })
            .collect()
    }

    fn compute_diagnostics(
        snapshot: &RoadmapSnapshot,
        critical_path: &CriticalPath,
        warnings: &[GraphWarning],
        blockers: &[Blocker],
        velocity_available: bool,
    ) -> ReportDiagnostics {
        ReportDiagnostics {
            feature_count: snapshot.features.len(),
            milestone_count: snapshot.milestones.len(),
            sprint_count: snapshot.sprint_history.len(),
            transition_count: snapshot.transitions.len(),
            cycle_count: warnings.len(),
            excluded_node_count: critical_path.excluded.len(),
            blocker_count: blockers.len(),
            critical_blocker_count: blockers
                .iter()
                .filter(|b| b.severity == Severity::Critical)
                .count(),
            critical_path_length: critical_path.nodes.len(),
            velocity_available,
        }
    }
}

/// Everything the engine computes for one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapReport {
    pub as_of_date: NaiveDate,
    /// `None` when the snapshot has no sprint history.
    pub velocity: Option<VelocityMetrics>,
    /// Scenario forecasts for all remaining work.
    pub forecast: ForecastResult,
    pub percentile_forecast: PercentileForecast,
    /// One forecast per milestone, in snapshot order.
    pub milestone_forecasts: Vec<ForecastResult>,
    pub critical_path: CriticalPath,
    /// Dependency cycles found while building the graph.
    pub graph_warnings: Vec<GraphWarning>,
    pub graph_stats: GraphStats,
    /// Ranked blockers, most pressing first.
    pub blockers: Vec<Blocker>,
    pub burndown: Vec<BurndownSeries>,
    pub burnup: Vec<BurnupSeries>,
    pub cumulative_flow: CumulativeFlow,
    pub milestone_progress: Vec<MilestoneProgress>,
    pub diagnostics: ReportDiagnostics,
}

/// Per-milestone state of play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneProgress {
    pub milestone_id: String,
    pub due_date: NaiveDate,
    pub total_points: f64,
    pub completed_points: f64,
    /// 0-100, by points.
    pub completion_percent: f64,
    pub features_total: usize,
    pub features_done: usize,
    /// Realistic-scenario completion for the remaining members.
    pub projected_completion: Estimate,
    /// The realistic projection lands after the due date, or cannot be made
    /// while work remains.
    pub due_at_risk: bool,
}

/// Counts summarizing one engine run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDiagnostics {
    pub feature_count: usize,
    pub milestone_count: usize,
    pub sprint_count: usize,
    pub transition_count: usize,
    pub cycle_count: usize,
    /// Nodes excluded from the critical path because they sit on a cycle.
    pub excluded_node_count: usize,
    pub blocker_count: usize,
    pub critical_blocker_count: usize,
    pub critical_path_length: usize,
    pub velocity_available: bool,
}

impl fmt::Display for ReportDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ReportDiagnostics {{ features={}, milestones={}, sprints={}, cycles={}, blockers={} ({} critical), path_len={}, velocity={} }}",
            self.feature_count,
            self.milestone_count,
            self.sprint_count,
            self.cycle_count,
            self.blocker_count,
            self.critical_blocker_count,
            self.critical_path_length,
            self.velocity_available,
        )
    }
}
