//! Tests for velocity metrics computed from a snapshot's sprint history.

use chrono::NaiveDate;

use roadmap_analytics::velocity::{self, TrendDirection};
use roadmap_core::config::{AnalyticsConfig, VelocityUnit};
use roadmap_core::errors::{AnalyticsError, RoadmapErrorCode};
use roadmap_core::model::{RoadmapSnapshot, SprintRecord};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// Two-week sprints, back to back, starting 2025-01-06.
fn sprint(sequence: u32, completed_points: f64, completed_items: u32) -> SprintRecord {
    let start = date("2025-01-06") + chrono::Duration::days(i64::from(sequence - 1) * 14);
    SprintRecord {
        sequence_number: sequence,
        start_date: start,
        end_date: start + chrono::Duration::days(14),
        planned_points: completed_points + 2.0,
        completed_points,
        completed_items,
    }
}

fn snapshot_with_history(completed: &[f64]) -> RoadmapSnapshot {
    RoadmapSnapshot {
        as_of_date: date("2025-06-20"),
        features: Vec::new(),
        milestones: Vec::new(),
        sprint_history: completed
            .iter()
            .enumerate()
            .map(|(i, &points)| sprint(i as u32 + 1, points, (points / 5.0) as u32))
            .collect(),
        transitions: Vec::new(),
    }
}

/// Six sprints of steadily growing delivery. The history is stored oldest
/// first; the calculator must read it most recent first.
#[test]
fn test_metrics_over_full_history() {
    let snapshot = snapshot_with_history(&[18.0, 20.0, 22.0, 24.0, 26.0, 28.0]);
    let metrics = velocity::compute(&snapshot, &AnalyticsConfig::default()).unwrap();

    assert_eq!(metrics.current, 28.0);
    assert!((metrics.rolling3 - 26.0).abs() < 1e-9);
    assert!((metrics.rolling6 - 23.0).abs() < 1e-9);
    assert!((metrics.median - 23.0).abs() < 1e-9);
    assert_eq!(metrics.trend, TrendDirection::Increasing);
    assert!(!metrics.partial_window);
    assert_eq!(metrics.sample_count, 6);
    assert_eq!(metrics.unit, VelocityUnit::StoryPoints);
}

/// Fewer sprints than the long window: metrics still come back, flagged.
#[test]
fn test_short_history_sets_partial_window() {
    let snapshot = snapshot_with_history(&[10.0, 14.0]);
    let metrics = velocity::compute(&snapshot, &AnalyticsConfig::default()).unwrap();

    assert_eq!(metrics.current, 14.0);
    assert!((metrics.rolling3 - 12.0).abs() < 1e-9);
    assert!(metrics.partial_window);
    assert_eq!(metrics.sample_count, 2);
    // Too little history to call a direction.
    assert_eq!(metrics.trend, TrendDirection::Stable);
}

/// An empty history is an explicit error, not a zero-velocity team.
#[test]
fn test_empty_history_is_insufficient_data() {
    let snapshot = snapshot_with_history(&[]);
    let err = velocity::compute(&snapshot, &AnalyticsConfig::default()).unwrap_err();
    assert!(matches!(err, AnalyticsError::InsufficientData(_)));
    assert_eq!(err.error_code(), "ROADMAP_INSUFFICIENT_DATA");
}

/// Under item-count the series comes from `completed_items`, and the points
/// columns stop mattering.
#[test]
fn test_item_count_unit_reads_completed_items() {
    let mut snapshot = snapshot_with_history(&[100.0, 100.0, 100.0]);
    snapshot.sprint_history[0].completed_items = 3;
    snapshot.sprint_history[1].completed_items = 4;
    snapshot.sprint_history[2].completed_items = 5;

    let config = AnalyticsConfig {
        velocity_unit: Some(VelocityUnit::ItemCount),
        ..Default::default()
    };
    let metrics = velocity::compute(&snapshot, &config).unwrap();

    assert_eq!(metrics.current, 5.0);
    assert!((metrics.rolling3 - 4.0).abs() < 1e-9);
    assert_eq!(metrics.unit, VelocityUnit::ItemCount);
}

/// A collapse in recent delivery reads as a decreasing trend.
#[test]
fn test_recent_collapse_reads_decreasing() {
    let snapshot = snapshot_with_history(&[30.0, 31.0, 29.0, 15.0, 16.0, 14.0]);
    let metrics = velocity::compute(&snapshot, &AnalyticsConfig::default()).unwrap();
    assert_eq!(metrics.trend, TrendDirection::Decreasing);
}

/// Steady delivery scores near-perfect reliability; erratic delivery does
/// not.
#[test]
fn test_reliability_rewards_consistency() {
    let steady = velocity::compute(
        &snapshot_with_history(&[20.0, 20.0, 20.0, 20.0, 20.0, 20.0]),
        &AnalyticsConfig::default(),
    )
    .unwrap();
    let erratic = velocity::compute(
        &snapshot_with_history(&[5.0, 35.0, 5.0, 35.0, 5.0, 35.0]),
        &AnalyticsConfig::default(),
    )
    .unwrap();

    assert_eq!(steady.reliability, 100.0);
    assert!(erratic.reliability < steady.reliability);
    assert!((0.0..=100.0).contains(&erratic.reliability));
}
