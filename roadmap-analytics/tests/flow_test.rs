//! Tests for the flow generators over one shared transition log.
//!
//! One sprint, one milestone, three features: alpha finishes early, beta
//! enters mid-sprint and finishes late, gamma enters and never starts.

use chrono::NaiveDate;

use roadmap_analytics::flow::{
    generate_burndown, generate_burnup, generate_cfd, FlowStage,
};
use roadmap_core::config::AnalyticsConfig;
use roadmap_core::model::{
    Feature, FeatureStatus, Milestone, RoadmapSnapshot, SprintRecord, StatusTransition,
};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn feature(id: &str, estimated: f64, completed: f64, status: FeatureStatus) -> Feature {
    Feature {
        id: id.to_string(),
        estimated_points: estimated,
        completed_points: completed,
        status,
        depends_on: Vec::new(),
        last_activity_date: None,
        notes: None,
    }
}

fn moved(feature: &str, on: &str, from: FeatureStatus, to: FeatureStatus, points: f64) -> StatusTransition {
    StatusTransition {
        feature_id: feature.to_string(),
        date: date(on),
        from: Some(from),
        to,
        points,
    }
}

fn entered(feature: &str, on: &str, points: f64) -> StatusTransition {
    StatusTransition {
        feature_id: feature.to_string(),
        date: date(on),
        from: None,
        to: FeatureStatus::Planned,
        points,
    }
}

/// Ten-day sprint starting June 2nd with 40 committed points.
fn sample_snapshot() -> RoadmapSnapshot {
    RoadmapSnapshot {
        as_of_date: date("2025-06-14"),
        features: vec![
            feature("alpha", 15.0, 15.0, FeatureStatus::Done),
            feature("beta", 10.0, 10.0, FeatureStatus::Done),
            feature("gamma", 8.0, 0.0, FeatureStatus::Planned),
        ],
        milestones: vec![Milestone {
            id: "launch".to_string(),
            due_date: date("2025-06-12"),
            feature_ids: vec!["alpha".to_string(), "beta".to_string()],
        }],
        sprint_history: vec![SprintRecord {
            sequence_number: 1,
            start_date: date("2025-06-02"),
            end_date: date("2025-06-12"),
            planned_points: 40.0,
            completed_points: 25.0,
            completed_items: 2,
        }],
        transitions: vec![
            // alpha was already on the board before the log begins.
            moved("alpha", "2025-06-03", FeatureStatus::Planned, FeatureStatus::InProgress, 15.0),
            entered("beta", "2025-06-04", 10.0),
            entered("gamma", "2025-06-05", 8.0),
            moved("alpha", "2025-06-06", FeatureStatus::InProgress, FeatureStatus::Done, 15.0),
            moved("beta", "2025-06-07", FeatureStatus::Planned, FeatureStatus::InProgress, 10.0),
            moved("beta", "2025-06-10", FeatureStatus::InProgress, FeatureStatus::Done, 10.0),
        ],
    }
}

// ─── Burndown ───────────────────────────────────────────────────────────────

#[test]
fn test_burndown_follows_the_sprint() {
    let series = generate_burndown(&sample_snapshot());
    assert_eq!(series.len(), 1);
    let sprint = &series[0];
    assert_eq!(sprint.sprint_sequence, 1);
    assert_eq!(sprint.initial_points, 40.0);
    // Ten-day sprint, eleven daily points.
    assert_eq!(sprint.points.len(), 11);

    // The ideal line halves at the midpoint and lands on zero.
    assert_eq!(sprint.points[0].ideal, 40.0);
    assert_eq!(sprint.points[5].ideal, 20.0);
    assert_eq!(sprint.points[10].ideal, 0.0);

    // Scope entering mid-sprint is an explicit delta.
    assert_eq!(sprint.points[2].scope_added, 10.0);
    assert_eq!(sprint.points[3].scope_added, 8.0);

    // 40 committed + 18 added − 25 completed.
    assert_eq!(sprint.points[2].remaining, 50.0);
    assert_eq!(sprint.points[4].remaining, 43.0);
    assert_eq!(sprint.points[10].remaining, 33.0);
}

// ─── Burnup ─────────────────────────────────────────────────────────────────

#[test]
fn test_burnup_tracks_the_milestone() {
    let series = generate_burnup(&sample_snapshot());
    assert_eq!(series.len(), 1);
    let launch = &series[0];
    assert_eq!(launch.milestone_id, "launch");

    // First member transition June 3rd through the June 12th due date.
    assert_eq!(launch.points.len(), 10);
    let first = &launch.points[0];
    assert_eq!(first.date, date("2025-06-03"));
    assert_eq!(first.completed, 0.0);
    // alpha never entered through the log, so it is scope from day one.
    assert_eq!(first.total, 15.0);
    assert_eq!(first.ideal, 0.0);

    // beta's entry grows the total.
    assert_eq!(launch.points[1].total, 25.0);

    // Both members done by June 10th; the ideal line tops out at the total.
    assert_eq!(launch.points[7].completed, 25.0);
    let last = launch.points.last().unwrap();
    assert_eq!(last.date, date("2025-06-12"));
    assert_eq!(last.ideal, 25.0);

    let completed: Vec<f64> = launch.points.iter().map(|p| p.completed).collect();
    assert!(completed.windows(2).all(|w| w[0] <= w[1]));
}

// ─── Cumulative flow ────────────────────────────────────────────────────────

fn counts(chart: &roadmap_analytics::flow::CumulativeFlow, stage: FlowStage) -> Vec<u32> {
    chart
        .stage(stage)
        .unwrap()
        .points
        .iter()
        .map(|p| p.count)
        .collect()
}

#[test]
fn test_cfd_spans_log_through_as_of() {
    let chart = generate_cfd(&sample_snapshot(), &AnalyticsConfig::default());

    // June 3rd through the June 14th as-of day.
    let backlog = counts(&chart, FlowStage::Backlog);
    assert_eq!(backlog.len(), 12);
    // alpha occupied the backlog from the range start; beta and gamma
    // arrive on their entry dates.
    assert_eq!(backlog[..4], [1, 2, 3, 3]);
    assert_eq!(*backlog.last().unwrap(), 3);

    let in_progress = counts(&chart, FlowStage::InProgress);
    assert_eq!(in_progress[0], 1);
    assert_eq!(*in_progress.last().unwrap(), 2);

    let done = counts(&chart, FlowStage::Done);
    assert_eq!(done[2], 0);
    assert_eq!(done[3], 1);
    assert_eq!(*done.last().unwrap(), 2);

    // Stage dominance: a later stage never outruns an earlier one.
    for day in 0..backlog.len() {
        assert!(backlog[day] >= in_progress[day]);
        assert!(in_progress[day] >= done[day]);
    }
    assert!(chart.bottlenecks.is_empty());
}

/// Twelve arrivals against a single start: the backlog gap more than
/// doubles over the trailing window and gets flagged.
#[test]
fn test_backlog_pileup_flags_bottleneck() {
    let mut transitions: Vec<StatusTransition> = (1..=12)
        .map(|day| entered(&format!("f{day}"), &format!("2025-06-{day:02}"), 3.0))
        .collect();
    transitions.push(moved(
        "f1",
        "2025-06-02",
        FeatureStatus::Planned,
        FeatureStatus::InProgress,
        3.0,
    ));
    let snapshot = RoadmapSnapshot {
        as_of_date: date("2025-06-12"),
        features: Vec::new(),
        milestones: Vec::new(),
        sprint_history: Vec::new(),
        transitions,
    };

    let chart = generate_cfd(&snapshot, &AnalyticsConfig::default());
    assert_eq!(chart.bottlenecks.len(), 1);
    let flag = chart.bottlenecks[0];
    assert_eq!(flag.stage, FlowStage::Backlog);
    assert_eq!(flag.previous_gap, 6);
    assert_eq!(flag.current_gap, 11);
    assert_eq!(flag.window_days, 5);
}

/// A tighter window and ratio make the same log flag earlier.
#[test]
fn test_bottleneck_settings_come_from_config() {
    let transitions: Vec<StatusTransition> = (1..=6)
        .map(|day| entered(&format!("f{day}"), &format!("2025-06-{day:02}"), 1.0))
        .collect();
    let snapshot = RoadmapSnapshot {
        as_of_date: date("2025-06-06"),
        features: Vec::new(),
        milestones: Vec::new(),
        sprint_history: Vec::new(),
        transitions,
    };

    // Default window of 5 over a six-day range: gap 1 → 6, ratio 0.2
    // trips at anything past 1.2.
    let chart = generate_cfd(&snapshot, &AnalyticsConfig::default());
    assert_eq!(chart.bottlenecks.len(), 1);

    // An impossible ratio silences the same log.
    let lenient = AnalyticsConfig {
        bottleneck_ratio: Some(10.0),
        ..Default::default()
    };
    let chart = generate_cfd(&snapshot, &lenient);
    assert!(chart.bottlenecks.is_empty());
}
