//! Cumulative flow diagram.
//!
//! For every stage the series counts items that have reached or passed it,
//! computed from each item's maximum stage so far. That makes every series
//! monotonically non-decreasing by construction.

use chrono::NaiveDate;
use tracing::debug;

use roadmap_core::config::AnalyticsConfig;
use roadmap_core::model::{RoadmapSnapshot, StatusTransition};
use roadmap_core::types::collections::FxHashMap;

use super::types::{Bottleneck, CfdPoint, CfdSeries, CumulativeFlow, FlowStage};

/// Build the cumulative flow diagram from the transition log.
///
/// The chart spans the first logged transition through the later of the
/// last transition and the as-of date. Items first seen mid-flight (their
/// earliest transition names a prior status) are counted in that prior
/// stage from the start of the range; items that entered through the log
/// only exist from their entry date.
pub fn generate_cfd(snapshot: &RoadmapSnapshot, config: &AnalyticsConfig) -> CumulativeFlow {
    let empty = || CumulativeFlow {
        stages: FlowStage::ALL
            .iter()
            .map(|stage| CfdSeries {
                stage: *stage,
                points: Vec::new(),
            })
            .collect(),
        bottlenecks: Vec::new(),
    };

    let Some(range_start) = snapshot.transitions.iter().map(|t| t.date).min() else {
        return empty();
    };
    let last_transition = snapshot
        .transitions
        .iter()
        .map(|t| t.date)
        .max()
        .unwrap_or(range_start);
    let range_end = last_transition.max(snapshot.as_of_date);

    // Earliest date each feature reaches each stage.
    let mut by_feature: FxHashMap<&str, Vec<&StatusTransition>> = FxHashMap::default();
    for transition in &snapshot.transitions {
        by_feature
            .entry(transition.feature_id.as_str())
            .or_default()
            .push(transition);
    }
    let mut reach_dates: [Vec<NaiveDate>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for transitions in by_feature.values() {
        let mut reached: [Option<NaiveDate>; 3] = [None, None, None];
        let mut record = |date: NaiveDate, stage: FlowStage| {
            for (idx, slot) in reached.iter_mut().enumerate() {
                if idx <= stage as usize {
                    *slot = Some(slot.map_or(date, |d| d.min(date)));
                }
            }
        };
        if let Some(first) = transitions.iter().min_by_key(|t| t.date) {
            if let Some(prior) = first.from {
                record(range_start, FlowStage::from(prior));
            }
        }
        for transition in transitions {
            record(transition.date, FlowStage::from(transition.to));
        }
        for (idx, slot) in reached.iter().enumerate() {
            if let Some(date) = slot {
                reach_dates[idx].push(*date);
            }
        }
    }
    for dates in &mut reach_dates {
        dates.sort_unstable();
    }

    let days: Vec<NaiveDate> = range_start
        .iter_days()
        .take_while(|day| *day <= range_end)
        .collect();
    let stages: Vec<CfdSeries> = FlowStage::ALL
        .iter()
        .enumerate()
        .map(|(idx, stage)| {
            let dates = &reach_dates[idx];
            let mut cursor = 0usize;
            let points = days
                .iter()
                .map(|day| {
                    while cursor < dates.len() && dates[cursor] <= *day {
                        cursor += 1;
                    }
                    CfdPoint {
                        date: *day,
                        count: cursor as u32,
                    }
                })
                .collect();
            CfdSeries {
                stage: *stage,
                points,
            }
        })
        .collect();

    let bottlenecks = detect_bottlenecks(&stages, config);
    if !bottlenecks.is_empty() {
        debug!(count = bottlenecks.len(), "cumulative flow bottlenecks flagged");
    }
    CumulativeFlow {
        stages,
        bottlenecks,
    }
}

/// Flag stages whose gap to the next stage widened past the configured
/// ratio across the trailing window. A gap that was zero at the window
/// start is flagged on any growth at all. Ranges shorter than the window
/// are never flagged.
fn detect_bottlenecks(stages: &[CfdSeries], config: &AnalyticsConfig) -> Vec<Bottleneck> {
    let window = config.effective_bottleneck_window_days();
    let ratio = config.effective_bottleneck_ratio();
    let mut flags = Vec::new();

    let Some(first) = stages.first() else {
        return flags;
    };
    let len = first.points.len();
    if len <= window as usize {
        return flags;
    }
    let now = len - 1;
    let before = now - window as usize;

    for series in stages {
        let Some(next_stage) = series.stage.next() else {
            continue;
        };
        let Some(next_series) = stages.iter().find(|s| s.stage == next_stage) else {
            continue;
        };
        let current_gap = series.points[now]
            .count
            .saturating_sub(next_series.points[now].count);
        let previous_gap = series.points[before]
            .count
            .saturating_sub(next_series.points[before].count);
        let widened = if previous_gap == 0 {
            current_gap > 0
        } else {
            f64::from(current_gap) > f64::from(previous_gap) * (1.0 + ratio)
        };
        if widened {
            flags.push(Bottleneck {
                stage: series.stage,
                previous_gap,
                current_gap,
                window_days: window,
            });
        }
    }
    flags
}
