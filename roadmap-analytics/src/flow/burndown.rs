//! Sprint burndown series.

use roadmap_core::model::{FeatureStatus, RoadmapSnapshot, SprintRecord};
use roadmap_core::types::collections::FxHashMap;

use super::types::{BurndownPoint, BurndownSeries};

#[derive(Debug, Clone, Copy, Default)]
struct DayDelta {
    completed: f64,
    scope_added: f64,
}

/// Build one burndown series per recorded sprint.
///
/// Each day carries the outstanding points at end of day, the ideal linear
/// reference from the committed total down to zero, and any scope added
/// that day. Scope entering after sprint start raises the remaining line
/// and is reported as an explicit delta rather than folded in silently.
pub fn generate_burndown(snapshot: &RoadmapSnapshot) -> Vec<BurndownSeries> {
    snapshot
        .sprint_history
        .iter()
        .filter_map(|sprint| burndown_for(snapshot, sprint))
        .collect()
}

fn burndown_for(snapshot: &RoadmapSnapshot, sprint: &SprintRecord) -> Option<BurndownSeries> {
    let duration = sprint.duration_days();
    if duration <= 0 {
        return None;
    }
    let initial = sprint.planned_points.max(0.0);

    // Bucket the transition log by day once, then walk the sprint window.
    let mut by_day: FxHashMap<chrono::NaiveDate, DayDelta> = FxHashMap::default();
    for transition in &snapshot.transitions {
        if transition.date < sprint.start_date || transition.date > sprint.end_date {
            continue;
        }
        let delta = by_day.entry(transition.date).or_default();
        if transition.to == FeatureStatus::Done {
            delta.completed += transition.points;
        }
        // Entries dated on the start day are assumed to already be part of
        // the committed total.
        if transition.is_scope_entry() && transition.date > sprint.start_date {
            delta.scope_added += transition.points;
        }
    }

    let mut completed = 0.0;
    let mut scope_total = 0.0;
    let mut points = Vec::with_capacity(duration as usize + 1);
    for (offset, date) in sprint
        .start_date
        .iter_days()
        .take_while(|day| *day <= sprint.end_date)
        .enumerate()
    {
        let delta = by_day.get(&date).copied().unwrap_or_default();
        completed += delta.completed;
        scope_total += delta.scope_added;
        points.push(BurndownPoint {
            date,
            remaining: (initial + scope_total - completed).max(0.0),
            ideal: initial * (1.0 - offset as f64 / duration as f64),
            scope_added: delta.scope_added,
        });
    }

    Some(BurndownSeries {
        sprint_sequence: sprint.sequence_number,
        start_date: sprint.start_date,
        end_date: sprint.end_date,
        initial_points: initial,
        points,
    })
}
