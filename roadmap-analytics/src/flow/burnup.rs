//! Milestone burnup series.

use chrono::NaiveDate;

use roadmap_core::model::{FeatureStatus, Milestone, RoadmapSnapshot};
use roadmap_core::types::collections::{FxHashMap, FxHashSet};

use super::types::{BurnupPoint, BurnupSeries};

#[derive(Debug, Clone, Copy, Default)]
struct DayDelta {
    completed: f64,
    scope: f64,
}

/// Build one burnup series per milestone.
///
/// The series runs from the first member transition to the later of the due
/// date and the last member transition. Completed points accumulate and
/// never decrease; total scope grows when members enter the roadmap. The
/// ideal line rises linearly from zero to the final total at the due date.
/// Milestones whose members never appear in the transition log get an empty
/// series.
pub fn generate_burnup(snapshot: &RoadmapSnapshot) -> Vec<BurnupSeries> {
    snapshot
        .milestones
        .iter()
        .map(|milestone| burnup_for(snapshot, milestone))
        .collect()
}

fn burnup_for(snapshot: &RoadmapSnapshot, milestone: &Milestone) -> BurnupSeries {
    let members: FxHashSet<&str> = milestone.feature_ids.iter().map(String::as_str).collect();
    let transitions: Vec<_> = snapshot
        .transitions
        .iter()
        .filter(|t| members.contains(t.feature_id.as_str()))
        .collect();

    let Some(range_start) = transitions.iter().map(|t| t.date).min() else {
        return BurnupSeries {
            milestone_id: milestone.id.clone(),
            due_date: milestone.due_date,
            points: Vec::new(),
        };
    };
    let last_transition = transitions
        .iter()
        .map(|t| t.date)
        .max()
        .unwrap_or(range_start);
    let range_end = last_transition.max(milestone.due_date);

    // Members that never entered through the log are counted as scope from
    // the start of the range.
    let index = snapshot.feature_index();
    let entered: FxHashSet<&str> = transitions
        .iter()
        .filter(|t| t.is_scope_entry())
        .map(|t| t.feature_id.as_str())
        .collect();
    let base: f64 = members
        .iter()
        .filter(|id| !entered.contains(*id))
        .filter_map(|id| index.get(*id))
        .map(|feature| feature.estimated_points)
        .sum();

    let mut by_day: FxHashMap<NaiveDate, DayDelta> = FxHashMap::default();
    let mut scope_sum = 0.0;
    for transition in &transitions {
        let delta = by_day.entry(transition.date).or_default();
        if transition.to == FeatureStatus::Done {
            delta.completed += transition.points;
        }
        if transition.is_scope_entry() {
            delta.scope += transition.points;
            scope_sum += transition.points;
        }
    }
    let final_total = base + scope_sum;
    let due_span = (milestone.due_date - range_start).num_days();

    let mut completed = 0.0;
    let mut total = base;
    let mut points = Vec::new();
    for date in range_start.iter_days().take_while(|day| *day <= range_end) {
        let delta = by_day.get(&date).copied().unwrap_or_default();
        completed += delta.completed;
        total += delta.scope;
        let ideal = if due_span > 0 {
            (final_total * (date - range_start).num_days() as f64 / due_span as f64)
                .min(final_total)
        } else {
            final_total
        };
        points.push(BurnupPoint {
            date,
            completed,
            total,
            ideal,
        });
    }

    BurnupSeries {
        milestone_id: milestone.id.clone(),
        due_date: milestone.due_date,
        points,
    }
}
