//! Ranker
//!
//! Orders scenarios by impact, highest first. The sort is stable: input
//! order carries meaning (the "today" list arrives most-recent-first), so
//! equal scores keep their relative order.

use crate::model::Scenario;

/// Rank scenarios by `analysis.impact` descending, stable for ties.
pub fn rank(scenarios: &[Scenario]) -> Vec<Scenario> {
    rank_refs(scenarios).into_iter().cloned().collect()
}

/// Borrowing variant of [`rank`].
pub fn rank_refs(scenarios: &[Scenario]) -> Vec<&Scenario> {
    let mut ranked: Vec<&Scenario> = scenarios.iter().collect();
    ranked.sort_by(|a, b| b.impact().cmp(&a.impact()));
    ranked
}
