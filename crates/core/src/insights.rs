//! Insight Aggregator
//!
//! Cross-scenario rollup: average impact, merged risks, every user story
//! and one recommendation line per scenario. Works on any number of
//! scenarios, including none.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{Scenario, UserStory};
use crate::ranking::rank;

/// Maximum number of merged risks in a rollup.
pub const MAX_ROLLUP_RISKS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRollup {
    pub scenario_count: usize,
    /// Rounded mean impact; 0 when there are no scenarios
    pub average_impact: u8,
    pub ranked_scenarios: Vec<Scenario>,
    /// De-duplicated, first occurrence wins, at most [`MAX_ROLLUP_RISKS`]
    pub risks: Vec<String>,
    /// Every story across scenarios in ranked order; never truncated
    pub user_stories: Vec<UserStory>,
    pub recommendations: Vec<ScenarioRecommendation>,
}

impl InsightRollup {
    pub fn is_empty(&self) -> bool {
        self.scenario_count == 0
    }
}

/// Recommendation line for one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRecommendation {
    pub scenario_id: String,
    pub scenario_name: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opportunity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
}

impl ScenarioRecommendation {
    /// Recommendation for a scenario, or `None` when it has nothing to say.
    ///
    /// Falls back from the recommendation text to the strategic framing and
    /// then to the lifecycle value proposition.
    pub fn for_scenario(scenario: &Scenario) -> Option<Self> {
        let analysis = &scenario.analysis;
        let lifecycle = analysis.lifecycle.as_ref();
        let recommendation = Some(analysis.recommendation.clone())
            .filter(|r| !r.trim().is_empty())
            .or_else(|| {
                analysis
                    .strategic_framing
                    .clone()
                    .filter(|f| !f.trim().is_empty())
            })
            .or_else(|| lifecycle.and_then(|l| l.value_proposition()))?;

        Some(Self {
            scenario_id: scenario.id.clone(),
            scenario_name: scenario.display_name().to_string(),
            recommendation,
            opportunity: lifecycle.and_then(|l| l.opportunity_analysis()),
            problem: lifecycle.and_then(|l| l.problem_summary()),
        })
    }
}

/// Build the rollup for `scenarios`.
pub fn aggregate(scenarios: &[Scenario]) -> InsightRollup {
    let ranked = rank(scenarios);

    InsightRollup {
        scenario_count: scenarios.len(),
        average_impact: average_impact(scenarios),
        risks: merged_risks(scenarios),
        user_stories: ranked
            .iter()
            .flat_map(|s| s.analysis.stories_or_opportunities())
            .collect(),
        recommendations: ranked
            .iter()
            .filter_map(ScenarioRecommendation::for_scenario)
            .collect(),
        ranked_scenarios: ranked,
    }
}

/// Rounded mean impact, 0 for no input.
pub fn average_impact(scenarios: &[Scenario]) -> u8 {
    if scenarios.is_empty() {
        return 0;
    }
    let total: u32 = scenarios.iter().map(|s| u32::from(s.impact())).sum();
    let mean = f64::from(total) / scenarios.len() as f64;
    mean.round().clamp(0.0, 100.0) as u8
}

/// Risks then relabelled feasibility constraints, per scenario in input
/// order, de-duplicated and capped.
fn merged_risks(scenarios: &[Scenario]) -> Vec<String> {
    let mut seen = HashSet::new();
    scenarios
        .iter()
        .flat_map(|s| {
            let constraints = s
                .analysis
                .feasibility_constraints()
                .into_iter()
                .map(|c| format!("Risk: {c}"));
            s.analysis.risks.iter().cloned().chain(constraints)
        })
        .filter(|risk| seen.insert(risk.clone()))
        .take(MAX_ROLLUP_RISKS)
        .collect()
}
