//! `/simulate` response conversion
//!
//! Turns the analysis backend's lifecycle response into the flat `Analysis`
//! fields, keeping the whole response as the verbatim lifecycle.

use serde_json::Value;

use crate::fields;
use crate::model::{Analysis, KeyMetric, Lifecycle, Trend, UserStory};

/// Top-level sections of a lifecycle response.
const SECTION_KEYS: [&str; 6] = [
    "product_strategy_ideation",
    "requirements_development",
    "customer_market_research",
    "prototype_testing_plan",
    "goto_execution",
    "feature_impact_scores",
];

/// Impact used when the response carries no usable feature score.
pub const DEFAULT_SIMULATED_IMPACT: u8 = 70;

/// Whether `value` is a raw lifecycle response rather than a flat analysis.
pub fn is_simulation_response(value: &Value) -> bool {
    value.get("impact").is_none() && SECTION_KEYS.iter().any(|key| value.get(*key).is_some())
}

/// Derive an `Analysis` from a `/simulate` response.
///
/// Impact comes from the first feature score, in response order; the backend
/// sorts scores highest first, so this is the top-ranked feature.
pub fn analysis_from_simulation(response: &Value) -> Analysis {
    let Some(lifecycle) = Lifecycle::from_value(response) else {
        return Analysis::default();
    };

    let scores = lifecycle.feature_scores();
    let lead = scores.first();
    let impact = lead
        .and_then(|f| f.impact_score)
        .unwrap_or(DEFAULT_SIMULATED_IMPACT);
    let impact_rationale = lead.and_then(|f| f.reasoning.clone());

    let user_stories: Vec<UserStory> = fields::array(fields::at(
        response,
        &["requirements_development", "user_stories"],
    ))
    .iter()
    .filter_map(UserStory::from_value)
    .collect();
    let opportunities = user_stories.iter().map(|s| s.story.clone()).collect();

    let strategic_framing = lifecycle.strategic_framing();
    let recommendation = [
        strategic_framing.clone(),
        lifecycle.opportunity_analysis(),
        lifecycle.value_proposition(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ");

    Analysis {
        impact,
        impact_rationale,
        feasibility: None,
        risks: collect_risks(response),
        opportunities,
        user_stories,
        recommendation,
        strategic_framing,
        key_metrics: vec![KeyMetric::new(
            "Impact Score",
            impact.to_string(),
            Trend::from_impact(impact),
        )],
        lifecycle: Some(lifecycle),
    }
}

fn collect_risks(response: &Value) -> Vec<String> {
    let constraints = fields::string_list(fields::at(
        response,
        &["customer_market_research", "feasibility_constraints"],
    ));
    let gaps = fields::string_list(fields::at(
        response,
        &["customer_market_research", "gaps_insights"],
    ));
    let tests = fields::array(fields::at(
        response,
        &["prototype_testing_plan", "quick_validation_tests"],
    ));

    let mut risks: Vec<String> = constraints.iter().map(|c| format!("Risk: {c}")).collect();
    risks.extend(
        gaps.iter()
            .filter(|g| {
                let lower = g.to_lowercase();
                lower.contains("risk") || lower.contains("challenge")
            })
            .map(|g| format!("Risk: {g}")),
    );
    risks.extend(tests.iter().filter_map(|t| {
        let purpose = fields::str_at(t, &["purpose"])?;
        if !purpose.to_lowercase().contains("risk") {
            return None;
        }
        let test = fields::str_at(t, &["test"]).unwrap_or_default();
        Some(format!("Testing Risk: {test} - {purpose}"))
    }));
    risks
}
