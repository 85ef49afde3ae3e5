//! Normalization and Aggregation Integration Tests
//!
//! Mixed producer payloads flowing through the public core API into
//! collection, ranking, comparison and rollup.

use proptest::prelude::*;
use serde_json::json;

use scenario_studio_core::{
    aggregate, compare, normalize, normalize_value, rank, RawRecord, ScenarioBuilder,
    ScenarioCollection, SelectionSet,
};

#[test]
fn test_mixed_producers_normalize_to_one_shape() {
    let persisted = normalize(&RawRecord::persisted(json!({
        "id": 7,
        "name": "Persisted",
        "target_market": "Ops",
        "created_at": "2026-10-02T08:30:00",
        "ai_analysis": "{\"impact\": 64, \"risks\": [\"Churn\"]}"
    })));
    let draft = normalize_value(json!({
        "id": "1760000000000-0",
        "name": "Draft",
        "targetMarket": "Sales",
        "createdAt": "2026-10-19T10:00:00Z",
        "aiAnalysis": {
            "feature_impact_scores": [],
            "customer_market_research": {"feasibility_constraints": ["Budget"]}
        }
    }));
    let legacy = normalize_value(json!({
        "name": "Legacy",
        "aiAnalysis": {"feasibility": 81, "impact": 77, "opportunities": ["Upsell"]}
    }));

    assert_eq!(persisted.id, "7");
    assert_eq!(persisted.target_market, "Ops");
    assert_eq!(persisted.impact(), 64);
    assert_eq!(persisted.analysis.risks, vec!["Churn"]);

    assert_eq!(draft.target_market, "Sales");
    assert_eq!(draft.impact(), 70);
    assert_eq!(draft.analysis.feasibility_constraints(), vec!["Budget"]);

    assert_eq!(legacy.impact(), 77);
    assert_eq!(legacy.analysis.stories_or_opportunities()[0].story, "Upsell");
    assert!(!legacy.id.is_empty());
}

#[test]
fn test_rollup_over_collection() {
    let a = ScenarioBuilder::new("1")
        .name("A")
        .impact(40)
        .risk("Shared risk")
        .build()
        .unwrap();
    let b = ScenarioBuilder::new("2")
        .name("B")
        .impact(90)
        .risk("Shared risk")
        .risk("Vendor lock-in")
        .recommendation("Ship it")
        .build()
        .unwrap();
    let collection = ScenarioCollection::from_parts(vec![a, b], Default::default());

    let selection: SelectionSet = ["1", "2"].into_iter().collect();
    let chosen = collection.resolve(&selection);
    let comparison = compare(&chosen);
    assert_eq!(comparison.result().unwrap().recommended_id, "2");

    let rollup = aggregate(&collection.insight_scope(&SelectionSet::new()));
    assert_eq!(rollup.scenario_count, 2);
    assert_eq!(rollup.average_impact, 65);
    assert_eq!(rollup.risks, vec!["Shared risk", "Vendor lock-in"]);
    assert_eq!(rollup.recommendations[0].recommendation, "Ship it");
}

proptest! {
    #[test]
    fn prop_rank_is_ordered_permutation(impacts in prop::collection::vec(0u32..=100, 0..20)) {
        let scenarios: Vec<_> = impacts
            .iter()
            .enumerate()
            .map(|(i, impact)| ScenarioBuilder::new(i.to_string()).impact(*impact).build().unwrap())
            .collect();

        let ranked = rank(&scenarios);

        prop_assert_eq!(ranked.len(), scenarios.len());
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].impact() >= pair[1].impact());
        }
    }
}
