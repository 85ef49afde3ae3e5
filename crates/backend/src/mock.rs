//! Mock Analysis Generator
//!
//! Local stand-in for `/simulate` when the backend is unreachable. Output is
//! the flat legacy analysis shape; only the numbers are random.

use rand::Rng;
use serde_json::{json, Value};

use crate::draft::ScenarioDraft;

const MOCK_RISKS: [&str; 4] = [
    "Market adoption may be slower than anticipated",
    "Resource allocation conflicts with existing priorities",
    "Technical dependencies on third-party vendors",
    "Competitive response could accelerate timeline pressures",
];

const MOCK_OPPORTUNITIES: [&str; 4] = [
    "First-mover advantage in emerging market segment",
    "Potential for strategic partnerships with key players",
    "Strong alignment with long-term company vision",
    "Opportunity to establish industry standards",
];

/// Priority tier derived from the mock feasibility and impact scores.
pub fn recommendation_for(feasibility: u8, impact: u8) -> &'static str {
    if feasibility > 80 && impact > 80 {
        "High priority - Recommend immediate execution with full resource allocation"
    } else if feasibility > 70 {
        "Medium priority - Validate assumptions with user research before proceeding"
    } else {
        "Low priority - Consider alternative approaches or defer until resources available"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MockAnalysisGenerator;

impl MockAnalysisGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Mock analysis using the thread-local RNG.
    pub fn generate(&self, draft: &ScenarioDraft) -> Value {
        self.generate_with(draft, &mut rand::thread_rng())
    }

    /// Mock analysis from a caller-supplied RNG.
    pub fn generate_with<R: Rng + ?Sized>(&self, draft: &ScenarioDraft, rng: &mut R) -> Value {
        let feasibility: u8 = rng.gen_range(70..100);
        let impact: u8 = rng.gen_range(70..100);
        let reach: u32 = rng.gen_range(100..600);
        let efficiency: u8 = rng.gen_range(70..100);
        let market_fit: u8 = rng.gen_range(75..95);

        tracing::debug!(feasibility, impact, "Generated mock analysis");

        json!({
            "feasibility": feasibility,
            "impact": impact,
            "risks": MOCK_RISKS,
            "opportunities": MOCK_OPPORTUNITIES,
            "recommendation": recommendation_for(feasibility, impact),
            "keyMetrics": [
                {"label": "Est. User Impact", "value": format!("{}K users", reach), "trend": "up"},
                {"label": "Time to Market", "value": draft.timeline.clone().unwrap_or_default(), "trend": "neutral"},
                {"label": "Resource Efficiency", "value": format!("{}%", efficiency), "trend": "up"},
                {"label": "Market Fit Score", "value": format!("{}/100", market_fit), "trend": "up"},
            ],
        })
    }
}
