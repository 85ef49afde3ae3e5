//! Scenario Builder
//!
//! Builder for canonical scenarios outside the normalizer: fixtures, demo
//! data and tests.
//!
//! The builder follows the usual pattern:
//! 1. Create with `::new(id)`
//! 2. Chain `.field(value)` calls
//! 3. Call `.build()` which validates and returns `CoreResult<Scenario>`

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult};
use crate::model::{Analysis, KeyMetric, Lifecycle, Scenario, Trend, UserStory};

/// Builder for [`Scenario`].
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    id: String,
    name: String,
    description: String,
    target_market: String,
    timeline: String,
    resources: Option<String>,
    assumptions: Vec<String>,
    created_at: Option<DateTime<Utc>>,
    impact: u32,
    analysis: Analysis,
}

impl ScenarioBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            target_market: String::new(),
            timeline: String::new(),
            resources: None,
            assumptions: Vec::new(),
            created_at: None,
            impact: 0,
            analysis: Analysis::default(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn target_market(mut self, target_market: impl Into<String>) -> Self {
        self.target_market = target_market.into();
        self
    }

    pub fn timeline(mut self, timeline: impl Into<String>) -> Self {
        self.timeline = timeline.into();
        self
    }

    pub fn resources(mut self, resources: impl Into<String>) -> Self {
        self.resources = Some(resources.into());
        self
    }

    pub fn assumption(mut self, assumption: impl Into<String>) -> Self {
        self.assumptions.push(assumption.into());
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Impact score; validated to be at most 100 at build time.
    pub fn impact(mut self, impact: u32) -> Self {
        self.impact = impact;
        self
    }

    pub fn impact_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.analysis.impact_rationale = Some(rationale.into());
        self
    }

    pub fn risk(mut self, risk: impl Into<String>) -> Self {
        self.analysis.risks.push(risk.into());
        self
    }

    pub fn opportunity(mut self, opportunity: impl Into<String>) -> Self {
        self.analysis.opportunities.push(opportunity.into());
        self
    }

    pub fn user_story(mut self, story: impl Into<String>, criteria: &[&str]) -> Self {
        self.analysis.user_stories.push(UserStory::new(
            story,
            criteria.iter().map(|c| c.to_string()).collect(),
        ));
        self
    }

    pub fn recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.analysis.recommendation = recommendation.into();
        self
    }

    pub fn strategic_framing(mut self, framing: impl Into<String>) -> Self {
        self.analysis.strategic_framing = Some(framing.into());
        self
    }

    pub fn key_metric(mut self, label: &str, value: &str, trend: Trend) -> Self {
        self.analysis.key_metrics.push(KeyMetric::new(label, value, trend));
        self
    }

    /// Attach a lifecycle payload; non-object values are ignored.
    pub fn lifecycle(mut self, lifecycle: serde_json::Value) -> Self {
        self.analysis.lifecycle = Lifecycle::from_value(&lifecycle);
        self
    }

    /// Validate and build the scenario.
    pub fn build(self) -> CoreResult<Scenario> {
        if self.id.trim().is_empty() {
            return Err(CoreError::validation("Scenario id cannot be empty"));
        }
        let impact = u8::try_from(self.impact)
            .ok()
            .filter(|i| *i <= 100)
            .ok_or_else(|| {
                CoreError::validation(format!(
                    "Impact must be between 0 and 100, got {}",
                    self.impact
                ))
            })?;

        Ok(Scenario {
            id: self.id,
            name: self.name,
            description: self.description,
            target_market: self.target_market,
            timeline: self.timeline,
            resources: self.resources,
            assumptions: self.assumptions,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            analysis: Analysis {
                impact,
                ..self.analysis
            },
        })
    }
}
