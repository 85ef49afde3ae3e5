//! Scenario Draft
//!
//! What the user submits when creating a scenario, before any analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use scenario_studio_core::RawRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDraft {
    pub feature_name: String,
    pub problem_statement: String,
    pub target_users: String,
    #[serde(default)]
    pub success_metrics: String,
    #[serde(default)]
    pub timeline: Option<String>,
    #[serde(default)]
    pub resources: Option<String>,
    /// Free-text constraints; persisted as the scenario's assumptions
    #[serde(default)]
    pub constraints: Vec<String>,
}

impl ScenarioDraft {
    pub fn new(
        feature_name: impl Into<String>,
        problem_statement: impl Into<String>,
        target_users: impl Into<String>,
    ) -> Self {
        Self {
            feature_name: feature_name.into(),
            problem_statement: problem_statement.into(),
            target_users: target_users.into(),
            ..Default::default()
        }
    }

    pub fn with_success_metrics(mut self, metrics: impl Into<String>) -> Self {
        self.success_metrics = metrics.into();
        self
    }

    pub fn with_timeline(mut self, timeline: impl Into<String>) -> Self {
        self.timeline = Some(timeline.into());
        self
    }

    pub fn with_resources(mut self, resources: impl Into<String>) -> Self {
        self.resources = Some(resources.into());
        self
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    /// Blank-trimmed constraints, in entry order.
    pub fn assumptions(&self) -> Vec<String> {
        self.constraints
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Prose prompt sent to `/simulate`.
    pub fn scenario_text(&self) -> String {
        let mut parts = vec![
            format!("Feature: {}", self.feature_name),
            format!("Problem: {}", self.problem_statement),
            format!("Target users: {}", self.target_users),
            format!("Success metrics: {}", self.success_metrics),
        ];
        if let Some(timeline) = non_blank(&self.timeline) {
            parts.push(format!("Timeline: {}", timeline));
        }
        if let Some(resources) = non_blank(&self.resources) {
            parts.push(format!("Resources: {}", resources));
        }
        let assumptions = self.assumptions();
        if !assumptions.is_empty() {
            parts.push(format!("Constraints: {}", assumptions.join("; ")));
        }
        format!("{}.", parts.join(". "))
    }

    /// Client-side record pairing this draft with an analysis payload.
    pub fn to_record(&self, id: &str, analysis: Value, created_at: DateTime<Utc>) -> RawRecord {
        RawRecord::client_draft(json!({
            "id": id,
            "name": self.feature_name,
            "description": self.problem_statement,
            "targetMarket": self.target_users,
            "timeline": non_blank(&self.timeline).unwrap_or_default(),
            "resources": non_blank(&self.resources),
            "assumptions": self.assumptions(),
            "createdAt": created_at.to_rfc3339(),
            "aiAnalysis": analysis,
        }))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
