//! Canonical Scenario Model
//!
//! The origin-agnostic representation that ranking, comparison and insight
//! rollups consume. Values are produced only by the normalizer and are
//! replaced wholesale on refetch, never patched in place.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fields;

/// One analyzed feature proposal plus its derived intelligence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Backend id for persisted records, client id or generated fallback otherwise
    pub id: String,
    pub name: String,
    pub description: String,
    pub target_market: String,
    pub timeline: String,
    pub resources: Option<String>,
    /// Insertion order is display order
    pub assumptions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub analysis: Analysis,
}

impl Scenario {
    /// Priority score used for ranking.
    pub fn impact(&self) -> u8 {
        self.analysis.impact
    }

    /// Calendar day (UTC) the scenario belongs to in history views.
    pub fn created_on(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Display name, falling back to a placeholder for unnamed drafts.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Untitled"
        } else {
            &self.name
        }
    }
}

/// Derived intelligence attached to a scenario.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Single comparable priority score, always within 0..=100
    pub impact: u8,
    pub impact_rationale: Option<String>,
    /// Legacy feasibility score when a producer supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feasibility: Option<u8>,
    pub risks: Vec<String>,
    /// Flat legacy opportunity strings
    #[serde(default)]
    pub opportunities: Vec<String>,
    pub user_stories: Vec<UserStory>,
    pub recommendation: String,
    pub strategic_framing: Option<String>,
    pub key_metrics: Vec<KeyMetric>,
    /// Rich lifecycle payload, retained verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<Lifecycle>,
}

impl Analysis {
    /// Structured stories, or the opportunities lifted into criteria-less
    /// stories when there are none.
    pub fn stories_or_opportunities(&self) -> Vec<UserStory> {
        if !self.user_stories.is_empty() {
            return self.user_stories.clone();
        }
        self.opportunities
            .iter()
            .map(UserStory::from_opportunity)
            .collect()
    }

    /// One-line summaries of the first `limit` stories.
    pub fn story_summaries(&self, limit: usize) -> Vec<String> {
        self.stories_or_opportunities()
            .into_iter()
            .map(|s| s.story)
            .filter(|s| !s.trim().is_empty())
            .take(limit)
            .collect()
    }

    /// Feasibility constraints from the lifecycle, if any.
    pub fn feasibility_constraints(&self) -> Vec<String> {
        self.lifecycle
            .as_ref()
            .map(Lifecycle::feasibility_constraints)
            .unwrap_or_default()
    }
}

/// A user story with its acceptance criteria.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserStory {
    pub story: String,
    #[serde(default)]
    pub criteria: Vec<String>,
}

impl UserStory {
    pub fn new(story: impl Into<String>, criteria: Vec<String>) -> Self {
        Self {
            story: story.into(),
            criteria,
        }
    }

    /// Lift a flat opportunity string into a story without criteria.
    pub fn from_opportunity(opportunity: impl AsRef<str>) -> Self {
        Self::new(opportunity.as_ref(), Vec::new())
    }

    /// Parse a story from either a bare string or a `{story, criteria}` /
    /// `{story, acceptance_criteria}` object. Blank stories yield `None`.
    pub(crate) fn from_value(value: &Value) -> Option<Self> {
        let story = match value {
            Value::String(s) => Self::from_opportunity(s),
            Value::Object(_) => Self::new(
                fields::string_or_empty(value.get("story")),
                fields::string_list(fields::first_at(
                    value,
                    &[&["criteria"], &["acceptance_criteria"]],
                )),
            ),
            _ => return None,
        };
        (!story.story.trim().is_empty()).then_some(story)
    }
}

/// Direction indicator for a key metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Neutral,
}

impl Trend {
    /// Lenient parse; anything unrecognised is neutral.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "up" => Trend::Up,
            "down" => Trend::Down,
            _ => Trend::Neutral,
        }
    }

    /// Trend shown next to an impact score: up from 80, neutral from 50.
    pub fn from_impact(impact: u8) -> Self {
        if impact >= 80 {
            Trend::Up
        } else if impact >= 50 {
            Trend::Neutral
        } else {
            Trend::Down
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
            Trend::Neutral => write!(f, "neutral"),
        }
    }
}

/// A labelled headline metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMetric {
    pub label: String,
    pub value: String,
    pub trend: Trend,
}

impl KeyMetric {
    pub fn new(label: impl Into<String>, value: impl Into<String>, trend: Trend) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            trend,
        }
    }

    pub(crate) fn from_value(value: &Value) -> Option<Self> {
        let label = fields::non_empty(value.get("label"))?;
        Some(Self {
            label,
            value: fields::display_text(value.get("value")),
            trend: value
                .get("trend")
                .and_then(Value::as_str)
                .map(Trend::from_label)
                .unwrap_or_default(),
        })
    }
}

/// Per-feature impact score from the lifecycle payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureImpactScore {
    pub feature_name: String,
    pub impact_score: Option<u8>,
    pub reasoning: Option<String>,
}

impl FeatureImpactScore {
    pub(crate) fn from_value(value: &Value) -> Self {
        Self {
            feature_name: fields::string_or_empty(value.get("feature_name")),
            impact_score: fields::score(value.get("impact_score")),
            reasoning: fields::non_empty(value.get("reasoning")),
        }
    }
}

/// Rich multi-section analysis payload.
///
/// Kept verbatim for deep views. It arrives either as the raw `/simulate`
/// response (`customer_market_research`, `goto_execution`, ...) or in the
/// client's camelCase regrouping (`marketResearch`, `gotoExecution`, ...);
/// the accessors read both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lifecycle(Value);

impl Lifecycle {
    /// Wrap an object payload. Non-objects are not lifecycles.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.is_object().then(|| Self(value.clone()))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Feature scores in input order.
    pub fn feature_scores(&self) -> Vec<FeatureImpactScore> {
        fields::array(fields::first_at(
            &self.0,
            &[&["featureScores"], &["feature_impact_scores"]],
        ))
        .iter()
        .map(FeatureImpactScore::from_value)
        .collect()
    }

    /// Feasibility constraints from market research.
    pub fn feasibility_constraints(&self) -> Vec<String> {
        fields::string_list(fields::first_at(
            &self.0,
            &[
                &["marketResearch", "feasibilityConstraints"],
                &["customer_market_research", "feasibility_constraints"],
            ],
        ))
    }

    pub fn strategic_framing(&self) -> Option<String> {
        self.product_strategy_text("strategic_framing")
    }

    pub fn opportunity_analysis(&self) -> Option<String> {
        self.product_strategy_text("opportunity_analysis")
    }

    pub fn problem_summary(&self) -> Option<String> {
        self.product_strategy_text("problem_summary")
    }

    /// Go-to-market value proposition.
    pub fn value_proposition(&self) -> Option<String> {
        fields::non_empty(fields::first_at(
            &self.0,
            &[
                &["gotoExecution", "messaging", "value_proposition"],
                &["goto_execution", "messaging_positioning", "value_proposition"],
            ],
        ))
    }

    fn product_strategy_text(&self, key: &str) -> Option<String> {
        fields::non_empty_at(&self.0, &["productStrategy", key])
            .or_else(|| fields::non_empty_at(&self.0, &["product_strategy_ideation", key]))
    }
}
