//! Comparator
//!
//! Side-by-side comparison of two or more scenarios. Columns follow the
//! ranked order and the head is the recommended scenario. The row set is
//! fixed so a sparse scenario renders as empty cells, never missing rows.

use serde::{Deserialize, Serialize};

use crate::model::Scenario;
use crate::ranking::rank;

/// Minimum number of scenarios a comparison is defined for.
pub const MIN_COMPARISON_SIZE: usize = 2;

const TOP_RISKS: usize = 2;
const TOP_STORIES: usize = 2;

/// Result of asking for a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ComparisonOutcome {
    /// Fewer than two scenarios; the view asks the user to select more
    NeedMoreSelections { selected: usize },
    Ready(ComparisonResult),
}

impl ComparisonOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, ComparisonOutcome::Ready(_))
    }

    pub fn result(&self) -> Option<&ComparisonResult> {
        match self {
            ComparisonOutcome::Ready(result) => Some(result),
            ComparisonOutcome::NeedMoreSelections { .. } => None,
        }
    }
}

/// A ready N-way comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub recommended_id: String,
    pub recommended: Scenario,
    pub columns: Vec<ComparisonColumn>,
    pub rows: Vec<ComparisonRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonColumn {
    pub scenario_id: String,
    pub name: String,
    pub description: String,
}

/// Fixed comparison rows, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    ImpactScore,
    TargetMarket,
    Timeline,
    TopRisks,
    TopUserStories,
    Recommendation,
}

impl RowKind {
    pub const ALL: [RowKind; 6] = [
        RowKind::ImpactScore,
        RowKind::TargetMarket,
        RowKind::Timeline,
        RowKind::TopRisks,
        RowKind::TopUserStories,
        RowKind::Recommendation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RowKind::ImpactScore => "Impact Score",
            RowKind::TargetMarket => "Target Market",
            RowKind::Timeline => "Timeline",
            RowKind::TopRisks => "Top Risks",
            RowKind::TopUserStories => "Top User Stories",
            RowKind::Recommendation => "Recommendation",
        }
    }

    fn cell(self, scenario: &Scenario) -> ComparisonCell {
        let analysis = &scenario.analysis;
        match self {
            RowKind::ImpactScore => ComparisonCell::Score {
                value: analysis.impact,
                rationale: analysis.impact_rationale.clone(),
            },
            RowKind::TargetMarket => ComparisonCell::Text(scenario.target_market.clone()),
            RowKind::Timeline => ComparisonCell::Text(scenario.timeline.clone()),
            RowKind::TopRisks => {
                ComparisonCell::List(analysis.risks.iter().take(TOP_RISKS).cloned().collect())
            }
            RowKind::TopUserStories => ComparisonCell::List(analysis.story_summaries(TOP_STORIES)),
            RowKind::Recommendation => ComparisonCell::Text(analysis.recommendation.clone()),
        }
    }
}

/// One comparison row: a cell per column, in column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub kind: RowKind,
    pub label: String,
    pub cells: Vec<ComparisonCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ComparisonCell {
    Score { value: u8, rationale: Option<String> },
    Text(String),
    List(Vec<String>),
}

impl ComparisonCell {
    /// Whether the cell has nothing to show.
    pub fn is_empty(&self) -> bool {
        match self {
            ComparisonCell::Score { .. } => false,
            ComparisonCell::Text(text) => text.trim().is_empty(),
            ComparisonCell::List(items) => items.is_empty(),
        }
    }
}

/// Compare the given scenarios.
pub fn compare(scenarios: &[Scenario]) -> ComparisonOutcome {
    if scenarios.len() < MIN_COMPARISON_SIZE {
        return ComparisonOutcome::NeedMoreSelections {
            selected: scenarios.len(),
        };
    }

    let ranked = rank(scenarios);
    let columns = ranked
        .iter()
        .map(|s| ComparisonColumn {
            scenario_id: s.id.clone(),
            name: s.display_name().to_string(),
            description: s.description.clone(),
        })
        .collect();
    let rows = RowKind::ALL
        .iter()
        .map(|kind| ComparisonRow {
            kind: *kind,
            label: kind.label().to_string(),
            cells: ranked.iter().map(|s| kind.cell(s)).collect(),
        })
        .collect();

    // Length checked above.
    let recommended = ranked[0].clone();
    ComparisonOutcome::Ready(ComparisonResult {
        recommended_id: recommended.id.clone(),
        recommended,
        columns,
        rows,
    })
}
