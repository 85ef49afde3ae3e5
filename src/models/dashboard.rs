//! Dashboard Models
//!
//! Read-only views handed to the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use scenario_studio_backend::BackendStatus;
use scenario_studio_core::{Scenario, ScenarioCollection, SelectionSet};

/// One history day, newest first in [`DashboardSnapshot::history`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryDay {
    pub date: String,
    pub scenarios: Vec<Scenario>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub today: Vec<Scenario>,
    pub history: Vec<HistoryDay>,
    /// Current plus historical, one entry per id
    pub scenarios: Vec<Scenario>,
    pub selected_ids: Vec<String>,
    pub backend_status: BackendStatus,
    /// Set when the last full load failed and the dashboard is showing the
    /// empty state
    pub load_error: Option<String>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl DashboardSnapshot {
    pub fn build(
        collection: &ScenarioCollection,
        selection: &SelectionSet,
        backend_status: BackendStatus,
        load_error: Option<String>,
        refreshed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            today: collection.today().to_vec(),
            history: collection
                .history_groups()
                .into_iter()
                .map(|(date, scenarios)| HistoryDay {
                    date: date.to_string(),
                    scenarios: scenarios.to_vec(),
                })
                .collect(),
            scenarios: collection.all(),
            selected_ids: selection.ids(),
            backend_status,
            load_error,
            refreshed_at,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
