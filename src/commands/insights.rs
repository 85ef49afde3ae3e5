//! Insight Commands
//!
//! Comparison and rollup views over the current selection.

use scenario_studio_core::{ComparisonOutcome, InsightRollup};

use crate::models::response::CommandResponse;
use crate::state::AppState;

/// Compare the selected scenarios; fewer than two yields a prompt state
pub async fn compare_selected(state: &AppState) -> CommandResponse<ComparisonOutcome> {
    match state.controller().await {
        Ok(controller) => CommandResponse::ok(controller.compare_selected().await),
        Err(e) => CommandResponse::err(e.to_string()),
    }
}

/// Aggregate insights over the selection, or over everything when nothing
/// is selected
pub async fn get_insights(state: &AppState) -> CommandResponse<InsightRollup> {
    match state.controller().await {
        Ok(controller) => CommandResponse::ok(controller.insights().await),
        Err(e) => CommandResponse::err(e.to_string()),
    }
}
