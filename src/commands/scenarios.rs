//! Scenario Commands
//!
//! Dashboard reads plus scenario create and delete.

use scenario_studio_backend::ScenarioDraft;

use crate::models::dashboard::DashboardSnapshot;
use crate::models::response::CommandResponse;
use crate::services::reconciliation::{MutationReport, RefreshOutcome};
use crate::state::AppState;

/// Current dashboard view
pub async fn get_dashboard(state: &AppState) -> CommandResponse<DashboardSnapshot> {
    match state.controller().await {
        Ok(controller) => CommandResponse::ok(controller.snapshot().await),
        Err(e) => CommandResponse::err(e.to_string()),
    }
}

/// Refetch today and history from the backend
pub async fn refresh_scenarios(state: &AppState) -> CommandResponse<RefreshOutcome> {
    let controller = match state.controller().await {
        Ok(controller) => controller,
        Err(e) => return CommandResponse::err(e.to_string()),
    };
    controller.refresh().await.into()
}

/// Analyze and persist a new scenario
pub async fn create_scenario(
    state: &AppState,
    draft: ScenarioDraft,
) -> CommandResponse<MutationReport> {
    let controller = match state.controller().await {
        Ok(controller) => controller,
        Err(e) => return CommandResponse::err(e.to_string()),
    };
    controller.create(draft).await.into()
}

/// Delete a persisted scenario by id
pub async fn delete_scenario(state: &AppState, id: String) -> CommandResponse<MutationReport> {
    let controller = match state.controller().await {
        Ok(controller) => controller,
        Err(e) => return CommandResponse::err(e.to_string()),
    };
    controller.delete(&id).await.into()
}
