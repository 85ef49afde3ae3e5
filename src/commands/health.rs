//! Health Check Commands
//!
//! Commands for checking the health of the config and the backend.

use crate::models::response::{CommandResponse, HealthResponse};
use crate::state::AppState;

use scenario_studio_backend::BackendStatus;

/// Get the health status, probing the backend
pub async fn get_health(state: &AppState) -> CommandResponse<HealthResponse> {
    let mut health = HealthResponse::default();

    health.config = state.is_config_healthy();

    if let Ok(controller) = state.controller().await {
        health.backend = controller.check_backend().await;
    }
    health.backend_message = health.backend.message();

    health.status = match (&health.backend, health.config) {
        (BackendStatus::Connected { .. }, true) => "healthy".to_string(),
        _ => "degraded".to_string(),
    };

    CommandResponse::ok(health)
}
