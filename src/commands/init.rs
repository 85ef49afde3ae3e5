//! Initialization Commands
//!
//! Commands for application initialization and setup.
//! On startup, initializes the services and performs the first dashboard
//! load. A failed load still leaves the app usable with an empty dashboard.

use serde::{Deserialize, Serialize};

use crate::models::response::CommandResponse;
use crate::services::reconciliation::InitialLoad;
use crate::state::AppState;

/// Result of application initialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitResult {
    /// Success message
    pub message: String,
    pub load: InitialLoad,
}

/// Initialize the application and load the dashboard
pub async fn init_app(state: &AppState) -> CommandResponse<InitResult> {
    if let Err(e) = state.initialize().await {
        return CommandResponse::err(e.to_string());
    }
    load_dashboard(state).await
}

/// Run the first load against an already initialized state
pub async fn load_dashboard(state: &AppState) -> CommandResponse<InitResult> {
    let controller = match state.controller().await {
        Ok(controller) => controller,
        Err(e) => return CommandResponse::err(e.to_string()),
    };

    controller.check_backend().await;
    let load = controller.load_initial().await;
    let message = match &load {
        InitialLoad::Loaded { scenarios } => {
            format!("Application initialized successfully. Loaded {} scenario(s).", scenarios)
        }
        InitialLoad::Unavailable { .. } => {
            "Application initialized without data: scenarios could not be loaded".to_string()
        }
    };

    CommandResponse::ok(InitResult { message, load })
}

/// Get the application version
pub fn get_version() -> CommandResponse<String> {
    CommandResponse::ok(env!("CARGO_PKG_VERSION").to_string())
}
