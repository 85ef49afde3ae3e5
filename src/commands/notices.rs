//! Notice Commands

use crate::models::notice::Notice;
use crate::models::response::CommandResponse;
use crate::state::AppState;

/// Take every pending notice for display
pub async fn drain_notices(state: &AppState) -> CommandResponse<Vec<Notice>> {
    match state.controller().await {
        Ok(controller) => CommandResponse::ok(controller.drain_notices().await),
        Err(e) => CommandResponse::err(e.to_string()),
    }
}
