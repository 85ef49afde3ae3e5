//! Selection Commands

use serde::{Deserialize, Serialize};

use crate::models::response::CommandResponse;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionChange {
    pub id: String,
    pub selected: bool,
    pub selected_count: usize,
}

/// Toggle one scenario in or out of the selection
pub async fn toggle_selection(state: &AppState, id: String) -> CommandResponse<SelectionChange> {
    let controller = match state.controller().await {
        Ok(controller) => controller,
        Err(e) => return CommandResponse::err(e.to_string()),
    };
    let selected = controller.toggle_selection(&id).await;
    let selected_count = controller.snapshot().await.selected_ids.len();
    CommandResponse::ok(SelectionChange {
        id,
        selected,
        selected_count,
    })
}

pub async fn clear_selection(state: &AppState) -> CommandResponse<()> {
    match state.controller().await {
        Ok(controller) => {
            controller.clear_selection().await;
            CommandResponse::ok(())
        }
        Err(e) => CommandResponse::err(e.to_string()),
    }
}
