//! Scenario Studio - Application Library
//!
//! Loads analyzed feature scenarios from the analysis backend, keeps the
//! dashboard in step with it, and derives comparison and insight views.
//!
//! ## Module Organization
//!
//! - `commands` - Entry points called by the CLI
//! - `services` - Reconciliation controller and analysis fallback
//! - `storage` - JSON config file
//! - `models` - Settings, notices, dashboard snapshot, response types
//! - `utils` - Errors and paths
//!
//! Scenario normalization, ranking, comparison and aggregation live in
//! `scenario-studio-core`; the backend client in `scenario-studio-backend`.

pub mod commands;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

// Re-export commonly used items from commands
pub use commands::{
    // Init commands
    get_version, init_app, load_dashboard,
    // Health commands
    get_health,
    // Settings commands
    get_settings, update_settings,
    // Scenario commands
    create_scenario, delete_scenario, get_dashboard, refresh_scenarios,
    // Selection commands
    clear_selection, toggle_selection,
    // Insight commands
    compare_selected, get_insights,
    // Notice commands
    drain_notices,
};
// Re-export models (avoiding settings module conflict)
pub use models::dashboard::{DashboardSnapshot, HistoryDay};
pub use models::notice::{Notice, NoticeLevel};
pub use models::response::*;
pub use models::settings::{AppConfig, SettingsUpdate};
pub use services::reconciliation::ReconciliationController;
pub use state::AppState;
pub use utils::error::{AppError, AppResult};
