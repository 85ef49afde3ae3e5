//! Reconciliation
//!
//! Keeps the dashboard in step with the backend: initial load, refetch,
//! and create/delete mutations with their notices.

pub mod analysis;
pub mod controller;

pub use analysis::{analyze_with_fallback, AnalysisOutcome, AnalysisSource};
pub use controller::{
    parse_task_id, DashboardState, InitialLoad, MutationReport, ReconciliationController,
    RefreshOutcome,
};
