//! Scenario Backend Trait
//!
//! The remote collaborator the reconciliation controller talks to: one
//! analysis endpoint plus the task store. Implementations tag every fetched
//! row as `Origin::Persisted` at this boundary.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use scenario_studio_core::RawRecord;

use crate::types::{BackendResult, HealthStatus, SimulateRequest, TaskCreate};

/// Trait every backend client implements.
///
/// Provides:
/// - Scenario analysis (`/simulate`)
/// - Task persistence (create / list today / list history / delete)
/// - Health probing for the status indicator
#[async_trait]
pub trait ScenarioBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Run the lifecycle analysis; returns the raw response body.
    async fn analyze(&self, request: &SimulateRequest) -> BackendResult<Value>;

    /// Persist a task; returns the stored row.
    async fn create_task(&self, task: &TaskCreate) -> BackendResult<RawRecord>;

    /// Tasks created today, most recent first.
    async fn fetch_today(&self) -> BackendResult<Vec<RawRecord>>;

    /// Earlier tasks grouped by `YYYY-MM-DD`.
    async fn fetch_history(&self) -> BackendResult<BTreeMap<String, Vec<RawRecord>>>;

    /// Delete a task by its backend id; returns the acknowledgment body.
    async fn delete_task(&self, id: u64) -> BackendResult<Value>;

    async fn health(&self) -> BackendResult<HealthStatus>;
}
