//! Reconciliation Controller
//!
//! Owns the dashboard state (collection, selection, backend status) and is
//! the only component that reloads it. Creates and deletes go through a
//! mutation gate so they run one at a time; refetches carry tickets and a
//! result older than the last applied one is dropped.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use scenario_studio_backend::{
    BackendError, BackendStatus, MockAnalysisGenerator, ScenarioBackend, ScenarioDraft, TaskCreate,
};
use scenario_studio_core::normalize::fallback_id;
use scenario_studio_core::{
    aggregate, compare, normalize, normalize_all, ComparisonOutcome, HistoryGroups, InsightRollup,
    MutationKind, MutationLifecycle, MutationOutcome, MutationPhase, ScenarioCollection,
    SelectionSet,
};

use super::analysis::{analyze_with_fallback, AnalysisSource};
use crate::models::dashboard::DashboardSnapshot;
use crate::models::notice::{Notice, NoticeBoard};
use crate::utils::error::{AppError, AppResult};

pub const NOTICE_CREATE_OK: &str = "Feature analyzed & saved!";
pub const NOTICE_CREATE_FAILED: &str = "Error creating task";
pub const NOTICE_DELETE_OK: &str = "Task deleted successfully";
pub const NOTICE_DELETE_FAILED: &str = "Failed to delete task";
pub const NOTICE_INVALID_ID: &str = "Invalid task ID";
pub const NOTICE_LOAD_FAILED: &str = "Failed to load scenarios";

/// Mutable dashboard data guarded by the controller.
#[derive(Debug, Default)]
pub struct DashboardState {
    pub collection: ScenarioCollection,
    pub selection: SelectionSet,
    pub backend_status: BackendStatus,
    pub load_error: Option<String>,
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Ticket of the last refetch whose result was applied
    pub applied_ticket: u64,
}

/// Result of one refetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RefreshOutcome {
    Applied { ticket: u64, scenarios: usize },
    /// A later refetch was already applied; this result was discarded
    Stale { ticket: u64, applied: u64 },
}

/// Result of the startup load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum InitialLoad {
    Loaded { scenarios: usize },
    /// Nothing could be fetched; the dashboard shows the empty state
    Unavailable { error: String },
}

/// What happened to one create or delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationReport {
    pub kind: MutationKind,
    pub outcome: MutationOutcome,
    pub scenario_id: Option<String>,
    pub analysis_source: Option<AnalysisSource>,
    pub phases: Vec<MutationPhase>,
    pub error: Option<String>,
}

pub struct ReconciliationController {
    backend: RwLock<Arc<dyn ScenarioBackend>>,
    dashboard: RwLock<DashboardState>,
    notices: RwLock<NoticeBoard>,
    /// Serializes mutations; queued callers wait rather than being rejected
    gate: Mutex<()>,
    next_ticket: AtomicU64,
    mock: MockAnalysisGenerator,
    mock_fallback_enabled: AtomicBool,
}

impl ReconciliationController {
    pub fn new(backend: Arc<dyn ScenarioBackend>, mock_fallback_enabled: bool) -> Self {
        Self {
            backend: RwLock::new(backend),
            dashboard: RwLock::new(DashboardState::default()),
            notices: RwLock::new(NoticeBoard::new()),
            gate: Mutex::new(()),
            next_ticket: AtomicU64::new(0),
            mock: MockAnalysisGenerator::new(),
            mock_fallback_enabled: AtomicBool::new(mock_fallback_enabled),
        }
    }

    /// Swap the backend client, e.g. after the backend URL changed.
    pub async fn replace_backend(&self, backend: Arc<dyn ScenarioBackend>) {
        *self.backend.write().await = backend;
    }

    pub fn set_mock_fallback(&self, enabled: bool) {
        self.mock_fallback_enabled.store(enabled, Ordering::SeqCst);
    }

    async fn backend(&self) -> Arc<dyn ScenarioBackend> {
        self.backend.read().await.clone()
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Startup load. Total failure leaves an explicit empty state, records
    /// the error and raises one notice.
    pub async fn load_initial(&self) -> InitialLoad {
        match self.refetch().await {
            Ok(RefreshOutcome::Applied { scenarios, .. }) => InitialLoad::Loaded { scenarios },
            Ok(RefreshOutcome::Stale { .. }) => InitialLoad::Loaded {
                scenarios: self.dashboard.read().await.collection.len(),
            },
            Err(e) => {
                let error = e.to_string();
                {
                    let mut dashboard = self.dashboard.write().await;
                    dashboard.collection = ScenarioCollection::new();
                    dashboard.load_error = Some(error.clone());
                    if e.is_transport() {
                        dashboard.backend_status = BackendStatus::Disconnected;
                    }
                }
                self.notices.write().await.error(NOTICE_LOAD_FAILED);
                InitialLoad::Unavailable { error }
            }
        }
    }

    /// Refetch today and history and replace the collection.
    pub async fn refresh(&self) -> AppResult<RefreshOutcome> {
        Ok(self.refetch().await?)
    }

    async fn refetch(&self) -> Result<RefreshOutcome, BackendError> {
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let backend = self.backend().await;
        debug!(ticket, "Refetching scenarios");

        let (today, history) = tokio::join!(backend.fetch_today(), backend.fetch_history());
        let today = normalize_all(&today?);
        let history: HistoryGroups = history?
            .into_iter()
            .map(|(day, rows)| (day, normalize_all(&rows)))
            .collect();
        let collection = ScenarioCollection::from_parts(today, history);

        let mut dashboard = self.dashboard.write().await;
        if ticket <= dashboard.applied_ticket {
            warn!(
                ticket,
                applied = dashboard.applied_ticket,
                "Discarding stale refetch"
            );
            return Ok(RefreshOutcome::Stale {
                ticket,
                applied: dashboard.applied_ticket,
            });
        }

        let scenarios = collection.len();
        dashboard.collection = collection;
        dashboard.applied_ticket = ticket;
        dashboard.load_error = None;
        dashboard.refreshed_at = Some(Utc::now());
        info!(ticket, scenarios, "Scenarios refreshed");
        Ok(RefreshOutcome::Applied { ticket, scenarios })
    }

    /// Refetch after a mutation; failure is logged, not surfaced.
    async fn reconcile(&self) -> bool {
        match self.refetch().await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Reconciling refetch failed");
                false
            }
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Analyze, persist, then refetch. Nothing is added locally before the
    /// backend confirms, so a failed persist leaves no ghost entry.
    pub async fn create(&self, draft: ScenarioDraft) -> AppResult<MutationReport> {
        let _gate = self.gate.lock().await;
        let backend = self.backend().await;
        let mut lifecycle = MutationLifecycle::new(MutationKind::Create);
        lifecycle.begin(false)?;

        let fallback_enabled = self.mock_fallback_enabled.load(Ordering::SeqCst);
        let persisted = match analyze_with_fallback(
            backend.as_ref(),
            &self.mock,
            &draft,
            fallback_enabled,
        )
        .await
        {
            Ok(analysis) => {
                if let Some(err) = &analysis.fallback_error {
                    if err.is_transport() {
                        self.dashboard.write().await.backend_status = BackendStatus::Disconnected;
                    }
                }
                let source = analysis.source;
                let scenario = normalize(&draft.to_record(
                    &fallback_id(),
                    analysis.payload,
                    Utc::now(),
                ));
                match TaskCreate::from_scenario(&scenario) {
                    Ok(task) => backend
                        .create_task(&task)
                        .await
                        .map(|row| (normalize(&row).id, source)),
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e),
        };

        let report = match persisted {
            Ok((scenario_id, source)) => {
                lifecycle.confirm()?;
                self.reconcile().await;
                self.notices.write().await.success(NOTICE_CREATE_OK);
                info!(scenario_id = %scenario_id, source = %source, "Scenario created");
                MutationReport {
                    kind: MutationKind::Create,
                    outcome: lifecycle.settle()?,
                    scenario_id: Some(scenario_id),
                    analysis_source: Some(source),
                    phases: lifecycle.history().to_vec(),
                    error: None,
                }
            }
            Err(e) => {
                lifecycle.fail(false)?;
                self.notices.write().await.error(NOTICE_CREATE_FAILED);
                MutationReport {
                    kind: MutationKind::Create,
                    outcome: lifecycle.settle()?,
                    scenario_id: None,
                    analysis_source: None,
                    phases: lifecycle.history().to_vec(),
                    error: Some(e.to_string()),
                }
            }
        };
        Ok(report)
    }

    /// Remove locally, delete remotely, then refetch whatever happened.
    ///
    /// A failed remote delete is undone by the refetch and reported with
    /// exactly one failure notice.
    pub async fn delete(&self, id: &str) -> AppResult<MutationReport> {
        let task_id = match parse_task_id(id) {
            Some(task_id) => task_id,
            None => {
                self.notices.write().await.error(NOTICE_INVALID_ID);
                return Err(AppError::validation(format!("{}: {}", NOTICE_INVALID_ID, id)));
            }
        };

        let _gate = self.gate.lock().await;
        let backend = self.backend().await;
        let mut lifecycle = MutationLifecycle::new(MutationKind::Delete);

        let optimistic_applied = {
            let mut dashboard = self.dashboard.write().await;
            let deselected = dashboard.selection.remove(id);
            let removed = dashboard.collection.remove(id);
            removed || deselected
        };
        lifecycle.begin(optimistic_applied)?;
        debug!(task_id, optimistic_applied, "Optimistic delete applied");

        let remote = backend.delete_task(task_id).await;
        let refetched = self.reconcile().await;

        let error = match remote {
            Ok(_) => {
                lifecycle.confirm()?;
                self.notices.write().await.success(NOTICE_DELETE_OK);
                info!(task_id, "Scenario deleted");
                None
            }
            Err(e) => {
                lifecycle.fail(optimistic_applied && refetched)?;
                self.notices.write().await.error(NOTICE_DELETE_FAILED);
                Some(e.to_string())
            }
        };

        Ok(MutationReport {
            kind: MutationKind::Delete,
            outcome: lifecycle.settle()?,
            scenario_id: Some(id.to_string()),
            analysis_source: None,
            phases: lifecycle.history().to_vec(),
            error,
        })
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Returns whether `id` is selected afterwards.
    pub async fn toggle_selection(&self, id: &str) -> bool {
        self.dashboard.write().await.selection.toggle(id)
    }

    pub async fn clear_selection(&self) {
        self.dashboard.write().await.selection.clear();
    }

    pub async fn is_selected(&self, id: &str) -> bool {
        self.dashboard.read().await.selection.is_selected(id)
    }

    // ========================================================================
    // Read views
    // ========================================================================

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let dashboard = self.dashboard.read().await;
        DashboardSnapshot::build(
            &dashboard.collection,
            &dashboard.selection,
            dashboard.backend_status.clone(),
            dashboard.load_error.clone(),
            dashboard.refreshed_at,
        )
    }

    /// Comparison over the selected scenarios that are loaded.
    pub async fn compare_selected(&self) -> ComparisonOutcome {
        let dashboard = self.dashboard.read().await;
        compare(&dashboard.collection.resolve(&dashboard.selection))
    }

    /// Insight rollup over the loaded part of the selection, or over
    /// everything when the selection is empty. Stale ids are omitted.
    pub async fn insights(&self) -> InsightRollup {
        let dashboard = self.dashboard.read().await;
        aggregate(&dashboard.collection.insight_scope(&dashboard.selection))
    }

    /// Query `/health` and update the status indicator.
    pub async fn check_backend(&self) -> BackendStatus {
        let backend = self.backend().await;
        let status = match backend.health().await {
            Ok(health) => health.status(),
            Err(e) => {
                warn!(error = %e, "Backend health check failed");
                BackendStatus::Disconnected
            }
        };
        self.dashboard.write().await.backend_status = status.clone();
        status
    }

    pub async fn backend_status(&self) -> BackendStatus {
        self.dashboard.read().await.backend_status.clone()
    }

    // ========================================================================
    // Notices
    // ========================================================================

    pub async fn pending_notices(&self) -> Vec<Notice> {
        self.notices.read().await.pending().to_vec()
    }

    pub async fn drain_notices(&self) -> Vec<Notice> {
        self.notices.write().await.drain()
    }
}

impl std::fmt::Debug for ReconciliationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconciliationController")
            .field("next_ticket", &self.next_ticket)
            .field("mock_fallback_enabled", &self.mock_fallback_enabled)
            .finish()
    }
}

/// Backend task ids are positive integers.
pub fn parse_task_id(id: &str) -> Option<u64> {
    id.trim().parse::<u64>().ok().filter(|n| *n > 0)
}
