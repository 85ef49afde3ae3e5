//! Reconciliation Controller Integration Tests
//!
//! Drives the controller against the in-memory backend:
//! - create with remote analysis and with mock fallback
//! - optimistic delete, success and rollback
//! - stale refetch results are dropped
//! - failed initial load leaves an empty, usable dashboard

use std::sync::Arc;
use std::time::Duration;

use scenario_studio::models::notice::NoticeLevel;
use scenario_studio::services::reconciliation::controller::{
    NOTICE_CREATE_FAILED, NOTICE_CREATE_OK, NOTICE_DELETE_FAILED, NOTICE_DELETE_OK,
    NOTICE_INVALID_ID, NOTICE_LOAD_FAILED,
};
use scenario_studio::services::reconciliation::{
    AnalysisSource, InitialLoad, ReconciliationController, RefreshOutcome,
};
use scenario_studio::AppError;
use scenario_studio_backend::{BackendError, BackendStatus, ScenarioDraft};
use scenario_studio_core::{MutationOutcome, MutationPhase};

use crate::fake_backend::{server_error, FakeBackend};

// ============================================================================
// Helpers
// ============================================================================

fn setup(fallback: bool) -> (Arc<FakeBackend>, ReconciliationController) {
    let backend = Arc::new(FakeBackend::new());
    let controller = ReconciliationController::new(backend.clone(), fallback);
    (backend, controller)
}

fn draft(name: &str) -> ScenarioDraft {
    ScenarioDraft::new(name, format!("{} problem", name), "Analysts")
        .with_success_metrics("Weekly active use")
        .with_timeline("Q1")
}

async fn error_messages(controller: &ReconciliationController) -> Vec<String> {
    controller
        .drain_notices()
        .await
        .into_iter()
        .filter(|n| n.level == NoticeLevel::Error)
        .map(|n| n.message)
        .collect()
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_persists_and_refetches() {
    let (backend, controller) = setup(true);
    backend.queue_impacts(&[60]);

    let report = controller.create(draft("Bulk export")).await.unwrap();

    assert_eq!(report.outcome, MutationOutcome::Confirmed);
    assert_eq!(report.analysis_source, Some(AnalysisSource::Remote));
    assert_eq!(report.scenario_id.as_deref(), Some("1"));
    assert_eq!(
        report.phases,
        vec![
            MutationPhase::Idle,
            MutationPhase::Pending {
                optimistic_applied: false
            },
            MutationPhase::Confirmed,
            MutationPhase::Idle,
        ]
    );

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.today.len(), 1);
    let scenario = &snapshot.today[0];
    assert_eq!(scenario.name, "Bulk export");
    assert_eq!(scenario.impact(), 60);
    assert_eq!(scenario.timeline, "Q1");

    let notices = controller.drain_notices().await;
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, NOTICE_CREATE_OK);
}

#[tokio::test]
async fn test_create_falls_back_to_mock_when_backend_unreachable() {
    let (backend, controller) = setup(true);
    backend.fail_analyze(Some(BackendError::network("connection refused")));

    let report = controller.create(draft("Offline mode")).await.unwrap();

    assert!(report.outcome.is_success());
    assert_eq!(report.analysis_source, Some(AnalysisSource::Mock));
    assert_eq!(controller.backend_status().await, BackendStatus::Disconnected);

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.scenarios.len(), 1);
    let impact = snapshot.scenarios[0].impact();
    assert!((70..=100).contains(&impact), "mock impact out of range: {}", impact);
}

#[tokio::test]
async fn test_create_without_fallback_reports_failure() {
    let (backend, controller) = setup(false);
    backend.fail_analyze(Some(server_error("model overloaded")));

    let report = controller.create(draft("Search")).await.unwrap();

    assert_eq!(report.outcome, MutationOutcome::Failed { rolled_back: false });
    assert!(report.error.is_some());
    assert_eq!(backend.calls().create, 0);
    assert_eq!(error_messages(&controller).await, vec![NOTICE_CREATE_FAILED]);
}

#[tokio::test]
async fn test_failed_persist_leaves_no_ghost_entry() {
    let (backend, controller) = setup(true);
    backend.seed_today("Existing", 40);
    controller.load_initial().await;
    backend.fail_create(Some(server_error("database locked")));

    let report = controller.create(draft("Ghost")).await.unwrap();

    assert_eq!(report.outcome, MutationOutcome::Failed { rolled_back: false });
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.scenarios.len(), 1);
    assert_eq!(snapshot.scenarios[0].name, "Existing");
    assert_eq!(error_messages(&controller).await, vec![NOTICE_CREATE_FAILED]);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_failed_delete_rolls_back_with_one_notice() {
    let (backend, controller) = setup(true);
    backend.queue_impacts(&[60, 85]);
    let low = controller.create(draft("Low")).await.unwrap().scenario_id.unwrap();
    let high = controller.create(draft("High")).await.unwrap().scenario_id.unwrap();
    controller.drain_notices().await;

    controller.toggle_selection(&high).await;
    backend.fail_delete(Some(server_error("delete failed")));

    let report = controller.delete(&high).await.unwrap();

    assert_eq!(report.outcome, MutationOutcome::Failed { rolled_back: true });
    assert_eq!(
        report.phases[1],
        MutationPhase::Pending {
            optimistic_applied: true
        }
    );

    let snapshot = controller.snapshot().await;
    let ids: Vec<&str> = snapshot.scenarios.iter().map(|s| s.id.as_str()).collect();
    assert!(ids.contains(&low.as_str()));
    assert!(ids.contains(&high.as_str()));
    assert!(!controller.is_selected(&high).await);

    assert_eq!(error_messages(&controller).await, vec![NOTICE_DELETE_FAILED]);
}

#[tokio::test]
async fn test_delete_removes_scenario_and_selection() {
    let (backend, controller) = setup(true);
    let keep = backend.seed_today("Keep", 30);
    let gone = backend.seed_history("2026-10-01", "Gone", 70);
    controller.load_initial().await;
    controller.toggle_selection(&gone).await;
    controller.toggle_selection(&keep).await;

    let report = controller.delete(&gone).await.unwrap();

    assert_eq!(report.outcome, MutationOutcome::Confirmed);
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.scenarios.len(), 1);
    assert!(snapshot.history.is_empty());
    assert_eq!(snapshot.selected_ids, vec![keep]);

    let notices = controller.drain_notices().await;
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Success);
    assert_eq!(notices[0].message, NOTICE_DELETE_OK);
}

#[tokio::test]
async fn test_delete_hides_scenario_while_in_flight() {
    let backend = Arc::new(FakeBackend::new());
    let controller = Arc::new(ReconciliationController::new(backend.clone(), true));
    let keep = backend.seed_today("Keep", 40);
    let doomed = backend.seed_today("Doomed", 70);
    controller.load_initial().await;
    controller.toggle_selection(&doomed).await;

    backend.delay_next_delete(Duration::from_millis(200));
    backend.fail_delete(Some(server_error("delete failed")));

    let pending = tokio::spawn({
        let controller = controller.clone();
        let doomed = doomed.clone();
        async move { controller.delete(&doomed).await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;

    let during = controller.snapshot().await;
    let ids: Vec<&str> = during.scenarios.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec![keep.as_str()]);
    assert!(!controller.is_selected(&doomed).await);
    assert_eq!(backend.calls().delete, 1);

    let report = pending.await.unwrap().unwrap();
    assert_eq!(report.outcome, MutationOutcome::Failed { rolled_back: true });

    let after = controller.snapshot().await;
    assert!(after.scenarios.iter().any(|s| s.id == doomed));
    assert_eq!(backend.stored_count(), 2);
    assert_eq!(error_messages(&controller).await, vec![NOTICE_DELETE_FAILED]);
}

#[tokio::test]
async fn test_delete_rejects_invalid_id() {
    let (backend, controller) = setup(true);

    for id in ["0", "abc", "1712345678901-3"] {
        let result = controller.delete(id).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    assert_eq!(backend.calls().delete, 0);
    let errors = error_messages(&controller).await;
    assert_eq!(errors.len(), 3);
    assert!(errors.iter().all(|m| m == NOTICE_INVALID_ID));
}

#[tokio::test]
async fn test_failed_delete_without_refetch_is_not_rolled_back() {
    let (backend, controller) = setup(true);
    let id = backend.seed_today("Flaky", 55);
    controller.load_initial().await;
    backend.fail_delete(Some(server_error("delete failed")));
    backend.fail_fetch(Some(BackendError::network("connection reset")));

    let report = controller.delete(&id).await.unwrap();

    assert_eq!(report.outcome, MutationOutcome::Failed { rolled_back: false });
    assert!(controller.snapshot().await.scenarios.is_empty());
    assert_eq!(error_messages(&controller).await, vec![NOTICE_DELETE_FAILED]);
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn test_concurrent_creates_are_serialized() {
    let (backend, controller) = setup(true);
    backend.queue_impacts(&[20, 90]);

    let (a, b) = tokio::join!(
        controller.create(draft("First")),
        controller.create(draft("Second"))
    );

    let a = a.unwrap().scenario_id.unwrap();
    let b = b.unwrap().scenario_id.unwrap();
    assert_ne!(a, b);
    assert_eq!(backend.stored_count(), 2);
    assert_eq!(controller.snapshot().await.scenarios.len(), 2);
}

#[tokio::test]
async fn test_stale_refetch_is_discarded() {
    let backend = Arc::new(FakeBackend::new());
    let controller = Arc::new(ReconciliationController::new(backend.clone(), true));
    backend.seed_today("Original", 50);
    backend.delay_next_fetch(Duration::from_millis(200));

    let slow = tokio::spawn({
        let controller = controller.clone();
        async move { controller.refresh().await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;

    backend.seed_today("Added later", 75);
    let fast = controller.refresh().await.unwrap();
    assert_eq!(
        fast,
        RefreshOutcome::Applied {
            ticket: 2,
            scenarios: 2
        }
    );

    let slow = slow.await.unwrap().unwrap();
    assert_eq!(
        slow,
        RefreshOutcome::Stale {
            ticket: 1,
            applied: 2
        }
    );
    assert_eq!(controller.snapshot().await.scenarios.len(), 2);
}

// ============================================================================
// Loading
// ============================================================================

#[tokio::test]
async fn test_initial_load_failure_shows_empty_state() {
    let (backend, controller) = setup(true);
    backend.seed_today("Unreachable", 10);
    backend.fail_fetch(Some(BackendError::network("connection refused")));

    let load = controller.load_initial().await;

    assert!(matches!(load, InitialLoad::Unavailable { .. }));
    let snapshot = controller.snapshot().await;
    assert!(snapshot.is_empty());
    assert!(snapshot.load_error.is_some());
    assert_eq!(snapshot.backend_status, BackendStatus::Disconnected);
    assert_eq!(error_messages(&controller).await, vec![NOTICE_LOAD_FAILED]);

    backend.fail_fetch(None);
    assert!(matches!(
        controller.refresh().await.unwrap(),
        RefreshOutcome::Applied { scenarios: 1, .. }
    ));
    assert!(controller.snapshot().await.load_error.is_none());
}

#[tokio::test]
async fn test_load_groups_history_newest_first() {
    let (backend, controller) = setup(true);
    backend.seed_history("2026-09-30", "Older", 30);
    backend.seed_history("2026-10-12", "Newer", 40);
    backend.seed_today("Today", 50);

    let load = controller.load_initial().await;

    assert_eq!(load, InitialLoad::Loaded { scenarios: 3 });
    let snapshot = controller.snapshot().await;
    let days: Vec<&str> = snapshot.history.iter().map(|d| d.date.as_str()).collect();
    assert_eq!(days, vec!["2026-10-12", "2026-09-30"]);
    assert_eq!(snapshot.today[0].name, "Today");
}

// ============================================================================
// Views
// ============================================================================

#[tokio::test]
async fn test_compare_and_insights_follow_selection() {
    let (backend, controller) = setup(true);
    let a = backend.seed_today("Alpha", 40);
    let b = backend.seed_today("Beta", 90);
    backend.seed_today("Gamma", 65);
    controller.load_initial().await;

    controller.toggle_selection(&a).await;
    assert!(!controller.compare_selected().await.is_ready());
    let all = controller.insights().await;
    assert_eq!(all.scenario_count, 1);

    controller.toggle_selection(&b).await;
    let comparison = controller.compare_selected().await;
    let result = comparison.result().unwrap();
    assert_eq!(result.recommended_id, b);
    assert_eq!(result.columns.len(), 2);

    let rollup = controller.insights().await;
    assert_eq!(rollup.scenario_count, 2);
    assert_eq!(rollup.average_impact, 65);
    assert_eq!(rollup.ranked_scenarios[0].id, b);

    controller.clear_selection().await;
    assert_eq!(controller.insights().await.scenario_count, 3);
}

#[tokio::test]
async fn test_insights_over_unknown_selection_are_empty() {
    let (backend, controller) = setup(true);
    backend.seed_today("Alpha", 40);
    backend.seed_today("Beta", 90);
    controller.load_initial().await;

    controller.toggle_selection("999").await;
    let rollup = controller.insights().await;
    assert_eq!(rollup.scenario_count, 0);
    assert!(rollup.ranked_scenarios.is_empty());

    controller.clear_selection().await;
    assert_eq!(controller.insights().await.scenario_count, 2);
}
