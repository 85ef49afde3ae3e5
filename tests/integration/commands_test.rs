//! Command Integration Tests
//!
//! Exercises the command layer end to end: state initialized with a temp
//! config file and the in-memory backend.

use std::sync::Arc;

use scenario_studio::commands;
use scenario_studio::storage::ConfigService;
use scenario_studio::{AppState, NoticeLevel, SettingsUpdate};
use scenario_studio_backend::{BackendStatus, HealthStatus, ScenarioDraft};
use scenario_studio_core::ComparisonOutcome;
use tempfile::TempDir;

use crate::fake_backend::FakeBackend;

async fn setup() -> (TempDir, Arc<FakeBackend>, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let config = ConfigService::with_path(dir.path().join("config.json")).unwrap();
    let backend = Arc::new(FakeBackend::new());
    let state = AppState::new();
    state.initialize_with(config, backend.clone()).await.unwrap();
    (dir, backend, state)
}

#[tokio::test]
async fn test_commands_fail_before_initialization() {
    let state = AppState::new();
    assert!(!commands::get_dashboard(&state).await.success);
    assert!(!commands::get_settings(&state).await.success);
    assert!(!commands::drain_notices(&state).await.success);
}

#[tokio::test]
async fn test_load_create_compare_flow() {
    let (_dir, backend, state) = setup().await;
    backend.seed_today("Existing", 35);
    backend.queue_impacts(&[80]);

    let init = commands::load_dashboard(&state).await;
    assert!(init.success);

    let draft = ScenarioDraft::new("Audit log", "No traceability", "Compliance teams")
        .with_constraint("SOC2 deadline");
    let created = commands::create_scenario(&state, draft).await;
    let report = created.data.unwrap();
    assert!(report.outcome.is_success());
    let new_id = report.scenario_id.unwrap();

    let dashboard = commands::get_dashboard(&state).await.data.unwrap();
    assert_eq!(dashboard.today.len(), 2);
    let audit = dashboard.today.iter().find(|s| s.id == new_id).unwrap();
    assert_eq!(audit.assumptions, vec!["SOC2 deadline"]);
    assert_eq!(audit.impact(), 80);

    for scenario in &dashboard.today {
        let change = commands::toggle_selection(&state, scenario.id.clone()).await;
        assert!(change.data.unwrap().selected);
    }

    match commands::compare_selected(&state).await.data.unwrap() {
        ComparisonOutcome::Ready(result) => assert_eq!(result.recommended_id, new_id),
        other => panic!("expected a ready comparison, got {:?}", other),
    }

    let notices = commands::drain_notices(&state).await.data.unwrap();
    assert!(notices.iter().all(|n| n.level == NoticeLevel::Success));
}

#[tokio::test]
async fn test_delete_command_with_bad_id_returns_error() {
    let (_dir, _backend, state) = setup().await;

    let response = commands::delete_scenario(&state, "not-a-number".to_string()).await;

    assert!(!response.success);
    assert!(response.error.unwrap().contains("Invalid task ID"));
    let notices = commands::drain_notices(&state).await.data.unwrap();
    assert_eq!(notices.len(), 1);
}

#[tokio::test]
async fn test_health_reports_backend_status() {
    let (_dir, backend, state) = setup().await;

    let health = commands::get_health(&state).await.data.unwrap();
    assert_eq!(health.backend, BackendStatus::Disconnected);
    assert_eq!(health.status, "degraded");

    backend.set_health(HealthStatus {
        llm_provider: Some("openai".to_string()),
        llm_model: Some("gpt-4o".to_string()),
    });
    let health = commands::get_health(&state).await.data.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.backend_message, "Connected to openai (gpt-4o)");
}

#[tokio::test]
async fn test_settings_round_trip() {
    let (_dir, _backend, state) = setup().await;

    let updated = commands::update_settings(
        &state,
        SettingsUpdate {
            mock_fallback_enabled: Some(false),
            ..Default::default()
        },
    )
    .await;
    assert!(!updated.data.unwrap().mock_fallback_enabled);

    let rejected = commands::update_settings(
        &state,
        SettingsUpdate {
            request_timeout_secs: Some(0),
            ..Default::default()
        },
    )
    .await;
    assert!(!rejected.success);

    let settings = commands::get_settings(&state).await.data.unwrap();
    assert!(!settings.mock_fallback_enabled);
    assert_eq!(settings.request_timeout_secs, 120);
}
