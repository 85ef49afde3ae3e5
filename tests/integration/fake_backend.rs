//! In-memory `ScenarioBackend` for integration tests.
//!
//! Behaves like the task store: assigns numeric ids, lists today's rows most
//! recent first, and keeps history grouped by day. Failures and delays are
//! switched on per test.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use scenario_studio_backend::{
    BackendError, BackendResult, HealthStatus, ScenarioBackend, SimulateRequest, TaskCreate,
};
use scenario_studio_core::RawRecord;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    pub analyze: usize,
    pub create: usize,
    pub delete: usize,
    pub fetch_today: usize,
    pub fetch_history: usize,
}

#[derive(Default)]
struct Store {
    today: Vec<Value>,
    history: BTreeMap<String, Vec<Value>>,
    next_id: u64,
    impacts: VecDeque<u8>,
    fetch_delays: VecDeque<Duration>,
    delete_delays: VecDeque<Duration>,
    analyze_error: Option<BackendError>,
    create_error: Option<BackendError>,
    delete_error: Option<BackendError>,
    fetch_error: Option<BackendError>,
    health: Option<HealthStatus>,
    calls: CallCounts,
}

#[derive(Default)]
pub struct FakeBackend {
    store: Mutex<Store>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap()
    }

    /// Impacts returned by successive `/simulate` calls.
    pub fn queue_impacts(&self, impacts: &[u8]) {
        self.lock().impacts.extend(impacts.iter().copied());
    }

    /// Delay the next `fetch_today` call. Its rows are read before the delay.
    pub fn delay_next_fetch(&self, delay: Duration) {
        self.lock().fetch_delays.push_back(delay);
    }

    /// Hold the next `delete_task` call before it applies or fails.
    pub fn delay_next_delete(&self, delay: Duration) {
        self.lock().delete_delays.push_back(delay);
    }

    pub fn fail_analyze(&self, error: Option<BackendError>) {
        self.lock().analyze_error = error;
    }

    pub fn fail_create(&self, error: Option<BackendError>) {
        self.lock().create_error = error;
    }

    pub fn fail_delete(&self, error: Option<BackendError>) {
        self.lock().delete_error = error;
    }

    pub fn fail_fetch(&self, error: Option<BackendError>) {
        self.lock().fetch_error = error;
    }

    pub fn set_health(&self, health: HealthStatus) {
        self.lock().health = Some(health);
    }

    /// Store a persisted row for today and return its id.
    pub fn seed_today(&self, name: &str, impact: u8) -> String {
        let mut store = self.lock();
        store.next_id += 1;
        let id = store.next_id;
        store
            .today
            .insert(0, persisted_row(id, name, impact, "2026-10-19T09:00:00Z"));
        id.to_string()
    }

    /// Store a persisted row under a history day and return its id.
    pub fn seed_history(&self, day: &str, name: &str, impact: u8) -> String {
        let mut store = self.lock();
        store.next_id += 1;
        let id = store.next_id;
        let row = persisted_row(id, name, impact, &format!("{}T12:00:00Z", day));
        store.history.entry(day.to_string()).or_default().push(row);
        id.to_string()
    }

    pub fn stored_count(&self) -> usize {
        let store = self.lock();
        store.today.len() + store.history.values().map(Vec::len).sum::<usize>()
    }

    pub fn calls(&self) -> CallCounts {
        self.lock().calls
    }
}

/// A task-store row in the backend's snake_case shape.
pub fn persisted_row(id: u64, name: &str, impact: u8, created_at: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{} description", name),
        "target_market": "Operators",
        "timeline": "Q3",
        "resources": null,
        "assumptions": [],
        "created_at": created_at,
        "ai_analysis": {
            "impact": impact,
            "risks": [format!("{} risk", name)],
            "userStories": [{"story": format!("As a user I want {}", name), "criteria": []}],
            "recommendation": format!("Build {}", name),
            "keyMetrics": []
        }
    })
}

fn simulation_response(request: &SimulateRequest, impact: u8) -> Value {
    json!({
        "product_strategy_ideation": {
            "strategic_framing": format!("Framing for {}", request.scenario)
        },
        "customer_market_research": {
            "feasibility_constraints": ["Limited QA capacity"]
        },
        "feature_impact_scores": [
            {"feature_name": "lead", "impact_score": impact, "reasoning": "Strong demand"}
        ]
    })
}

#[async_trait]
impl ScenarioBackend for FakeBackend {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn analyze(&self, request: &SimulateRequest) -> BackendResult<Value> {
        let mut store = self.lock();
        store.calls.analyze += 1;
        if let Some(error) = &store.analyze_error {
            return Err(error.clone());
        }
        let impact = store.impacts.pop_front().unwrap_or(50);
        Ok(simulation_response(request, impact))
    }

    async fn create_task(&self, task: &TaskCreate) -> BackendResult<RawRecord> {
        let mut store = self.lock();
        store.calls.create += 1;
        if let Some(error) = &store.create_error {
            return Err(error.clone());
        }
        store.next_id += 1;
        let row = json!({
            "id": store.next_id,
            "name": task.name,
            "description": task.description,
            "target_market": task.target_market,
            "timeline": task.timeline,
            "resources": task.resources,
            "assumptions": task.assumptions,
            "created_at": task.created_at,
            "ai_analysis": task.ai_analysis,
        });
        store.today.insert(0, row.clone());
        Ok(RawRecord::persisted(row))
    }

    async fn fetch_today(&self) -> BackendResult<Vec<RawRecord>> {
        let (delay, result) = {
            let mut store = self.lock();
            store.calls.fetch_today += 1;
            let delay = store.fetch_delays.pop_front();
            let result = match &store.fetch_error {
                Some(error) => Err(error.clone()),
                None => Ok(store.today.iter().cloned().map(RawRecord::persisted).collect()),
            };
            (delay, result)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn fetch_history(&self) -> BackendResult<BTreeMap<String, Vec<RawRecord>>> {
        let mut store = self.lock();
        store.calls.fetch_history += 1;
        if let Some(error) = &store.fetch_error {
            return Err(error.clone());
        }
        Ok(store
            .history
            .iter()
            .map(|(day, rows)| {
                (
                    day.clone(),
                    rows.iter().cloned().map(RawRecord::persisted).collect(),
                )
            })
            .collect())
    }

    async fn delete_task(&self, id: u64) -> BackendResult<Value> {
        let delay = {
            let mut store = self.lock();
            store.calls.delete += 1;
            store.delete_delays.pop_front()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut store = self.lock();
        if let Some(error) = &store.delete_error {
            return Err(error.clone());
        }
        let matches = |row: &Value| row.get("id").and_then(Value::as_u64) == Some(id);
        let before = store.today.len() + store.history.values().map(Vec::len).sum::<usize>();
        store.today.retain(|row| !matches(row));
        for rows in store.history.values_mut() {
            rows.retain(|row| !matches(row));
        }
        store.history.retain(|_, rows| !rows.is_empty());
        let after = store.today.len() + store.history.values().map(Vec::len).sum::<usize>();
        if before == after {
            return Err(BackendError::NotFound {
                message: format!("Task {} not found", id),
            });
        }
        Ok(json!({"deleted": id}))
    }

    async fn health(&self) -> BackendResult<HealthStatus> {
        let store = self.lock();
        store
            .health
            .clone()
            .ok_or_else(|| BackendError::network("connection refused"))
    }
}

pub fn server_error(message: &str) -> BackendError {
    BackendError::ServerError {
        message: message.to_string(),
        status: 500,
    }
}
