//! HTTP Backend
//!
//! `ScenarioBackend` over the JSON HTTP API.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use scenario_studio_core::RawRecord;

use crate::backend::ScenarioBackend;
use crate::http_client::build_http_client;
use crate::types::{
    parse_http_error, BackendError, BackendResult, HealthStatus, HistoryResponse,
    SimulateRequest, TaskCreate,
};

/// Default backend address
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// HTTP client for the analysis / task-store service
pub struct HttpBackend {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Create a client for `base_url`.
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> BackendResult<Self> {
        let base_url = parse_base_url(base_url)?;
        let client = build_http_client(timeout, user_agent)?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> BackendResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Send a request and decode a successful JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        label: &str,
    ) -> BackendResult<T> {
        tracing::debug!(endpoint = label, "Sending backend request");

        let response = request.send().await.map_err(|e| BackendError::NetworkError {
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| BackendError::NetworkError {
            message: e.to_string(),
        })?;

        if !(200..300).contains(&status) {
            tracing::debug!(endpoint = label, status, "Backend returned error status");
            return Err(parse_http_error(status, &body_text, label));
        }

        serde_json::from_str(&body_text).map_err(|e| BackendError::ParseError {
            message: format!("{}: failed to parse response: {}", label, e),
        })
    }
}

/// Parse and check a base URL; the path gets a trailing slash so endpoint
/// joins append rather than replace.
pub fn parse_base_url(raw: &str) -> BackendResult<Url> {
    let mut url = Url::parse(raw.trim())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(BackendError::InvalidUrl {
            message: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[async_trait]
impl ScenarioBackend for HttpBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn analyze(&self, request: &SimulateRequest) -> BackendResult<Value> {
        let url = self.endpoint("simulate")?;
        self.send_json(self.client.post(url).json(request), "POST /simulate")
            .await
    }

    async fn create_task(&self, task: &TaskCreate) -> BackendResult<RawRecord> {
        let url = self.endpoint("tasks")?;
        let row: Value = self
            .send_json(self.client.post(url).json(task), "POST /tasks")
            .await?;
        Ok(RawRecord::persisted(row))
    }

    async fn fetch_today(&self) -> BackendResult<Vec<RawRecord>> {
        let url = self.endpoint("tasks/today")?;
        let rows: Vec<Value> = self
            .send_json(self.client.get(url), "GET /tasks/today")
            .await?;
        Ok(rows.into_iter().map(RawRecord::persisted).collect())
    }

    async fn fetch_history(&self) -> BackendResult<BTreeMap<String, Vec<RawRecord>>> {
        let url = self.endpoint("tasks/history")?;
        let history: HistoryResponse = self
            .send_json(self.client.get(url), "GET /tasks/history")
            .await?;
        Ok(history.into_records())
    }

    async fn delete_task(&self, id: u64) -> BackendResult<Value> {
        let url = self.endpoint(&format!("tasks/{}", id))?;
        self.send_json(self.client.delete(url), "DELETE /tasks/{id}")
            .await
    }

    async fn health(&self) -> BackendResult<HealthStatus> {
        let url = self.endpoint("health")?;
        self.send_json(self.client.get(url), "GET /health").await
    }
}
