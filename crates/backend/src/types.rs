//! Backend Types
//!
//! Error type and wire formats for the analysis / task-store service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use scenario_studio_core::{RawRecord, Scenario};

/// Errors from talking to the backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Connection refused, DNS failure, timeout, truncated body
    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    /// 400 / 422 from request validation
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Server error ({status}): {message}")]
    ServerError { message: String, status: u16 },

    /// Any other non-success status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Invalid backend URL: {message}")]
    InvalidUrl { message: String },

    #[error("Failed to build HTTP client: {message}")]
    ClientBuild { message: String },
}

/// Result type alias for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

impl BackendError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// The service could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, BackendError::NetworkError { .. })
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::network(err.to_string())
    }
}

impl From<url::ParseError> for BackendError {
    fn from(err: url::ParseError) -> Self {
        BackendError::InvalidUrl {
            message: err.to_string(),
        }
    }
}

/// Map a non-success status code and body to a `BackendError`.
pub fn parse_http_error(status: u16, body: &str, endpoint: &str) -> BackendError {
    match status {
        404 => BackendError::NotFound {
            message: format!("{}: {}", endpoint, body),
        },
        400 | 422 => BackendError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => BackendError::ServerError {
            message: body.to_string(),
            status,
        },
        _ => BackendError::Http {
            status,
            body: body.to_string(),
        },
    }
}

/// `POST /simulate` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateRequest {
    pub scenario: String,
    /// Always sent, `null` when absent
    pub context: Option<Value>,
}

impl SimulateRequest {
    pub fn new(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            context: None,
        }
    }
}

/// `POST /tasks` body. The service accepts the camelCase aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreate {
    pub name: String,
    pub description: String,
    pub target_market: String,
    pub timeline: String,
    pub resources: Option<String>,
    pub assumptions: Vec<String>,
    pub ai_analysis: Option<Value>,
    pub created_at: Option<String>,
}

impl TaskCreate {
    /// Persistable form of a canonical scenario.
    pub fn from_scenario(scenario: &Scenario) -> BackendResult<Self> {
        let ai_analysis = serde_json::to_value(&scenario.analysis)
            .map_err(|e| BackendError::parse(format!("Failed to encode analysis: {}", e)))?;
        Ok(Self {
            name: scenario.name.clone(),
            description: scenario.description.clone(),
            target_market: scenario.target_market.clone(),
            timeline: scenario.timeline.clone(),
            resources: scenario.resources.clone(),
            assumptions: scenario.assumptions.clone(),
            ai_analysis: Some(ai_analysis),
            created_at: Some(scenario.created_at.to_rfc3339()),
        })
    }
}

/// `GET /tasks/history` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub groups: BTreeMap<String, Vec<Value>>,
}

impl HistoryResponse {
    /// Tag every row as persisted, keeping the day grouping.
    pub fn into_records(self) -> BTreeMap<String, Vec<RawRecord>> {
        self.groups
            .into_iter()
            .map(|(day, rows)| (day, rows.into_iter().map(RawRecord::persisted).collect()))
            .collect()
    }
}

/// `GET /health` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub llm_provider: Option<String>,
    #[serde(default)]
    pub llm_model: Option<String>,
}

impl HealthStatus {
    /// Indicator state for a reachable backend.
    pub fn status(&self) -> BackendStatus {
        match self.llm_provider.as_deref().map(str::trim) {
            Some(provider) if !provider.is_empty() && provider != "mock" => {
                BackendStatus::Connected {
                    provider: provider.to_string(),
                    model: self.llm_model.clone().unwrap_or_default(),
                }
            }
            _ => BackendStatus::Mock,
        }
    }
}

/// Passive status indicator shown next to the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BackendStatus {
    /// Reachable and backed by a real analysis provider
    Connected { provider: String, model: String },
    /// Reachable but analysis is mocked server-side
    Mock,
    /// Unreachable; analyses fall back to the local mock
    #[default]
    Disconnected,
}

impl BackendStatus {
    pub fn message(&self) -> String {
        match self {
            BackendStatus::Connected { provider, model } => {
                format!("Connected to {} ({})", provider, model)
            }
            BackendStatus::Mock => "Using mock data - Backend not configured".to_string(),
            BackendStatus::Disconnected => "Backend not reachable - Using mock data".to_string(),
        }
    }
}
