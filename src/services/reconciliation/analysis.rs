//! Analysis with Mock Fallback
//!
//! Runs `/simulate` for a draft and substitutes a locally generated mock of
//! the same shape when the call fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use scenario_studio_backend::{
    BackendError, MockAnalysisGenerator, ScenarioBackend, ScenarioDraft, SimulateRequest,
};

/// Where an analysis payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    Remote,
    Mock,
}

impl std::fmt::Display for AnalysisSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisSource::Remote => write!(f, "remote"),
            AnalysisSource::Mock => write!(f, "mock"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub payload: Value,
    pub source: AnalysisSource,
    /// The remote error that triggered the mock, if any
    pub fallback_error: Option<BackendError>,
}

/// Analyze `draft` remotely, falling back to the mock generator on any
/// failure when `fallback_enabled` is set.
pub async fn analyze_with_fallback(
    backend: &dyn ScenarioBackend,
    mock: &MockAnalysisGenerator,
    draft: &ScenarioDraft,
    fallback_enabled: bool,
) -> Result<AnalysisOutcome, BackendError> {
    let request = SimulateRequest::new(draft.scenario_text());
    match backend.analyze(&request).await {
        Ok(payload) => Ok(AnalysisOutcome {
            payload,
            source: AnalysisSource::Remote,
            fallback_error: None,
        }),
        Err(e) if fallback_enabled => {
            warn!(
                backend = backend.name(),
                error = %e,
                "Analysis failed, substituting mock analysis"
            );
            Ok(AnalysisOutcome {
                payload: mock.generate(draft),
                source: AnalysisSource::Mock,
                fallback_error: Some(e),
            })
        }
        Err(e) => Err(e),
    }
}
