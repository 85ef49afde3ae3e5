//! Scenario Studio Backend
//!
//! Client side of the analysis / task-store service:
//! - `ScenarioBackend` trait and the reqwest-based `HttpBackend`
//! - Wire types and `BackendError`
//! - `ScenarioDraft`, the user's input before analysis
//! - Local mock analysis used when the service is unreachable
//! - The HTTP client factory

pub mod backend;
pub mod draft;
pub mod http;
pub mod http_client;
pub mod mock;
pub mod types;

// Re-export main types
pub use backend::ScenarioBackend;
pub use draft::ScenarioDraft;
pub use http::{parse_base_url, HttpBackend, DEFAULT_BACKEND_URL};
pub use http_client::build_http_client;
pub use mock::{recommendation_for, MockAnalysisGenerator};
pub use types::*;
