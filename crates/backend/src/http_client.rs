//! HTTP Client Factory
//!
//! Builds the reqwest client shared by every backend call.

use std::time::Duration;

use crate::types::{BackendError, BackendResult};

/// Build a `reqwest::Client` with the request timeout and user agent applied.
///
/// Proxies are not configured; environment proxy variables are ignored so
/// a local backend is always reached directly.
pub fn build_http_client(timeout: Duration, user_agent: &str) -> BackendResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .no_proxy()
        .build()
        .map_err(|e| BackendError::ClientBuild {
            message: e.to_string(),
        })
}
