//! Settings Models
//!
//! Application configuration and settings data structures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use scenario_studio_backend::{parse_base_url, DEFAULT_BACKEND_URL};

/// Log levels accepted in `log_level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the analysis / task-store service
    pub backend_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Substitute a local mock analysis when `/simulate` fails
    pub mock_fallback_enabled: bool,
    /// Default tracing level when RUST_LOG is unset
    pub log_level: String,
    /// User-Agent header sent to the backend
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    format!("scenario-studio/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: 120,
            mock_fallback_enabled: true,
            log_level: "info".to_string(),
            user_agent: default_user_agent(),
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub backend_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub mock_fallback_enabled: Option<bool>,
    pub log_level: Option<String>,
    pub user_agent: Option<String>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(url) = update.backend_url {
            self.backend_url = url;
        }
        if let Some(timeout) = update.request_timeout_secs {
            self.request_timeout_secs = timeout;
        }
        if let Some(enabled) = update.mock_fallback_enabled {
            self.mock_fallback_enabled = enabled;
        }
        if let Some(level) = update.log_level {
            self.log_level = level;
        }
        if let Some(agent) = update.user_agent {
            self.user_agent = agent;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        parse_base_url(&self.backend_url)
            .map_err(|e| format!("Invalid backend_url '{}': {}", self.backend_url, e))?;

        if !(1..=600).contains(&self.request_timeout_secs) {
            return Err(format!(
                "request_timeout_secs must be between 1 and 600, got {}",
                self.request_timeout_secs
            ));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level: {}. Must be one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent cannot be empty".to_string());
        }

        Ok(())
    }
}
