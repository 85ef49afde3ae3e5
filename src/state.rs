//! Application State
//!
//! Shared state handed to every command: the config service and the
//! reconciliation controller built from it.

use std::sync::Arc;
use tokio::sync::RwLock;

use scenario_studio_backend::{HttpBackend, ScenarioBackend};

use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::services::reconciliation::ReconciliationController;
use crate::storage::ConfigService;
use crate::utils::error::{AppError, AppResult};

/// Application state shared by all commands
pub struct AppState {
    /// Configuration service for app settings
    config: Arc<RwLock<Option<ConfigService>>>,
    /// Dashboard owner, rebuilt around a new backend when settings change
    controller: Arc<RwLock<Option<Arc<ReconciliationController>>>>,
    /// Whether the state has been initialized
    initialized: Arc<RwLock<bool>>,
}

impl AppState {
    /// Create a new uninitialized app state
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            controller: Arc::new(RwLock::new(None)),
            initialized: Arc::new(RwLock::new(false)),
        }
    }

    /// Initialize from the default config file and an HTTP backend
    pub async fn initialize(&self) -> AppResult<()> {
        if *self.initialized.read().await {
            return Ok(());
        }
        let config = ConfigService::new()?;
        let backend = http_backend(config.get_config())?;
        self.initialize_with(config, backend).await
    }

    /// Initialize with an explicit config service and backend.
    /// A second call is a no-op.
    pub async fn initialize_with(
        &self,
        config: ConfigService,
        backend: Arc<dyn ScenarioBackend>,
    ) -> AppResult<()> {
        let mut initialized = self.initialized.write().await;
        if *initialized {
            return Ok(());
        }

        let controller =
            ReconciliationController::new(backend, config.get_config().mock_fallback_enabled);
        *self.controller.write().await = Some(Arc::new(controller));
        *self.config.write().await = Some(config);

        *initialized = true;
        tracing::info!("Application state initialized");
        Ok(())
    }

    pub async fn is_initialized(&self) -> bool {
        *self.initialized.read().await
    }

    /// Get the reconciliation controller
    pub async fn controller(&self) -> AppResult<Arc<ReconciliationController>> {
        let guard = self.controller.read().await;
        match &*guard {
            Some(controller) => Ok(controller.clone()),
            None => Err(AppError::internal("Controller not initialized")),
        }
    }

    /// Check if config is healthy
    pub fn is_config_healthy(&self) -> bool {
        if let Ok(guard) = self.config.try_read() {
            if let Some(ref config) = *guard {
                return config.is_healthy();
            }
        }
        false
    }

    /// Get the current configuration
    pub async fn get_config(&self) -> AppResult<AppConfig> {
        let guard = self.config.read().await;
        match &*guard {
            Some(config) => Ok(config.get_config_clone()),
            None => Err(AppError::config("Config service not initialized")),
        }
    }

    /// Update the configuration and apply it to the running controller.
    ///
    /// A changed backend URL, timeout or user agent swaps in a new HTTP
    /// backend.
    pub async fn update_config(&self, update: SettingsUpdate) -> AppResult<AppConfig> {
        let (previous, updated) = self
            .with_config_mut(|config| {
                let previous = config.get_config_clone();
                let updated = config.update_config(update)?;
                Ok((previous, updated))
            })
            .await?;

        let controller = self.controller().await?;
        controller.set_mock_fallback(updated.mock_fallback_enabled);
        if needs_new_backend(&previous, &updated) {
            tracing::info!(backend_url = %updated.backend_url, "Rebuilding backend client");
            controller.replace_backend(http_backend(&updated)?).await;
        }
        Ok(updated)
    }

    /// Get mutable config service access
    pub async fn with_config_mut<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut ConfigService) -> AppResult<T>,
    {
        let mut guard = self.config.write().await;
        match &mut *guard {
            Some(config) => f(config),
            None => Err(AppError::config("Config service not initialized")),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

/// Build the HTTP backend described by `config`
pub fn http_backend(config: &AppConfig) -> AppResult<Arc<dyn ScenarioBackend>> {
    let backend = HttpBackend::new(
        &config.backend_url,
        config.request_timeout(),
        &config.user_agent,
    )?;
    Ok(Arc::new(backend))
}

fn needs_new_backend(previous: &AppConfig, updated: &AppConfig) -> bool {
    previous.backend_url != updated.backend_url
        || previous.request_timeout_secs != updated.request_timeout_secs
        || previous.user_agent != updated.user_agent
}
