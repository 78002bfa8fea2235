//! Application facade - wires configuration, logger, model manager and
//! orchestration core together and owns the top-level lifecycle

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::config::{AppConfig, ConfigPatch, ConfigStore, LogLevel};
use crate::domain::{DomainError, Lifecycle};
use crate::infrastructure::logger::Logger;
use crate::infrastructure::services::{ModelManager, ModelSet, OrchestrationCore};

const COMPONENT: &str = "Application";

type ModelFactory = Arc<dyn Fn(&AppConfig) -> ModelSet + Send + Sync>;

pub struct Application {
    config_store: ConfigStore,
    logger: Arc<Logger>,
    models: ModelFactory,
    model_manager: Arc<ModelManager>,
    core: Lifecycle<OrchestrationCore>,
}

impl Application {
    /// Console logging and the placeholder models
    pub fn new(config_store: ConfigStore) -> Self {
        let config = config_store.snapshot();
        let logger = Arc::new(Logger::console(config.logging));

        Self::build(config_store, logger, Arc::new(ModelSet::placeholder))
    }

    /// Use `logger` and a fixed set of models instead of the defaults
    pub fn with_models(config_store: ConfigStore, logger: Arc<Logger>, models: ModelSet) -> Self {
        Self::build(config_store, logger, Arc::new(move |_: &AppConfig| models.clone()))
    }

    fn build(config_store: ConfigStore, logger: Arc<Logger>, models: ModelFactory) -> Self {
        let config = config_store.snapshot();
        let model_manager = Arc::new(ModelManager::new(
            config.clone(),
            logger.clone(),
            models(&config),
        ));

        Self {
            config_store,
            logger,
            models,
            model_manager,
            core: Lifecycle::Uninitialized,
        }
    }

    /// Initialize the models and verify the connection.
    ///
    /// A connection test that returns `false` fails with
    /// [`DomainError::ConnectionFailed`] and leaves the application
    /// uninitialized.
    pub async fn initialize(&mut self) -> Result<&OrchestrationCore, DomainError> {
        if self.core.is_ready() {
            self.logger.warn("Application already initialized");
            return self.core.ready(COMPONENT);
        }

        self.logger.info("Initializing application");

        self.model_manager
            .initialize()
            .await
            .inspect_err(|e| self.log_failure(e))?;

        let connected = self
            .model_manager
            .test_connection()
            .await
            .inspect_err(|e| self.log_failure(e))?;

        if !connected {
            let err = DomainError::connection_failed("model connection test returned false");
            self.log_failure(&err);
            return Err(err);
        }

        self.core = Lifecycle::Ready(OrchestrationCore::new(
            self.model_manager.clone(),
            self.logger.clone(),
        ));
        self.logger.info("Application initialized successfully");

        self.core.ready(COMPONENT)
    }

    /// Tear everything down and run the full initialization again,
    /// picking up the current configuration snapshot
    pub async fn reinitialize(&mut self) -> Result<&OrchestrationCore, DomainError> {
        self.logger.info("Reinitializing application");

        self.release().await;
        let config = self.config_store.snapshot();
        debug!(model = %config.model.model_name, "Rebuilding model manager");
        self.model_manager = Arc::new(ModelManager::new(
            config.clone(),
            self.logger.clone(),
            (self.models)(&config),
        ));

        self.initialize().await
    }

    pub async fn shutdown(&mut self) {
        self.logger.info("Shutting down application");
        self.release().await;
    }

    async fn release(&mut self) {
        self.core.reset();
        self.model_manager.reset().await;
    }

    pub fn core(&self) -> Result<&OrchestrationCore, DomainError> {
        self.core.ready(COMPONENT)
    }

    pub fn is_initialized(&self) -> bool {
        self.core.is_ready()
    }

    /// Apply `patch` to the stored configuration. A logging section takes
    /// effect immediately; the rest is picked up by [`Application::reinitialize`].
    pub fn update_config(&self, patch: ConfigPatch) -> Result<Arc<AppConfig>, DomainError> {
        let logging = patch.logging;
        let config = self
            .config_store
            .update(patch)
            .inspect_err(|e| self.log_failure(e))?;

        if let Some(settings) = logging {
            self.logger.apply_settings(settings);
        }
        self.logger.debug("Configuration updated");

        Ok(config)
    }

    /// Change the log threshold in both the logger and the stored configuration
    pub fn set_log_level(&self, level: LogLevel) -> Result<Arc<AppConfig>, DomainError> {
        let mut settings = self.logger.settings();
        settings.level = level;
        self.update_config(ConfigPatch::new().logging(settings))
    }

    /// Switch console output in both the logger and the stored configuration
    pub fn enable_console_logging(&self, enabled: bool) -> Result<Arc<AppConfig>, DomainError> {
        let mut settings = self.logger.settings();
        settings.enable_console = enabled;
        self.update_config(ConfigPatch::new().logging(settings))
    }

    /// Current configuration snapshot
    pub fn config(&self) -> Arc<AppConfig> {
        self.config_store.snapshot()
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn model_manager(&self) -> &Arc<ModelManager> {
        &self.model_manager
    }

    fn log_failure(&self, err: &DomainError) {
        self.logger.error_with(
            "Application initialization failed",
            json!({ "error": err.to_string() }),
        );
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("model_manager", &self.model_manager)
            .field("initialized", &self.core.is_ready())
            .finish()
    }
}
