//! Model manager - owns the chat, embedding and splitter capabilities and
//! gates access to them behind an initialization step

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::config::AppConfig;
use crate::domain::{
    ChatModel, ChunkingConfig, DomainError, EmbeddingProvider, Lifecycle, TextSplitter,
};
use crate::infrastructure::embedding::RandomEmbeddingProvider;
use crate::infrastructure::ingestion::FixedSizeSplitter;
use crate::infrastructure::llm::EchoChatModel;
use crate::infrastructure::logger::Logger;

const COMPONENT: &str = "ModelManager";

/// Simulated time taken to set up the models
pub const DEFAULT_INIT_DELAY: Duration = Duration::from_millis(100);

/// Simulated round-trip of the connection test
pub const DEFAULT_CONNECTION_DELAY: Duration = Duration::from_millis(50);

/// The capabilities handed out once the manager is initialized
#[derive(Clone)]
pub struct ModelSet {
    pub chat: Arc<dyn ChatModel>,
    pub embeddings: Arc<dyn EmbeddingProvider>,
    pub splitter: Arc<dyn TextSplitter>,
}

impl ModelSet {
    pub fn new(
        chat: Arc<dyn ChatModel>,
        embeddings: Arc<dyn EmbeddingProvider>,
        splitter: Arc<dyn TextSplitter>,
    ) -> Self {
        Self {
            chat,
            embeddings,
            splitter,
        }
    }

    /// Local stand-ins built from configuration: echo chat, random
    /// embeddings and a fixed-size splitter
    pub fn placeholder(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(EchoChatModel::new(&config.model.model_name)),
            Arc::new(RandomEmbeddingProvider::new(&config.embeddings.model_name)),
            Arc::new(FixedSizeSplitter::new(ChunkingConfig::from(
                &config.embeddings,
            ))),
        )
    }

    /// Replace the chat model
    pub fn with_chat(mut self, chat: Arc<dyn ChatModel>) -> Self {
        self.chat = chat;
        self
    }
}

impl std::fmt::Debug for ModelSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSet")
            .field("chat", &self.chat.provider_name())
            .field("embeddings", &self.embeddings.provider_name())
            .field("splitter", &self.splitter.name())
            .finish()
    }
}

/// Model parameters reported for diagnostics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub model_name: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub embedding_model: String,
}

/// Owns the model capabilities and their lifecycle
pub struct ModelManager {
    config: Arc<AppConfig>,
    logger: Arc<Logger>,
    providers: ModelSet,
    state: RwLock<Lifecycle<ModelSet>>,
    init_delay: Duration,
    connection_delay: Duration,
    initializations: AtomicUsize,
}

impl ModelManager {
    /// Create a manager; nothing is usable until [`ModelManager::initialize`] runs
    pub fn new(config: Arc<AppConfig>, logger: Arc<Logger>, providers: ModelSet) -> Self {
        Self {
            config,
            logger,
            providers,
            state: RwLock::new(Lifecycle::Uninitialized),
            init_delay: DEFAULT_INIT_DELAY,
            connection_delay: DEFAULT_CONNECTION_DELAY,
            initializations: AtomicUsize::new(0),
        }
    }

    pub fn with_init_delay(mut self, delay: Duration) -> Self {
        self.init_delay = delay;
        self
    }

    pub fn with_connection_delay(mut self, delay: Duration) -> Self {
        self.connection_delay = delay;
        self
    }

    pub fn config(&self) -> &Arc<AppConfig> {
        &self.config
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Bring the models up. Calling it again once ready only logs a warning.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<ModelSet, DomainError> {
        let mut state = self.state.write().await;

        if let Lifecycle::Ready(models) = &*state {
            self.logger.warn("ModelManager already initialized");
            return Ok(models.clone());
        }

        self.logger.info_with(
            "Initializing models",
            json!({
                "model": self.config.model.model_name,
                "embedding_model": self.config.embeddings.model_name,
            }),
        );

        tokio::time::sleep(self.init_delay).await;

        let models = self.providers.clone();
        *state = Lifecycle::Ready(models.clone());
        self.initializations.fetch_add(1, Ordering::Relaxed);

        debug!(?models, "Model set ready");
        self.logger.info("Models initialized successfully");

        Ok(models)
    }

    /// Probe the chat model. Does not require or change the lifecycle state.
    #[instrument(skip(self))]
    pub async fn test_connection(&self) -> Result<bool, DomainError> {
        self.logger.info("Testing model connection");

        tokio::time::sleep(self.connection_delay).await;

        match self.providers.chat.health_check().await {
            Ok(true) => {
                self.logger.info("Model connection test successful");
                Ok(true)
            }
            Ok(false) => {
                self.logger.warn("Model connection test returned false");
                Ok(false)
            }
            Err(e) => {
                self.logger.error_with(
                    "Model connection test failed",
                    json!({ "error": e.to_string() }),
                );
                Err(e)
            }
        }
    }

    /// Drop back to uninitialized and initialize again. The connection test is not re-run.
    pub async fn reinitialize(&self) -> Result<ModelSet, DomainError> {
        self.logger.info("Reinitializing models");
        self.reset().await;
        self.initialize().await
    }

    /// Drop back to uninitialized
    pub async fn reset(&self) {
        if self.state.write().await.reset().is_some() {
            debug!("Model set released");
        }
    }

    pub async fn is_initialized(&self) -> bool {
        self.state.read().await.is_ready()
    }

    /// Number of initializations that ran to completion
    pub fn initialization_count(&self) -> usize {
        self.initializations.load(Ordering::Relaxed)
    }

    /// All capabilities at once
    pub async fn models(&self) -> Result<ModelSet, DomainError> {
        self.state.read().await.ready(COMPONENT).cloned()
    }

    pub async fn chat_model(&self) -> Result<Arc<dyn ChatModel>, DomainError> {
        Ok(self.state.read().await.ready(COMPONENT)?.chat.clone())
    }

    pub async fn embeddings(&self) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        Ok(self.state.read().await.ready(COMPONENT)?.embeddings.clone())
    }

    pub async fn text_splitter(&self) -> Result<Arc<dyn TextSplitter>, DomainError> {
        Ok(self.state.read().await.ready(COMPONENT)?.splitter.clone())
    }

    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            model_name: self.config.model.model_name.clone(),
            temperature: self.config.model.temperature,
            max_tokens: self.config.model.max_tokens,
            embedding_model: self.config.embeddings.model_name.clone(),
        }
    }
}

impl std::fmt::Debug for ModelManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelManager")
            .field("model", &self.config.model.model_name)
            .field("providers", &self.providers)
            .field("initializations", &self.initialization_count())
            .finish()
    }
}
