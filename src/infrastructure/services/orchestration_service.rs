//! Orchestration core - chat, chains, vector search, embeddings and splitting
//! on top of the model manager

use std::sync::Arc;

use serde_json::json;
use tracing::instrument;

use super::model_manager::ModelManager;
use crate::config::AppConfig;
use crate::domain::{
    DomainError, LlmRequest, PromptChain, PromptTemplate, RagChain, SearchResult, VectorStore,
    DEFAULT_TOP_K,
};
use crate::infrastructure::logger::Logger;
use crate::infrastructure::vector_store::InMemoryVectorStore;

/// Entry point for model-backed operations.
///
/// Every operation fails with [`DomainError::NotInitialized`] until the
/// model manager has been initialized. Errors are logged here and returned
/// unchanged.
pub struct OrchestrationCore {
    models: Arc<ModelManager>,
    logger: Arc<Logger>,
}

impl OrchestrationCore {
    pub fn new(models: Arc<ModelManager>, logger: Arc<Logger>) -> Self {
        Self { models, logger }
    }

    pub fn model_manager(&self) -> &Arc<ModelManager> {
        &self.models
    }

    fn config(&self) -> &AppConfig {
        self.models.config()
    }

    /// Log a failed step and hand the error back untouched
    fn logged<T>(
        &self,
        operation: &str,
        result: Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        if let Err(e) = &result {
            self.logger.error_with(
                format!("{} failed", operation),
                json!({ "error": e.to_string() }),
            );
        }
        result
    }

    /// Send a single message to the chat model and return its reply
    #[instrument(skip(self, message, system_prompt))]
    pub async fn simple_chat(
        &self,
        message: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, DomainError> {
        self.logger.debug_with(
            "Processing chat message",
            json!({
                "length": message.chars().count(),
                "has_system_prompt": system_prompt.is_some(),
            }),
        );

        let chat = self.logged("Chat", self.models.chat_model().await)?;

        let request = LlmRequest::builder()
            .system_opt(system_prompt)
            .user(message)
            .temperature(self.config().model.temperature)
            .max_tokens(self.config().model.max_tokens)
            .build();

        let response = self.logged("Chat", chat.chat(request).await)?;

        self.logger.info("Chat response generated");
        Ok(response.content().to_string())
    }

    /// Bind a `{variable}` template to the chat model
    pub async fn create_prompt_chain(&self, template: &str) -> Result<PromptChain, DomainError> {
        self.logger.debug("Creating prompt chain");

        let chat = self.logged("Prompt chain creation", self.models.chat_model().await)?;
        let template = self.logged(
            "Prompt chain creation",
            PromptTemplate::parse(template).map_err(DomainError::from),
        )?;

        let chain = PromptChain::new(template, chat).with_generation(
            self.config().model.temperature,
            self.config().model.max_tokens,
        );

        self.logger.info_with(
            "Prompt chain created",
            json!({ "input_variables": chain.template().input_variables() }),
        );
        Ok(chain)
    }

    /// Build a store over `documents`, kept in the order given
    pub async fn create_vector_store(
        &self,
        documents: Vec<String>,
    ) -> Result<InMemoryVectorStore, DomainError> {
        self.logger
            .debug_with("Creating vector store", json!({ "documents": documents.len() }));

        self.logged("Vector store creation", self.models.embeddings().await)?;

        let store = InMemoryVectorStore::new(documents);

        self.logger
            .info_with("Vector store created", json!({ "documents": store.len() }));
        Ok(store)
    }

    /// Build a retrieval chain over a fresh store of `documents`
    pub async fn create_rag_chain(&self, documents: Vec<String>) -> Result<RagChain, DomainError> {
        self.logger.debug("Creating RAG chain");

        let store = self.create_vector_store(documents).await?;
        let chain = RagChain::new(Arc::new(store), DEFAULT_TOP_K);

        self.logger
            .info_with("RAG chain created", json!({ "top_k": chain.top_k() }));
        Ok(chain)
    }

    /// Search `store` for the `k` documents closest to `query`
    pub async fn similarity_search(
        &self,
        store: &dyn VectorStore,
        query: &str,
        k: usize,
    ) -> Result<Vec<SearchResult>, DomainError> {
        self.logger
            .debug_with("Running similarity search", json!({ "k": k }));

        self.logged("Similarity search", self.models.embeddings().await)?;
        let results = self.logged("Similarity search", store.similarity_search(query, k).await)?;

        self.logger
            .info_with("Similarity search completed", json!({ "results": results.len() }));
        Ok(results)
    }

    /// Embed `text` with the configured embedding provider
    pub async fn get_embeddings(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        self.logger.debug("Generating embeddings");

        let provider = self.logged("Embedding generation", self.models.embeddings().await)?;
        let vector = self.logged("Embedding generation", provider.embed(text).await)?;

        self.logger
            .info_with("Embeddings generated", json!({ "dimensions": vector.len() }));
        Ok(vector)
    }

    /// Split `text` into chunks of `embeddings.chunk_size` characters
    pub async fn split_text(&self, text: &str) -> Result<Vec<String>, DomainError> {
        self.logger.debug("Splitting text");

        let splitter = self.logged("Text splitting", self.models.text_splitter().await)?;
        let chunks = self.logged("Text splitting", splitter.split(text))?;

        self.logger
            .info_with("Text split", json!({ "chunks": chunks.len() }));
        Ok(chunks)
    }
}

impl std::fmt::Debug for OrchestrationCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrchestrationCore")
            .field("models", &self.models)
            .finish()
    }
}
