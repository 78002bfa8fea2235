//! Domain layer - capability traits, chains and core types

pub mod chain;
pub mod embedding;
pub mod error;
pub mod ingestion;
pub mod lifecycle;
pub mod llm;
pub mod prompt;
pub mod vector_store;

pub use chain::{PromptChain, RagChain, RagResponse};
pub use embedding::EmbeddingProvider;
pub use error::DomainError;
pub use ingestion::{ChunkingConfig, TextSplitter};
pub use lifecycle::Lifecycle;
pub use llm::{
    ChatModel, FinishReason, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole,
    Usage,
};
pub use prompt::{PromptTemplate, TemplateError};
pub use vector_store::{SearchResult, VectorStore, DEFAULT_TOP_K};
