//! Embedding provider domain trait

mod provider;

pub use provider::EmbeddingProvider;
