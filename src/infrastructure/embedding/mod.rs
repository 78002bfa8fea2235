//! Embedding provider implementations

mod random;

pub use random::{RandomEmbeddingProvider, ADA_002_DIMENSIONS};
