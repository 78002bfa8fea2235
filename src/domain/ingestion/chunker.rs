//! Text splitter trait and chunking configuration

use serde::{Deserialize, Serialize};

use crate::config::EmbeddingSettings;
use crate::domain::DomainError;

/// Configuration for chunking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Requested overlap between consecutive chunks in characters
    pub chunk_overlap: usize,
}

impl ChunkingConfig {
    /// Create a new chunking configuration
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.chunk_size == 0 {
            return Err(DomainError::validation("chunk_size must be greater than 0"));
        }

        Ok(())
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl From<&EmbeddingSettings> for ChunkingConfig {
    fn from(settings: &EmbeddingSettings) -> Self {
        Self::new(settings.chunk_size, settings.chunk_overlap)
    }
}

/// Trait for text splitting strategies
pub trait TextSplitter: Send + Sync {
    /// Split content into chunks
    fn split(&self, content: &str) -> Result<Vec<String>, DomainError>;

    /// Get the configuration this splitter was built with
    fn config(&self) -> ChunkingConfig;

    /// Get the strategy name
    fn name(&self) -> &'static str;
}
