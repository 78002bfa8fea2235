//! Vector store trait and search result type

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Number of results returned when the caller does not ask for a specific count
pub const DEFAULT_TOP_K: usize = 4;

/// A document returned from a similarity search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Document content text
    pub content: String,
    /// Similarity score (0.0 - 1.0, higher is more similar)
    pub score: f32,
}

impl SearchResult {
    /// Create a new search result
    pub fn new(content: impl Into<String>, score: f32) -> Self {
        Self {
            content: content.into(),
            score,
        }
    }
}

/// Searchable collection of documents
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Return up to `k` documents ranked by similarity to `query`
    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<SearchResult>, DomainError>;

    /// Number of documents held by the store
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the store type name
    fn store_type(&self) -> &'static str;
}
