//! Retrieval chain over a vector store

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::vector_store::{SearchResult, VectorStore};
use crate::domain::DomainError;

/// Answer produced by a RAG chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagResponse {
    pub query: String,
    /// Retrieved document contents joined by newlines
    pub result: String,
    pub source_documents: Vec<SearchResult>,
}

/// Retrieves documents for a query and folds them into a single answer
pub struct RagChain {
    store: Arc<dyn VectorStore>,
    k: usize,
}

impl RagChain {
    pub fn new(store: Arc<dyn VectorStore>, k: usize) -> Self {
        Self { store, k }
    }

    pub fn top_k(&self) -> usize {
        self.k
    }

    pub async fn invoke(&self, query: &str) -> Result<RagResponse, DomainError> {
        let source_documents = self.store.similarity_search(query, self.k).await?;

        let result = source_documents
            .iter()
            .map(|doc| doc.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(RagResponse {
            query: query.to_string(),
            result,
            source_documents,
        })
    }
}

impl std::fmt::Debug for RagChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagChain")
            .field("store", &self.store.store_type())
            .field("documents", &self.store.len())
            .field("k", &self.k)
            .finish()
    }
}
