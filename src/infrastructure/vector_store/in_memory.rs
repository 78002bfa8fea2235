//! In-memory vector store for development and testing

use async_trait::async_trait;

use crate::domain::{DomainError, SearchResult, VectorStore};

/// Score attached to every result returned by [`InMemoryVectorStore`]
pub const PLACEHOLDER_SCORE: f32 = 0.8;

/// Ordered list of raw documents with no index behind it.
///
/// Search ignores the query and returns the first `k` documents, each with
/// [`PLACEHOLDER_SCORE`]. Documents are kept as given, duplicates included.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVectorStore {
    documents: Vec<String>,
}

impl InMemoryVectorStore {
    pub fn new(documents: Vec<String>) -> Self {
        Self { documents }
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn similarity_search(
        &self,
        _query: &str,
        k: usize,
    ) -> Result<Vec<SearchResult>, DomainError> {
        Ok(self
            .documents
            .iter()
            .take(k)
            .map(|doc| SearchResult::new(doc.as_str(), PLACEHOLDER_SCORE))
            .collect())
    }

    fn len(&self) -> usize {
        self.documents.len()
    }

    fn store_type(&self) -> &'static str {
        "in_memory"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::RagChain;

    fn store(docs: &[&str]) -> InMemoryVectorStore {
        InMemoryVectorStore::new(docs.iter().map(|d| d.to_string()).collect())
    }

    #[tokio::test]
    async fn test_search_returns_first_k_with_constant_score() {
        let store = store(&["a", "b", "c"]);

        let results = store.similarity_search("anything", 2).await.unwrap();

        assert_eq!(
            results,
            vec![SearchResult::new("a", 0.8), SearchResult::new("b", 0.8)]
        );
    }

    #[tokio::test]
    async fn test_search_ignores_query() {
        let store = store(&["a", "b", "c"]);

        let first = store.similarity_search("a", 3).await.unwrap();
        let second = store.similarity_search("zzz", 3).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_result_count_is_min_of_k_and_len() {
        let store = store(&["a", "b", "c"]);

        for k in 0..6 {
            let results = store.similarity_search("q", k).await.unwrap();
            assert_eq!(results.len(), k.min(3));
        }
    }

    #[tokio::test]
    async fn test_duplicates_are_kept() {
        let store = store(&["a", "a"]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.similarity_search("q", 4).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = InMemoryVectorStore::default();

        assert!(store.is_empty());
        assert!(store.similarity_search("q", 4).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rag_chain_joins_retrieved_content() {
        let chain = RagChain::new(Arc::new(store(&["first", "second", "third"])), 2);

        let response = chain.invoke("what?").await.unwrap();

        assert_eq!(response.query, "what?");
        assert_eq!(response.result, "first\nsecond");
        assert_eq!(response.source_documents.len(), 2);
    }
}
