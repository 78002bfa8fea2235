//! Vector store domain - search results and the store capability

mod store;

pub use store::{SearchResult, VectorStore, DEFAULT_TOP_K};
