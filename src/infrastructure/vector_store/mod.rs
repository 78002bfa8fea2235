//! Vector store implementations

mod in_memory;

pub use in_memory::{InMemoryVectorStore, PLACEHOLDER_SCORE};
