//! Text splitting domain

mod chunker;

pub use chunker::{ChunkingConfig, TextSplitter};
