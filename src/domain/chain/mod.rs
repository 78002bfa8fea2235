//! Chains - prompt templates and retrieval bound to a capability

mod prompt_chain;
mod rag_chain;

pub use prompt_chain::PromptChain;
pub use rag_chain::{RagChain, RagResponse};
