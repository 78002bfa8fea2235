//! llm-shell
//!
//! A starter shell for applications built on a language-model
//! orchestration layer:
//! - Environment-driven configuration with runtime updates
//! - Threshold-filtered console logging
//! - Model lifecycle management behind capability traits
//! - Chat, prompt chains, vector search, RAG, embeddings and text splitting

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::Application;
pub use config::{AppConfig, ConfigStore};
