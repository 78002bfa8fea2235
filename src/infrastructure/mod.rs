//! Infrastructure layer - capability implementations, logging and services

pub mod embedding;
pub mod ingestion;
pub mod llm;
pub mod logger;
pub mod logging;
pub mod services;
pub mod vector_store;
