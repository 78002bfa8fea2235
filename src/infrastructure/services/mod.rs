//! Infrastructure services

mod model_manager;
mod orchestration_service;

pub use model_manager::{
    ModelInfo, ModelManager, ModelSet, DEFAULT_CONNECTION_DELAY, DEFAULT_INIT_DELAY,
};
pub use orchestration_service::OrchestrationCore;
