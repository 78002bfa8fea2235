//! Application configuration loaded from the environment

mod app_config;
mod store;

pub use app_config::{
    AppConfig, AppSettings, ConfigPatch, EmbeddingSettings, LogFormat, LogLevel, LoggingSettings,
    ModelSettings,
};
pub use store::ConfigStore;
