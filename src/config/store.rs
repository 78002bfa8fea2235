//! Holder for the current configuration snapshot

use std::sync::{Arc, PoisonError, RwLock};

use super::{AppConfig, ConfigPatch};
use crate::domain::DomainError;

/// Owns the current configuration and hands out immutable snapshots.
///
/// A snapshot taken before [`ConfigStore::update`] keeps its old values;
/// call [`ConfigStore::snapshot`] again to observe the update.
#[derive(Debug)]
pub struct ConfigStore {
    current: RwLock<Arc<AppConfig>>,
}

impl ConfigStore {
    pub fn new(config: AppConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// Build a store from the process environment
    pub fn from_env() -> Result<Self, DomainError> {
        Ok(Self::new(AppConfig::from_env()?))
    }

    /// Current configuration snapshot
    pub fn snapshot(&self) -> Arc<AppConfig> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Merge `patch` into the current configuration.
    ///
    /// On validation failure the stored configuration is left untouched.
    pub fn update(&self, patch: ConfigPatch) -> Result<Arc<AppConfig>, DomainError> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let merged = Arc::new(current.merge(patch)?);
        *current = merged.clone();

        tracing::debug!(model = %merged.model.model_name, "Configuration updated");
        Ok(merged)
    }
}
