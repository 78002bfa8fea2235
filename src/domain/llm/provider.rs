use async_trait::async_trait;

use super::{LlmRequest, LlmResponse};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Chat completion capability (OpenAI, Anthropic, local echo, etc.)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send a chat completion request
    async fn chat(&self, request: LlmRequest) -> Result<LlmResponse, DomainError>;

    /// Check that the backing model is reachable
    async fn health_check(&self) -> Result<bool, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
