use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    ChatModel, DomainError, FinishReason, LlmRequest, LlmResponse, Message, Usage,
};

/// Prefix placed in front of every echoed reply
pub const ECHO_PREFIX: &str = "Echo: ";

/// Chat model that answers with the last user message, unchanged.
///
/// Stands in for a hosted model until a real provider is wired up. The
/// system prompt and sampling parameters have no effect on the reply.
#[derive(Debug, Clone)]
pub struct EchoChatModel {
    model: String,
}

impl EchoChatModel {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

#[async_trait]
impl ChatModel for EchoChatModel {
    async fn chat(&self, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let input = request.last_user_message().ok_or_else(|| {
            DomainError::provider(self.provider_name(), "Request has no user message")
        })?;

        let reply = format!("{}{}", ECHO_PREFIX, input);
        let usage = Usage::new(estimate_tokens(input), estimate_tokens(&reply));

        Ok(LlmResponse::new(
            format!("echo-{}", Uuid::new_v4()),
            self.model.clone(),
            Message::assistant(reply),
        )
        .with_finish_reason(FinishReason::Stop)
        .with_usage(usage))
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(true)
    }

    fn provider_name(&self) -> &'static str {
        "echo"
    }
}

/// Rough token count at four characters per token
fn estimate_tokens(text: &str) -> u32 {
    text.chars().count().div_ceil(4) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_ignores_system_prompt() {
        let model = EchoChatModel::new("gpt-3.5-turbo");
        let request = LlmRequest::builder()
            .system("ignored system prompt")
            .user("hello")
            .build();

        let response = model.chat(request).await.unwrap();

        assert_eq!(response.content(), "Echo: hello");
        assert_eq!(response.model, "gpt-3.5-turbo");
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
        assert!(response.id.starts_with("echo-"));
    }

    #[tokio::test]
    async fn test_echo_empty_input() {
        let model = EchoChatModel::new("m");
        let response = model
            .chat(LlmRequest::builder().user("").build())
            .await
            .unwrap();

        assert_eq!(response.content(), "Echo: ");
    }

    #[tokio::test]
    async fn test_echo_requires_user_message() {
        let model = EchoChatModel::new("m");
        let result = model
            .chat(LlmRequest::builder().system("only system").build())
            .await;

        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_health_check() {
        assert!(EchoChatModel::new("m").health_check().await.unwrap());
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
    }
}
