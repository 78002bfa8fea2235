//! Prompt template bound to a chat model

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::llm::{ChatModel, LlmRequest};
use crate::domain::prompt::PromptTemplate;
use crate::domain::DomainError;

/// Renders a template and sends the result to a chat model
pub struct PromptChain {
    template: PromptTemplate,
    chat: Arc<dyn ChatModel>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl PromptChain {
    pub fn new(template: PromptTemplate, chat: Arc<dyn ChatModel>) -> Self {
        Self {
            template,
            chat,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the sampling parameters passed with every invocation
    pub fn with_generation(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = Some(temperature);
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Render the template with `values` and return the model's reply
    pub async fn invoke(&self, values: &HashMap<String, String>) -> Result<String, DomainError> {
        let prompt = self.template.format(values)?;

        let mut builder = LlmRequest::builder().user(prompt);
        if let Some(temperature) = self.temperature {
            builder = builder.temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }

        let response = self.chat.chat(builder.build()).await?;
        Ok(response.content().to_string())
    }
}

impl std::fmt::Debug for PromptChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptChain")
            .field("template", &self.template)
            .field("provider", &self.chat.provider_name())
            .finish()
    }
}
