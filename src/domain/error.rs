use thiserror::Error;

/// Core domain errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("{component} not initialized. Call initialize() first.")]
    NotInitialized { component: String },

    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Template error: {message}")]
    Template { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn not_initialized(component: impl Into<String>) -> Self {
        Self::NotInitialized {
            component: component.into(),
        }
    }

    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Whether this error signals a missing initialization step
    pub fn is_not_initialized(&self) -> bool {
        matches!(self, Self::NotInitialized { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("OPENAI_API_KEY is required");
        assert_eq!(
            error.to_string(),
            "Validation error: OPENAI_API_KEY is required"
        );
    }

    #[test]
    fn test_not_initialized_error() {
        let error = DomainError::not_initialized("ModelManager");
        assert_eq!(
            error.to_string(),
            "ModelManager not initialized. Call initialize() first."
        );
        assert!(error.is_not_initialized());
    }

    #[test]
    fn test_provider_error() {
        let error = DomainError::provider("echo", "boom");
        assert_eq!(error.to_string(), "Provider error: echo - boom");
        assert!(!error.is_not_initialized());
    }
}
