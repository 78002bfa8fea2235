//! Prompt template parsing and rendering
//!
//! Placeholders are written as `{name}`. Literal braces are escaped by
//! doubling them: `{{` renders as `{` and `}}` renders as `}`.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

use crate::domain::DomainError;

/// Matches escaped braces or a `{name}` placeholder
static PLACEHOLDER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
});

/// Template processing errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Template is empty")]
    Empty,

    #[error("Missing required variable: {name}")]
    MissingVariable { name: String },
}

impl From<TemplateError> for DomainError {
    fn from(err: TemplateError) -> Self {
        DomainError::template(err.to_string())
    }
}

/// A parsed prompt template
#[derive(Debug, Clone, PartialEq)]
pub struct PromptTemplate {
    template: String,
    input_variables: Vec<String>,
}

impl PromptTemplate {
    /// Parse a template string and collect its input variables in order of appearance
    pub fn parse(template: impl Into<String>) -> Result<Self, TemplateError> {
        let template = template.into();

        if template.trim().is_empty() {
            return Err(TemplateError::Empty);
        }

        let mut input_variables: Vec<String> = Vec::new();

        for cap in PLACEHOLDER_PATTERN.captures_iter(&template) {
            if let Some(name) = cap.get(1) {
                let name = name.as_str();
                if !input_variables.iter().any(|v| v == name) {
                    input_variables.push(name.to_string());
                }
            }
        }

        Ok(Self {
            template,
            input_variables,
        })
    }

    /// Get the raw template text
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Variable names referenced by the template
    pub fn input_variables(&self) -> &[String] {
        &self.input_variables
    }

    /// Render the template, failing on the first variable with no value
    pub fn format(&self, values: &HashMap<String, String>) -> Result<String, TemplateError> {
        if let Some(missing) = self
            .input_variables
            .iter()
            .find(|name| !values.contains_key(*name))
        {
            return Err(TemplateError::MissingVariable {
                name: missing.clone(),
            });
        }

        let rendered = PLACEHOLDER_PATTERN.replace_all(&self.template, |cap: &Captures| {
            match cap.get(1) {
                Some(name) => values
                    .get(name.as_str())
                    .cloned()
                    .unwrap_or_default(),
                None if &cap[0] == "{{" => "{".to_string(),
                None => "}".to_string(),
            }
        });

        Ok(rendered.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_no_variables() {
        let template = PromptTemplate::parse("Hello, world!").unwrap();
        assert!(template.input_variables().is_empty());
    }

    #[test]
    fn test_parse_collects_variables_in_order() {
        let template =
            PromptTemplate::parse("Tell me a {adjective} joke about {topic}, {adjective} please")
                .unwrap();

        assert_eq!(template.input_variables(), &["adjective", "topic"]);
    }

    #[test]
    fn test_parse_empty_template() {
        assert_eq!(PromptTemplate::parse("   "), Err(TemplateError::Empty));
    }

    #[test]
    fn test_format_substitutes_values() {
        let template = PromptTemplate::parse("Tell me a joke about {topic}").unwrap();

        let result = template.format(&values(&[("topic", "rust")])).unwrap();
        assert_eq!(result, "Tell me a joke about rust");
    }

    #[test]
    fn test_format_missing_variable() {
        let template = PromptTemplate::parse("Hello, {name}!").unwrap();

        let result = template.format(&HashMap::new());
        assert_eq!(
            result,
            Err(TemplateError::MissingVariable {
                name: "name".to_string()
            })
        );
    }

    #[test]
    fn test_format_escaped_braces() {
        let template = PromptTemplate::parse("Return {{\"answer\": \"{value}\"}}").unwrap();

        assert_eq!(template.input_variables(), &["value"]);
        let result = template.format(&values(&[("value", "42")])).unwrap();
        assert_eq!(result, "Return {\"answer\": \"42\"}");
    }

    #[test]
    fn test_format_ignores_extra_values() {
        let template = PromptTemplate::parse("Hi {name}").unwrap();

        let result = template
            .format(&values(&[("name", "Ada"), ("unused", "x")]))
            .unwrap();
        assert_eq!(result, "Hi Ada");
    }

    #[test]
    fn test_template_error_converts_to_domain_error() {
        let err: DomainError = TemplateError::Empty.into();
        assert_eq!(err, DomainError::template("Template is empty"));
    }
}
