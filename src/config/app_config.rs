use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 1000;
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
const DEFAULT_CHUNK_SIZE: usize = 1000;
const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub model: ModelSettings,
    pub embeddings: EmbeddingSettings,
    pub logging: LoggingSettings,
    #[serde(default)]
    pub app: AppSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    pub api_key: String,
    pub model_name: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    pub model_name: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: LogLevel,
    pub enable_console: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Run the demonstration sequence instead of the plain startup
    pub run_examples: bool,
    /// Output format for internal diagnostics
    pub log_format: LogFormat,
}

/// Severity of a log record, ordered from least to most severe
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [Self::Debug, Self::Info, Self::Warn, Self::Error];

    /// Uppercase tag used in formatted log lines
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_tag().to_lowercase())
    }
}

impl FromStr for LogLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(DomainError::configuration(format!(
                "LOG_LEVEL must be one of debug, info, warn, error; got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(DomainError::configuration(format!(
                "LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                other
            ))),
        }
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_EMBEDDING_MODEL.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            enable_console: true,
        }
    }
}

impl ModelSettings {
    /// Default model settings around the given API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model_name: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Raw environment values, all optional strings
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EnvValues {
    openai_api_key: Option<String>,
    openai_model: Option<String>,
    openai_temperature: Option<String>,
    openai_max_tokens: Option<String>,
    embedding_model: Option<String>,
    chunk_size: Option<String>,
    chunk_overlap: Option<String>,
    log_level: Option<String>,
    enable_console_logging: Option<String>,
    run_examples: Option<String>,
    log_format: Option<String>,
}

impl AppConfig {
    /// Load configuration from the process environment (and `.env`, if present)
    pub fn from_env() -> Result<Self, DomainError> {
        dotenvy::dotenv().ok();
        Self::load(config::Environment::default())
    }

    /// Load configuration from an explicit variable map instead of the process environment
    pub fn from_env_map(vars: HashMap<String, String>) -> Result<Self, DomainError> {
        Self::load(config::Environment::default().source(Some(vars.into_iter().collect())))
    }

    /// Default configuration around the given API key
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, DomainError> {
        let config = Self {
            model: ModelSettings::with_api_key(api_key),
            embeddings: EmbeddingSettings::default(),
            logging: LoggingSettings::default(),
            app: AppSettings::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Empty variables count as unset and fall back to their defaults
    fn load(source: config::Environment) -> Result<Self, DomainError> {
        let values: EnvValues = config::Config::builder()
            .add_source(source.ignore_empty(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| DomainError::configuration(e.to_string()))?;

        let config = Self::from_values(values)?;
        config.validate()?;
        Ok(config)
    }

    fn from_values(values: EnvValues) -> Result<Self, DomainError> {
        let model = ModelSettings {
            api_key: values.openai_api_key.unwrap_or_default(),
            model_name: values
                .openai_model
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: parse_or(
                "OPENAI_TEMPERATURE",
                values.openai_temperature,
                DEFAULT_TEMPERATURE,
            )?,
            max_tokens: parse_or(
                "OPENAI_MAX_TOKENS",
                values.openai_max_tokens,
                DEFAULT_MAX_TOKENS,
            )?,
        };

        let embeddings = EmbeddingSettings {
            model_name: values
                .embedding_model
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            chunk_size: parse_or("CHUNK_SIZE", values.chunk_size, DEFAULT_CHUNK_SIZE)?,
            chunk_overlap: parse_or(
                "CHUNK_OVERLAP",
                values.chunk_overlap,
                DEFAULT_CHUNK_OVERLAP,
            )?,
        };

        let logging = LoggingSettings {
            level: match values.log_level {
                Some(level) => level.parse()?,
                None => LogLevel::default(),
            },
            enable_console: values.enable_console_logging.as_deref() != Some("false"),
        };

        let app = AppSettings {
            run_examples: values.run_examples.as_deref() == Some("true"),
            log_format: match values.log_format {
                Some(format) => format.parse()?,
                None => LogFormat::default(),
            },
        };

        Ok(Self {
            model,
            embeddings,
            logging,
            app,
        })
    }

    /// Check the invariants every configuration must hold
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.model.api_key.trim().is_empty() {
            return Err(DomainError::validation(
                "OPENAI_API_KEY is required. Set it in the environment or a .env file.",
            ));
        }

        Ok(())
    }

    /// Shallow-merge `patch` into a copy of this configuration and validate the result
    pub fn merge(&self, patch: ConfigPatch) -> Result<Self, DomainError> {
        let merged = Self {
            model: patch.model.unwrap_or_else(|| self.model.clone()),
            embeddings: patch.embeddings.unwrap_or_else(|| self.embeddings.clone()),
            logging: patch.logging.unwrap_or(self.logging),
            app: patch.app.unwrap_or(self.app),
        };

        merged.validate()?;
        Ok(merged)
    }
}

fn parse_or<T: FromStr>(name: &str, value: Option<String>, default: T) -> Result<T, DomainError> {
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            DomainError::configuration(format!("{} has an invalid value: '{}'", name, raw))
        }),
    }
}

/// Partial update applied with [`AppConfig::merge`]; each `Some` section replaces the whole section
#[derive(Debug, Clone, Default)]
pub struct ConfigPatch {
    pub model: Option<ModelSettings>,
    pub embeddings: Option<EmbeddingSettings>,
    pub logging: Option<LoggingSettings>,
    pub app: Option<AppSettings>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: ModelSettings) -> Self {
        self.model = Some(model);
        self
    }

    pub fn embeddings(mut self, embeddings: EmbeddingSettings) -> Self {
        self.embeddings = Some(embeddings);
        self
    }

    pub fn logging(mut self, logging: LoggingSettings) -> Self {
        self.logging = Some(logging);
        self
    }

    pub fn app(mut self, app: AppSettings) -> Self {
        self.app = Some(app);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_with_only_api_key() {
        let config = AppConfig::from_env_map(env(&[("OPENAI_API_KEY", "sk-test")])).unwrap();

        assert_eq!(config.model.api_key, "sk-test");
        assert_eq!(config.model.model_name, "gpt-3.5-turbo");
        assert_eq!(config.model.temperature, 0.7);
        assert_eq!(config.model.max_tokens, 1000);
        assert_eq!(config.embeddings.model_name, "text-embedding-ada-002");
        assert_eq!(config.embeddings.chunk_size, 1000);
        assert_eq!(config.embeddings.chunk_overlap, 200);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(config.logging.enable_console);
        assert!(!config.app.run_examples);
        assert_eq!(config.app.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = AppConfig::from_env_map(env(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", ""),
            ("OPENAI_TEMPERATURE", ""),
            ("CHUNK_SIZE", ""),
            ("LOG_LEVEL", ""),
            ("ENABLE_CONSOLE_LOGGING", ""),
            ("LOG_FORMAT", ""),
        ]))
        .unwrap();

        assert_eq!(config.model.model_name, "gpt-3.5-turbo");
        assert_eq!(config.model.temperature, 0.7);
        assert_eq!(config.embeddings.chunk_size, 1000);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(config.logging.enable_console);
        assert_eq!(config.app.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_empty_api_key_is_missing() {
        let result = AppConfig::from_env_map(env(&[("OPENAI_API_KEY", "")]));
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_all_values_from_env() {
        let config = AppConfig::from_env_map(env(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4"),
            ("OPENAI_TEMPERATURE", "0.2"),
            ("OPENAI_MAX_TOKENS", "256"),
            ("EMBEDDING_MODEL", "text-embedding-3-small"),
            ("CHUNK_SIZE", "500"),
            ("CHUNK_OVERLAP", "50"),
            ("LOG_LEVEL", "debug"),
            ("ENABLE_CONSOLE_LOGGING", "false"),
            ("RUN_EXAMPLES", "true"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.model.model_name, "gpt-4");
        assert_eq!(config.model.temperature, 0.2);
        assert_eq!(config.model.max_tokens, 256);
        assert_eq!(config.embeddings.model_name, "text-embedding-3-small");
        assert_eq!(config.embeddings.chunk_size, 500);
        assert_eq!(config.embeddings.chunk_overlap, 50);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(!config.logging.enable_console);
        assert!(config.app.run_examples);
        assert_eq!(config.app.log_format, LogFormat::Json);
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let result = AppConfig::from_env_map(HashMap::new());
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_blank_api_key_fails_validation() {
        let result = AppConfig::from_env_map(env(&[("OPENAI_API_KEY", "   ")]));
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_console_logging_only_disabled_by_literal_false() {
        for (value, expected) in [("false", false), ("FALSE", true), ("0", true), ("no", true)] {
            let config = AppConfig::from_env_map(env(&[
                ("OPENAI_API_KEY", "sk-test"),
                ("ENABLE_CONSOLE_LOGGING", value),
            ]))
            .unwrap();
            assert_eq!(config.logging.enable_console, expected, "value {:?}", value);
        }
    }

    #[test]
    fn test_run_examples_only_enabled_by_literal_true() {
        for (value, expected) in [("true", true), ("TRUE", false), ("1", false)] {
            let config = AppConfig::from_env_map(env(&[
                ("OPENAI_API_KEY", "sk-test"),
                ("RUN_EXAMPLES", value),
            ]))
            .unwrap();
            assert_eq!(config.app.run_examples, expected, "value {:?}", value);
        }
    }

    #[test]
    fn test_invalid_number_is_configuration_error() {
        let result = AppConfig::from_env_map(env(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("CHUNK_SIZE", "lots"),
        ]));

        match result {
            Err(DomainError::Configuration { message }) => assert!(message.contains("CHUNK_SIZE")),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_log_level() {
        let result = AppConfig::from_env_map(env(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("LOG_LEVEL", "verbose"),
        ]));
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_log_level_ordering_and_parsing() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);

        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        for level in LogLevel::ALL {
            assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_merge_replaces_whole_section() {
        let config = AppConfig::with_api_key("sk-test").unwrap();

        let merged = config
            .merge(ConfigPatch::new().embeddings(EmbeddingSettings {
                model_name: "custom".into(),
                chunk_size: 5,
                chunk_overlap: 0,
            }))
            .unwrap();

        assert_eq!(merged.embeddings.chunk_size, 5);
        assert_eq!(merged.embeddings.model_name, "custom");
        assert_eq!(merged.model, config.model);
    }

    #[test]
    fn test_merge_revalidates() {
        let config = AppConfig::with_api_key("sk-test").unwrap();

        let result = config.merge(ConfigPatch::new().model(ModelSettings::with_api_key("")));
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
}
