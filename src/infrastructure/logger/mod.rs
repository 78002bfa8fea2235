//! Threshold-gated application logger
//!
//! Lines look like `[2024-01-01T00:00:00.000Z] [INFO] message {"key":"value"}`.
//! Each [`Logger`] owns its own tracing dispatcher, so application lines never
//! mix with the diagnostics subscriber installed by
//! [`crate::infrastructure::logging::init_logging`].

mod format;
mod sink;

pub use format::LineFormat;
pub use sink::{MemorySink, MemoryWriter};

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use tracing::level_filters::LevelFilter;
use tracing::{Dispatch, Level};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Registry, reload};

use crate::config::{LogLevel, LoggingSettings};

const LOG_TARGET: &str = "llm_shell::app";

/// A single log entry, formatted and discarded immediately
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub payload: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    pub fn new(level: LogLevel, message: impl Into<String>, payload: Option<Value>) -> Self {
        Self {
            level,
            message: message.into(),
            payload,
            timestamp: Utc::now(),
        }
    }

    pub fn format(&self) -> String {
        let mut line = format!(
            "[{}] [{}] {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.level.as_tag(),
            self.message
        );

        if let Some(payload) = &self.payload {
            line.push(' ');
            line.push_str(&payload.to_string());
        }

        line
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

fn level_from_tracing(level: &Level) -> LogLevel {
    if *level == Level::ERROR {
        LogLevel::Error
    } else if *level == Level::WARN {
        LogLevel::Warn
    } else if *level == Level::INFO {
        LogLevel::Info
    } else {
        LogLevel::Debug
    }
}

/// Filter applied by the dispatcher for `settings`
fn effective_filter(settings: LoggingSettings) -> LevelFilter {
    if settings.enable_console {
        settings.level.into()
    } else {
        LevelFilter::OFF
    }
}

macro_rules! emit {
    ($level:expr, $message:expr, $payload:expr) => {
        match $payload {
            Some(payload) => {
                tracing::event!(target: LOG_TARGET, $level, payload = %payload, "{}", $message)
            }
            None => tracing::event!(target: LOG_TARGET, $level, "{}", $message),
        }
    };
}

/// Logger shared by every component through `Arc<Logger>`.
///
/// Threshold and console switch are runtime-mutable; a change made through
/// one handle is seen by all of them.
pub struct Logger {
    settings: Mutex<LoggingSettings>,
    filter: reload::Handle<LevelFilter, Registry>,
    dispatch: Dispatch,
}

impl Logger {
    /// Logger writing formatted lines to `writer`
    pub fn new<W>(settings: LoggingSettings, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let (filter, handle) = reload::Layer::new(effective_filter(settings));
        let subscriber = tracing_subscriber::registry().with(filter).with(
            fmt::layer()
                .event_format(LineFormat)
                .with_writer(BoxMakeWriter::new(writer)),
        );

        Self {
            settings: Mutex::new(settings),
            filter: handle,
            dispatch: Dispatch::new(subscriber),
        }
    }

    /// Logger writing warnings and errors to stderr, everything else to stdout
    pub fn console(settings: LoggingSettings) -> Self {
        Self::new(
            settings,
            std::io::stderr
                .with_max_level(Level::WARN)
                .or_else(std::io::stdout),
        )
    }

    pub fn settings(&self) -> LoggingSettings {
        *self.settings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn level(&self) -> LogLevel {
        self.settings().level
    }

    pub fn set_log_level(&self, level: LogLevel) {
        self.update(|settings| settings.level = level);
    }

    pub fn enable_console_logging(&self, enabled: bool) {
        self.update(|settings| settings.enable_console = enabled);
    }

    /// Replace both the threshold and the console switch
    pub fn apply_settings(&self, settings: LoggingSettings) {
        self.update(|current| *current = settings);
    }

    fn update(&self, change: impl FnOnce(&mut LoggingSettings)) {
        let mut settings = self.settings.lock().unwrap_or_else(PoisonError::into_inner);
        change(&mut settings);

        if let Err(e) = self.filter.reload(effective_filter(*settings)) {
            tracing::warn!(error = %e, "Failed to reload log filter");
        }
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        let settings = self.settings();
        settings.enable_console && level >= settings.level
    }

    pub fn log(&self, level: LogLevel, message: &str, payload: Option<Value>) {
        if !self.should_log(level) {
            return;
        }

        tracing::dispatcher::with_default(&self.dispatch, || match level {
            LogLevel::Debug => emit!(Level::DEBUG, message, payload),
            LogLevel::Info => emit!(Level::INFO, message, payload),
            LogLevel::Warn => emit!(Level::WARN, message, payload),
            LogLevel::Error => emit!(Level::ERROR, message, payload),
        });
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message.as_ref(), None);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message.as_ref(), None);
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message.as_ref(), None);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message.as_ref(), None);
    }

    pub fn debug_with(&self, message: impl AsRef<str>, payload: Value) {
        self.log(LogLevel::Debug, message.as_ref(), Some(payload));
    }

    pub fn info_with(&self, message: impl AsRef<str>, payload: Value) {
        self.log(LogLevel::Info, message.as_ref(), Some(payload));
    }

    pub fn warn_with(&self, message: impl AsRef<str>, payload: Value) {
        self.log(LogLevel::Warn, message.as_ref(), Some(payload));
    }

    pub fn error_with(&self, message: impl AsRef<str>, payload: Value) {
        self.log(LogLevel::Error, message.as_ref(), Some(payload));
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("settings", &self.settings())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn memory_logger(level: LogLevel, enable_console: bool) -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::new(
            LoggingSettings {
                level,
                enable_console,
            },
            sink.clone(),
        );
        (logger, sink)
    }

    #[test]
    fn test_threshold_matrix() {
        for threshold in LogLevel::ALL {
            for level in LogLevel::ALL {
                let (logger, sink) = memory_logger(threshold, true);

                logger.log(level, "message", None);

                let expected = usize::from(level >= threshold);
                assert_eq!(
                    sink.len(),
                    expected,
                    "threshold {} level {}",
                    threshold,
                    level
                );
                assert_eq!(logger.should_log(level), level >= threshold);
            }
        }
    }

    #[test]
    fn test_console_disabled_suppresses_everything() {
        for threshold in LogLevel::ALL {
            let (logger, sink) = memory_logger(threshold, false);

            for level in LogLevel::ALL {
                logger.log(level, "message", None);
            }

            assert!(sink.is_empty());
        }
    }

    #[test]
    fn test_format_without_payload() {
        let record = LogRecord {
            level: LogLevel::Info,
            message: "Starting".into(),
            payload: None,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        };

        assert_eq!(record.format(), "[2024-01-02T03:04:05.000Z] [INFO] Starting");
    }

    #[test]
    fn test_format_with_payload() {
        let record = LogRecord {
            level: LogLevel::Error,
            message: "Failed".into(),
            payload: Some(json!({"attempt": 2})),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        };

        assert_eq!(
            record.format(),
            "[2024-01-02T03:04:05.000Z] [ERROR] Failed {\"attempt\":2}"
        );
    }

    #[test]
    fn test_level_methods_tag_lines() {
        let (logger, sink) = memory_logger(LogLevel::Debug, true);

        logger.debug("d");
        logger.info("i");
        logger.warn_with("w", json!({"k": "v"}));
        logger.error("e");

        let lines = sink.lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("[DEBUG] d"));
        assert!(lines[1].ends_with("[INFO] i"));
        assert!(lines[2].ends_with("[WARN] w {\"k\":\"v\"}"));
        assert!(lines[3].ends_with("[ERROR] e"));
        assert_eq!(sink.lines_at(LogLevel::Warn).len(), 1);
    }

    #[test]
    fn test_runtime_changes_visible_to_all_handles() {
        let (logger, sink) = memory_logger(LogLevel::Info, true);
        let logger = Arc::new(logger);
        let other = logger.clone();

        other.debug("hidden");
        logger.set_log_level(LogLevel::Debug);
        other.debug("shown");

        logger.enable_console_logging(false);
        other.error("hidden");

        assert_eq!(sink.lines().len(), 1);
        assert!(sink.lines()[0].ends_with("[DEBUG] shown"));
        assert_eq!(
            other.settings(),
            LoggingSettings {
                level: LogLevel::Debug,
                enable_console: false
            }
        );
    }

    #[test]
    fn test_apply_settings_reenables_console() {
        let (logger, sink) = memory_logger(LogLevel::Info, false);

        logger.apply_settings(LoggingSettings {
            level: LogLevel::Warn,
            enable_console: true,
        });
        logger.info("hidden");
        logger.warn("shown");

        assert_eq!(sink.lines().len(), 1);
        assert!(sink.lines()[0].ends_with("[WARN] shown"));
    }

    #[test]
    fn test_loggers_are_independent_of_each_other_and_of_tracing() {
        let (first, first_sink) = memory_logger(LogLevel::Debug, true);
        let (second, second_sink) = memory_logger(LogLevel::Error, true);

        first.debug("first");
        second.info("dropped");
        tracing::error!("diagnostics only");

        assert_eq!(first_sink.lines().len(), 1);
        assert!(second_sink.is_empty());
    }

    #[test]
    fn test_payload_keeps_json_structure() {
        let (logger, sink) = memory_logger(LogLevel::Info, true);

        logger.info_with("Search", json!({"results": 2, "query": "a b"}));

        let line = &sink.lines()[0];
        let payload = line.split_once("Search ").map(|(_, rest)| rest).unwrap();
        let value: Value = serde_json::from_str(payload).unwrap();
        assert_eq!(value, json!({"results": 2, "query": "a b"}));
    }
}
