//! Event formatter producing `[timestamp] [LEVEL] message payload` lines

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use super::{LogRecord, level_from_tracing};

/// Field carrying the structured payload of a log call
pub(super) const PAYLOAD_FIELD: &str = "payload";

/// Formats events as single [`LogRecord`] lines; spans and targets are not printed
#[derive(Debug, Default, Clone, Copy)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = LineFields::default();
        event.record(&mut fields);

        let payload = fields
            .payload
            .and_then(|raw| serde_json::from_str(&raw).ok());
        let record = LogRecord::new(
            level_from_tracing(event.metadata().level()),
            fields.message,
            payload,
        );

        writeln!(writer, "{}", record.format())
    }
}

#[derive(Default)]
struct LineFields {
    message: String,
    payload: Option<String>,
}

impl Visit for LineFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            PAYLOAD_FIELD => self.payload = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{:?}", value),
            PAYLOAD_FIELD => self.payload = Some(format!("{:?}", value)),
            _ => {}
        }
    }
}
