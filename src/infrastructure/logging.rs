use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

/// Filter used for internal diagnostics when `RUST_LOG` is not set
pub const DEFAULT_DIAGNOSTICS_FILTER: &str = "warn";

/// Install the global tracing subscriber for internal diagnostics.
///
/// Application-facing lines go through [`crate::infrastructure::logger::Logger`];
/// this subscriber only renders `tracing` events, filtered by `RUST_LOG`.
/// Calling it twice is harmless: the second install is ignored.
pub fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIAGNOSTICS_FILTER));

    let result = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if result.is_ok() {
        tracing::debug!(?format, "Diagnostics logging initialized");
    }
}
