use crate::conf::LogLevel;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging system with JSON formatting and environment-based filtering
///
/// - `RUST_LOG` wins when set, otherwise the configured level applies
/// - Configures JSON output format for structured logging
/// - Flattens event fields for cleaner log output
pub fn init_logging(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    fmt()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .init();
}
