//! Subscriber installation.
//!
//! One global `tracing` subscriber per process: an `EnvFilter` followed by
//! either the pretty `fmt` layer or the JSON layer, writing to stderr so
//! command output on stdout stays clean.

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Build the filter for `config`.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(format!("bad log filter '{}': {}", config.log_level, e)))
}

/// Install the global subscriber.
///
/// Fails with `AlreadyInitialized` when a subscriber is already set, e.g.
/// when called twice in one test binary.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;

    let console = config.console_output.then(|| {
        if config.json_logs {
            fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr)
                .boxed()
        } else {
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .boxed()
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .try_init()
        .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;

    tracing::debug!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "logging initialised"
    );
    Ok(())
}
