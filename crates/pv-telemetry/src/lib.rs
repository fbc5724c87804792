//! # Provenance Telemetry
//!
//! Structured logging for provenance nodes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pv_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_telemetry(&TelemetryConfig::from_env())?;
//!     // tracing macros now reach stderr
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `provenance-node` | Service name |
//! | `PV_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `PV_CONSOLE_OUTPUT` | `true` | Write logs to stderr |
//! | `PV_JSON_LOGS` | `false` (`true` in containers) | JSON lines |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("A global subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}

/// Initialize logging for the process.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    logging::init_logging(config)
}
