//! # Signer Telemetry
//!
//! Structured logging for signer consumers, built on `tracing-subscriber`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use signer_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     init_logging(&TelemetryConfig::from_env()).expect("Failed to init logging");
//!     // tx-signer spans and events are now emitted
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SIGNER_SERVICE_NAME` | `poa-signer` | Service name attached to logs |
//! | `SIGNER_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `SIGNER_JSON_LOGS` | `false` | Emit JSON lines |
//! | `SIGNER_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log filter directive could not be parsed
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber was already installed
    #[error("Failed to install subscriber: {0}")]
    SubscriberInit(String),
}
