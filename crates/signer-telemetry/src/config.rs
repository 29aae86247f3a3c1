//! Telemetry configuration from environment variables.

use serde::{Deserialize, Serialize};
use std::env;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or full directive
    pub log_level: String,

    /// Whether to enable console output
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "poa-signer".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SIGNER_SERVICE_NAME`: Service name (default: poa-signer)
    /// - `SIGNER_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `SIGNER_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `SIGNER_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        Self {
            service_name: env::var("SIGNER_SERVICE_NAME")
                .unwrap_or_else(|_| "poa-signer".to_string()),

            log_level: env::var("SIGNER_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("SIGNER_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: env::var("SIGNER_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}
