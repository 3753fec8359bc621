//! # Logging
//!
//! `tracing` subscriber setup for the export binary. Every log line goes to
//! stderr so stdout carries nothing but the genesis document.
//!
//! ## Environment Variables
//!
//! - `QC_LOG_LEVEL` or `RUST_LOG`: filter directive (default: info)
//! - `QC_JSON_LOGS`: JSON formatted logs (default: false)

use std::env;
use std::io;

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Default filter directive.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive.
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json_logs: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            json_logs: false,
        }
    }
}

impl LogConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through `lookup` instead of the environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_level: lookup("QC_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            json_logs: lookup("QC_JSON_LOGS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
        }
    }
}

/// Logging setup errors.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directive did not parse.
    #[error("invalid log filter {directive:?}: {message}")]
    Filter {
        /// The rejected directive.
        directive: String,
        /// Parser message.
        message: String,
    },

    /// A global subscriber was already installed.
    #[error("failed to install log subscriber: {0}")]
    Init(String),
}

/// Install the global subscriber.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let env_filter =
        EnvFilter::try_new(&config.log_level).map_err(|e| LoggingError::Filter {
            directive: config.log_level.clone(),
            message: e.to_string(),
        })?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    tracing::debug!(
        level = %config.log_level,
        json = config.json_logs,
        "logging initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = LogConfig::from_lookup(lookup(&[]));
        assert_eq!(config, LogConfig::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_qc_log_level_wins_over_rust_log() {
        let config = LogConfig::from_lookup(lookup(&[
            ("QC_LOG_LEVEL", "debug"),
            ("RUST_LOG", "warn"),
        ]));
        assert_eq!(config.log_level, "debug");

        let config = LogConfig::from_lookup(lookup(&[("RUST_LOG", "qc_genesis_export=trace")]));
        assert_eq!(config.log_level, "qc_genesis_export=trace");
    }

    #[test]
    fn test_json_flag() {
        assert!(LogConfig::from_lookup(lookup(&[("QC_JSON_LOGS", "TRUE")])).json_logs);
        assert!(LogConfig::from_lookup(lookup(&[("QC_JSON_LOGS", "1")])).json_logs);
        assert!(!LogConfig::from_lookup(lookup(&[("QC_JSON_LOGS", "no")])).json_logs);
    }

    #[test]
    fn test_bad_filter_rejected() {
        let config = LogConfig {
            log_level: "qc_genesis_export=loud".to_string(),
            json_logs: false,
        };
        assert!(matches!(
            init_logging(&config),
            Err(LoggingError::Filter { .. })
        ));
    }
}
