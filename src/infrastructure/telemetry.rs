//! # Telemetry
//!
//! `tracing` subscriber setup.
//!
//! `RUST_LOG` takes precedence over the configured filter when set.

use crate::application::error::InfrastructureError;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Default filter directive.
pub const DEFAULT_LOG_FILTER: &str = "price_compare=info,tower_http=info";

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Builds the filter, preferring `RUST_LOG` when it is set and valid.
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::Telemetry` if the configured directive
    /// does not parse.
    pub fn env_filter(&self) -> Result<EnvFilter, InfrastructureError> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.filter).map_err(|e| {
            InfrastructureError::telemetry(format!("invalid log filter '{}': {}", self.filter, e))
        })
    }
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns `InfrastructureError::Telemetry` if the filter is invalid or a
/// global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = config.env_filter()?;

    tracing_subscriber::registry()
        .with(filter)
        .with(config.json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!config.json).then(tracing_subscriber::fmt::layer))
        .try_init()
        .map_err(|e| InfrastructureError::telemetry(format!("failed to install subscriber: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }

    #[test]
    fn invalid_filter_is_telemetry_error() {
        let config = LoggingConfig {
            filter: "price_compare=loud".to_string(),
            json: false,
        };
        if std::env::var("RUST_LOG").is_err() {
            let result = config.env_filter();
            assert!(matches!(result, Err(InfrastructureError::Telemetry(_))));
        }
    }
}
