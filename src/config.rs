//! # Configuration
//!
//! Layered application configuration.
//!
//! Sources, later ones overriding earlier ones:
//! 1. built-in defaults
//! 2. `config/default.{toml,yaml,json}` (optional)
//! 3. `config/local.{toml,yaml,json}` (optional)
//! 4. environment variables prefixed `PRICE_COMPARE`, nested with `__`,
//!    e.g. `PRICE_COMPARE__TASK_API__API_KEY`
//!
//! A `.env` file in the working directory is loaded into the environment
//! first.

use crate::application::error::{ApplicationResult, InfrastructureError};
use crate::application::services::search_orchestrator::{SearchConfig, SearchOrchestrator};
use crate::application::services::task_poller::PollConfig;
use crate::domain::entities::platform::PlatformSpec;
use crate::domain::entities::task_request::ModelParams;
use crate::infrastructure::task_api::mobilerun::{MobileRunClient, TaskApiConfig};
use crate::infrastructure::telemetry::LoggingConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "PRICE_COMPARE";

/// Separator for nested keys in environment variables.
pub const ENV_SEPARATOR: &str = "__";

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server.
    pub server: ServerConfig,
    /// Log output.
    pub logging: LoggingConfig,
    /// Remote task API connection.
    pub task_api: TaskApiConfig,
    /// Model parameters sent with every task.
    pub model: ModelParams,
    /// Polling budget per task.
    pub polling: PollConfig,
    /// Search scheduling.
    pub search: SearchConfig,
    /// Platforms to search, in order.
    pub platforms: Vec<PlatformSpec>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            task_api: TaskApiConfig::default(),
            model: ModelParams::default(),
            polling: PollConfig::default(),
            search: SearchConfig::default(),
            platforms: PlatformSpec::default_set(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from files and the environment, then validates it.
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::Configuration` if a source cannot be read
    /// or deserialized, or the result fails [`AppConfig::validate`].
    pub fn load() -> Result<Self, InfrastructureError> {
        // A missing .env file is fine.
        let _ = dotenvy::dotenv();

        let config: Self = Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Returns a builder seeded with the built-in defaults.
    fn builder() -> Result<ConfigBuilder<DefaultState>, InfrastructureError> {
        let defaults = Config::try_from(&Self::default())?;
        Ok(Config::builder().add_source(defaults))
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::Configuration` describing the first
    /// violated constraint.
    pub fn validate(&self) -> Result<(), InfrastructureError> {
        if self.platforms.is_empty() {
            return Err(InfrastructureError::configuration(
                "at least one platform must be configured",
            ));
        }

        let mut seen = HashSet::with_capacity(self.platforms.len());
        for platform in &self.platforms {
            if !seen.insert(platform.id()) {
                return Err(InfrastructureError::configuration(format!(
                    "duplicate platform '{}'",
                    platform.id()
                )));
            }
            if platform.app_id().trim().is_empty() {
                return Err(InfrastructureError::configuration(format!(
                    "platform '{}' has no app id",
                    platform.id()
                )));
            }
        }

        if self.polling.max_attempts == 0 {
            return Err(InfrastructureError::configuration(
                "polling.max_attempts must be greater than zero",
            ));
        }

        if self.polling.interval_ms == 0 {
            return Err(InfrastructureError::configuration(
                "polling.interval_ms must be greater than zero",
            ));
        }

        if self.task_api.submit_timeout_ms == 0 {
            return Err(InfrastructureError::configuration(
                "task_api.submit_timeout_ms must be greater than zero",
            ));
        }

        if self.task_api.poll_timeout_ms == 0 {
            return Err(InfrastructureError::configuration(
                "task_api.poll_timeout_ms must be greater than zero",
            ));
        }

        if self.task_api.base_url.trim().is_empty() {
            return Err(InfrastructureError::configuration(
                "task_api.base_url must not be empty",
            ));
        }

        Ok(())
    }

    /// Builds a search orchestrator backed by the MobileRun client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the platform
    /// set is invalid.
    pub fn orchestrator(&self) -> ApplicationResult<SearchOrchestrator> {
        let client = MobileRunClient::new(&self.task_api)?;
        SearchOrchestrator::new(
            Arc::new(client),
            self.platforms.clone(),
            self.model.clone(),
            self.polling,
            self.search,
        )
    }
}
