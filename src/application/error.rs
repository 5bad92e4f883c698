//! # Application Errors
//!
//! Error types for the application layer.
//!
//! Per-platform failures never show up here: they are absorbed into "N/A"
//! entries of the comparison. What remains are failures the caller must see.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Validation(String)                    - Invalid caller input
//! ├── TaskApi(TaskApiError)                 - Upstream failure on a direct status check
//! ├── Infrastructure(InfrastructureError)   - Configuration / telemetry failures
//! └── Internal(String)                      - Unexpected failures
//! ```
//!
//! # Examples
//!
//! ```
//! use price_compare::application::error::{ApplicationError, InfrastructureError};
//!
//! let err = ApplicationError::validation("product name must not be empty");
//! assert!(err.is_validation());
//!
//! let infra_err = InfrastructureError::configuration("no platforms configured");
//! let app_err: ApplicationError = infra_err.into();
//! assert!(app_err.to_string().contains("no platforms"));
//! ```

use crate::infrastructure::task_api::error::TaskApiError;
use thiserror::Error;

/// Infrastructure layer error.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// Configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Logging could not be initialised.
    #[error("telemetry error: {0}")]
    Telemetry(String),
}

impl InfrastructureError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a telemetry error.
    #[must_use]
    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }
}

impl From<config::ConfigError> for InfrastructureError {
    fn from(error: config::ConfigError) -> Self {
        Self::Configuration(error.to_string())
    }
}

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Task API error surfaced to the caller.
    #[error("task api error: {0}")]
    TaskApi(#[from] TaskApiError),

    /// Infrastructure error.
    #[error("infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if retrying the same call may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::TaskApi(e) => e.is_retryable(),
            _ => false,
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
