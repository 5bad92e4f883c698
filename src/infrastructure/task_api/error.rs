//! # Task API Errors
//!
//! Error types for calls to the remote automation task API.
//!
//! # Examples
//!
//! ```
//! use price_compare::infrastructure::task_api::error::TaskApiError;
//!
//! let error = TaskApiError::timeout("Request timed out after 30000ms");
//! assert!(error.is_retryable());
//!
//! let error = TaskApiError::device_unavailable("device busy");
//! assert!(error.is_device_unavailable());
//! assert!(!error.is_retryable());
//! ```

use thiserror::Error;

/// Maximum length of a diagnostic carried by an error.
///
/// Response bodies are cut to this many characters so errors and logs stay
/// bounded.
pub const MAX_DIAGNOSTIC_LEN: usize = 200;

/// Error type for remote task API operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskApiError {
    /// Request timed out.
    #[error("task api timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Network or connection error.
    #[error("task api connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// The target device is busy or unavailable (HTTP 412).
    #[error("task api device unavailable: {message}")]
    DeviceUnavailable {
        /// Truncated response body.
        message: String,
    },

    /// The API answered with a non-success status.
    #[error("task api rejected request ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        message: String,
    },

    /// The response could not be understood.
    #[error("task api protocol error: {message}")]
    Protocol {
        /// Error message.
        message: String,
    },

    /// Local failure, e.g. the HTTP client could not be built.
    #[error("task api internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl TaskApiError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a device unavailable error, truncating the diagnostic.
    #[must_use]
    pub fn device_unavailable(message: impl AsRef<str>) -> Self {
        Self::DeviceUnavailable {
            message: truncate_diagnostic(message.as_ref()),
        }
    }

    /// Creates a rejection error, truncating the diagnostic.
    #[must_use]
    pub fn rejected(status: u16, message: impl AsRef<str>) -> Self {
        Self::Rejected {
            status,
            message: truncate_diagnostic(message.as_ref()),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error is transient and a later call may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection { .. } => true,
            Self::Rejected { status, .. } => *status == 429 || *status >= 500,
            Self::DeviceUnavailable { .. } | Self::Protocol { .. } | Self::Internal { .. } => {
                false
            }
        }
    }

    /// Returns true if the device was busy or unavailable.
    #[inline]
    #[must_use]
    pub fn is_device_unavailable(&self) -> bool {
        matches!(self, Self::DeviceUnavailable { .. })
    }

    /// Returns the HTTP status, if the API answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::DeviceUnavailable { .. } => Some(412),
            _ => None,
        }
    }
}

/// Cuts a diagnostic to [`MAX_DIAGNOSTIC_LEN`] characters.
#[must_use]
pub fn truncate_diagnostic(text: &str) -> String {
    match text.char_indices().nth(MAX_DIAGNOSTIC_LEN) {
        Some((end, _)) => text.get(..end).unwrap_or(text).to_string(),
        None => text.to_string(),
    }
}

/// Result type for task API operations.
pub type TaskApiResult<T> = Result<T, TaskApiError>;
