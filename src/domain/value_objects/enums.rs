//! # Domain Enums
//!
//! - [`TaskState`] - Lifecycle state reported by the remote task API
//!
//! Implements `Display`, `FromStr`, and Serde traits with the lowercase
//! spellings the remote API uses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a remote automation task.
///
/// # Examples
///
/// ```
/// use price_compare::domain::value_objects::enums::TaskState;
///
/// let state: TaskState = "completed".parse().unwrap_or(TaskState::Queued);
/// assert!(state.is_terminal());
/// assert_eq!(TaskState::Running.to_string(), "running");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// Accepted, waiting for a device.
    Queued,
    /// Executing on a device.
    Running,
    /// Finished with output.
    Completed,
    /// Finished with an error.
    Failed,
}

impl TaskState {
    /// Returns true if polling can stop at this state.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns the wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskState {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "queued" => Ok(Self::Queued),
            "running" => Ok(Self::Running),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(ParseEnumError::InvalidValue("TaskState", s.to_string())),
        }
    }
}

/// Error returned when parsing an enum from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseEnumError {
    /// The value is not a valid variant.
    #[error("invalid {0} value: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_spellings() {
        assert_eq!("queued".parse::<TaskState>(), Ok(TaskState::Queued));
        assert_eq!("RUNNING".parse::<TaskState>(), Ok(TaskState::Running));
        assert_eq!(" failed ".parse::<TaskState>(), Ok(TaskState::Failed));
    }

    #[test]
    fn rejects_unknown() {
        let err = "cancelled".parse::<TaskState>();
        assert!(matches!(err, Err(ParseEnumError::InvalidValue("TaskState", _))));
    }

    #[test]
    fn terminal_states() {
        assert!(TaskState::Completed.is_terminal());
        assert!(TaskState::Failed.is_terminal());
        assert!(!TaskState::Queued.is_terminal());
        assert!(!TaskState::Running.is_terminal());
    }
}
