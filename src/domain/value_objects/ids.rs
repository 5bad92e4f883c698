//! # Identifiers
//!
//! String-based identifiers for platforms and remote tasks.
//!
//! # Examples
//!
//! ```
//! use price_compare::domain::value_objects::ids::{PlatformId, TaskId};
//!
//! let platform = PlatformId::new("amazon");
//! assert_eq!(platform.as_str(), "amazon");
//!
//! let task = TaskId::new("task-123");
//! assert_eq!(task.to_string(), "task-123");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable key of a retail platform (e.g. `amazon`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformId(String);

impl PlatformId {
    /// Creates a new platform identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the identifier upper-cased, as used in log prefixes.
    #[must_use]
    pub fn label(&self) -> String {
        self.0.to_uppercase()
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlatformId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Opaque identifier of a task on the remote automation API.
///
/// This is the task handle: it is returned by submission and owned by the
/// poller until a terminal outcome is reached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a new task identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_label_is_uppercase() {
        assert_eq!(PlatformId::new("flipkart").label(), "FLIPKART");
    }

    #[test]
    fn platform_serializes_transparently() {
        let json = serde_json::to_string(&PlatformId::new("myntra")).unwrap_or_default();
        assert_eq!(json, "\"myntra\"");
    }

    #[test]
    fn blank_task_id() {
        assert!(TaskId::new("  ").is_blank());
        assert!(!TaskId::new("abc").is_blank());
    }
}
