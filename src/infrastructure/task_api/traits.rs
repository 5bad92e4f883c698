//! # Remote Task Client Trait
//!
//! Port definition for the remote automation task API.
//!
//! The core only needs two operations: submit a task and fetch its status.
//! [`RawStatus`] is the normalized status, independent of which response
//! shape the API happened to use.
//!
//! # Examples
//!
//! ```ignore
//! use price_compare::infrastructure::task_api::traits::{RawStatus, RemoteTaskClient};
//!
//! struct MyClient { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl RemoteTaskClient for MyClient {
//!     // ... implement submit and poll
//! }
//! ```

use crate::domain::entities::task_request::{PRICE_FIELD, TaskRequest};
use crate::domain::value_objects::{RawPrice, TaskId, TaskState};
use crate::infrastructure::task_api::error::TaskApiResult;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;

/// Normalized status of a remote task.
#[derive(Debug, Clone, PartialEq)]
pub enum RawStatus {
    /// Waiting for a device.
    Queued,
    /// Executing.
    Running,
    /// Finished; carries the task's output object.
    Completed(Map<String, Value>),
    /// Finished with an error; carries a diagnostic.
    Failed(String),
    /// The response did not match any known shape.
    UnknownShape,
}

impl RawStatus {
    /// Returns true if polling can stop.
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed(_) | Self::Failed(_))
    }

    /// Returns the recognized lifecycle state, if any.
    #[must_use]
    pub fn state(&self) -> Option<TaskState> {
        match self {
            Self::Queued => Some(TaskState::Queued),
            Self::Running => Some(TaskState::Running),
            Self::Completed(_) => Some(TaskState::Completed),
            Self::Failed(_) => Some(TaskState::Failed),
            Self::UnknownShape => None,
        }
    }

    /// Extracts the `price` field of a completed task.
    ///
    /// A missing or non-string field yields [`RawPrice::NotAvailable`].
    #[must_use]
    pub fn price_from_output(output: &Map<String, Value>) -> RawPrice {
        output
            .get(PRICE_FIELD)
            .and_then(Value::as_str)
            .map_or(RawPrice::NotAvailable, RawPrice::from)
    }
}

impl fmt::Display for RawStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queued => write!(f, "queued"),
            Self::Running => write!(f, "running"),
            Self::Completed(_) => write!(f, "completed"),
            Self::Failed(_) => write!(f, "failed"),
            Self::UnknownShape => write!(f, "unknown"),
        }
    }
}

/// Trait defining the contract with the remote task API.
///
/// Implementations must be safe for concurrent use by several in-flight
/// platform searches.
///
/// # Error Handling
///
/// Methods return `TaskApiResult<T>`. Implementations map transport and
/// status failures to the matching `TaskApiError` variants; in particular a
/// busy device must surface as `TaskApiError::DeviceUnavailable`.
#[async_trait]
pub trait RemoteTaskClient: Send + Sync + fmt::Debug {
    /// Submits a task.
    ///
    /// # Errors
    ///
    /// - `TaskApiError::Timeout` / `Connection` - transport failure
    /// - `TaskApiError::DeviceUnavailable` - the device is busy
    /// - `TaskApiError::Rejected` - any other non-success status
    /// - `TaskApiError::Protocol` - the response carried no task id
    async fn submit(&self, request: &TaskRequest) -> TaskApiResult<TaskId>;

    /// Fetches a task's current status.
    ///
    /// # Errors
    ///
    /// - `TaskApiError::Timeout` / `Connection` - transport failure
    /// - `TaskApiError::Rejected` - non-success status
    /// - `TaskApiError::Protocol` - the body was not JSON
    async fn poll(&self, task_id: &TaskId) -> TaskApiResult<RawStatus>;
}
