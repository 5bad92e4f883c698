//! # Status Response Adapter
//!
//! The status endpoint is inconsistent about where it puts a task's fields:
//!
//! ```text
//! { "task":  { "status": "completed", "output": { "price": "₹999" } } }
//! { "items": [ { "status": "completed", "output": { "price": "₹999" } } ] }
//! ```
//!
//! [`detect_status`] recognizes both shapes and maps them to a single
//! [`RawStatus`], so the poller never sees the difference.

use crate::domain::value_objects::TaskState;
use crate::infrastructure::task_api::traits::RawStatus;
use serde_json::{Map, Value};

/// Diagnostic used when a failed task carries no exception event.
pub const DEFAULT_FAILURE_REASON: &str = "Task failed";

/// Diagnostic used when an exception event carries no message.
const UNKNOWN_EXCEPTION: &str = "Unknown error";

/// Trajectory event type carrying the failure exception.
const EXCEPTION_EVENT: &str = "ExceptionEvent";

/// Maps a status response body to a [`RawStatus`].
#[must_use]
pub fn detect_status(body: &Value) -> RawStatus {
    match locate_task(body) {
        Some(task) => status_of(task),
        None => RawStatus::UnknownShape,
    }
}

/// Finds the object carrying the task fields, whichever shape was used.
fn locate_task(body: &Value) -> Option<&Map<String, Value>> {
    if let Some(task) = body.get("task").and_then(Value::as_object) {
        return Some(task);
    }

    body.get("items")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .and_then(Value::as_object)
}

fn status_of(task: &Map<String, Value>) -> RawStatus {
    let state = task
        .get("status")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<TaskState>().ok());

    match state {
        Some(TaskState::Queued) => RawStatus::Queued,
        Some(TaskState::Running) => RawStatus::Running,
        Some(TaskState::Completed) => {
            let output = task
                .get("output")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            RawStatus::Completed(output)
        }
        Some(TaskState::Failed) => RawStatus::Failed(failure_reason(task)),
        None => RawStatus::UnknownShape,
    }
}

/// Extracts the first exception message from the task's trajectory.
fn failure_reason(task: &Map<String, Value>) -> String {
    task.get("trajectory")
        .and_then(Value::as_array)
        .and_then(|events| {
            events
                .iter()
                .find(|event| event.get("event").and_then(Value::as_str) == Some(EXCEPTION_EVENT))
        })
        .map(|event| {
            event
                .get("data")
                .and_then(|data| data.get("exception"))
                .and_then(Value::as_str)
                .unwrap_or(UNKNOWN_EXCEPTION)
                .to_string()
        })
        .unwrap_or_else(|| DEFAULT_FAILURE_REASON.to_string())
}
