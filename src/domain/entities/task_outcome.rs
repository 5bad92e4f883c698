//! # Task Outcome
//!
//! Terminal results of driving one remote task, and the one-shot status
//! view used by callers that check a task without blocking on it.

use crate::domain::value_objects::{RawPrice, TaskState};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal result of one platform's task. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TaskOutcome {
    /// The task completed and reported a price (possibly "N/A").
    Completed {
        /// Raw price text from the task output.
        raw_price: RawPrice,
    },
    /// The remote task reported a failure.
    Failed {
        /// Diagnostic extracted from the task's event trail.
        reason: String,
    },
    /// The polling budget ran out before a terminal status.
    TimedOut,
    /// The task could not be submitted.
    SubmissionError {
        /// Truncated diagnostic.
        reason: String,
    },
}

impl TaskOutcome {
    /// Creates a completed outcome.
    #[must_use]
    pub fn completed(raw_price: impl Into<RawPrice>) -> Self {
        Self::Completed {
            raw_price: raw_price.into(),
        }
    }

    /// Creates a failed outcome.
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    /// Creates a submission error outcome.
    #[must_use]
    pub fn submission_error(reason: impl Into<String>) -> Self {
        Self::SubmissionError {
            reason: reason.into(),
        }
    }

    /// Returns true if the task completed.
    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Maps the outcome to the raw price recorded for the platform.
    ///
    /// Every outcome other than `Completed` becomes the "N/A" sentinel.
    #[must_use]
    pub fn into_raw_price(self) -> RawPrice {
        match self {
            Self::Completed { raw_price } => raw_price,
            Self::Failed { .. } | Self::TimedOut | Self::SubmissionError { .. } => {
                RawPrice::NotAvailable
            }
        }
    }

    /// Returns the diagnostic for failure outcomes.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Failed { reason } | Self::SubmissionError { reason } => Some(reason),
            Self::Completed { .. } | Self::TimedOut => None,
        }
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed { raw_price } => write!(f, "completed ({raw_price})"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
            Self::TimedOut => write!(f, "timed out"),
            Self::SubmissionError { reason } => write!(f, "submission error: {reason}"),
        }
    }
}

/// Result of a single status check on a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskSnapshot {
    /// The task has not reached a terminal state, or the status could not be
    /// recognized (`None`).
    Pending(Option<TaskState>),
    /// The task is done.
    Finished(TaskOutcome),
}

impl TaskSnapshot {
    /// Returns the state to report to callers.
    ///
    /// Unrecognized pending responses are reported as `running`.
    #[must_use]
    pub fn state(&self) -> TaskState {
        match self {
            Self::Pending(state) => state.unwrap_or(TaskState::Running),
            Self::Finished(TaskOutcome::Completed { .. }) => TaskState::Completed,
            Self::Finished(_) => TaskState::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_completed_keeps_price() {
        assert_eq!(
            TaskOutcome::completed("₹999").into_raw_price(),
            RawPrice::from("₹999")
        );
        assert!(TaskOutcome::failed("boom").into_raw_price().is_not_available());
        assert!(TaskOutcome::TimedOut.into_raw_price().is_not_available());
        assert!(
            TaskOutcome::submission_error("412")
                .into_raw_price()
                .is_not_available()
        );
    }

    #[test]
    fn reason_for_failures() {
        assert_eq!(TaskOutcome::failed("crash").reason(), Some("crash"));
        assert_eq!(TaskOutcome::TimedOut.reason(), None);
    }

    #[test]
    fn snapshot_state() {
        assert_eq!(
            TaskSnapshot::Pending(Some(TaskState::Queued)).state(),
            TaskState::Queued
        );
        assert_eq!(TaskSnapshot::Pending(None).state(), TaskState::Running);
        assert_eq!(
            TaskSnapshot::Finished(TaskOutcome::completed("1")).state(),
            TaskState::Completed
        );
        assert_eq!(
            TaskSnapshot::Finished(TaskOutcome::failed("x")).state(),
            TaskState::Failed
        );
    }

    #[test]
    fn display() {
        assert_eq!(TaskOutcome::TimedOut.to_string(), "timed out");
        assert!(TaskOutcome::failed("no device").to_string().contains("no device"));
    }
}
