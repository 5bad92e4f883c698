//! # Task Poller
//!
//! Drives one submitted task to a terminal [`TaskOutcome`] with fixed-interval
//! polling under a hard attempt ceiling.
//!
//! Each tick sleeps the interval, then asks the client for the status:
//!
//! | status                          | action                         |
//! |---------------------------------|--------------------------------|
//! | completed                       | return `Completed(price)`      |
//! | failed                          | return `Failed(diagnostic)`    |
//! | queued / running / unknown      | next tick                      |
//! | transport or decoding error     | logged, next tick              |
//!
//! Running out of attempts returns `TimedOut`. The task's own execution
//! timeout is advisory to the remote system and plays no part here.

use crate::domain::entities::task_outcome::TaskOutcome;
use crate::domain::value_objects::TaskId;
use crate::infrastructure::task_api::error::TaskApiError;
use crate::infrastructure::task_api::traits::{RawStatus, RemoteTaskClient};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Polling budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Delay before each status request in milliseconds.
    pub interval_ms: u64,
    /// Maximum number of status requests.
    pub max_attempts: u32,
    /// Wait applied after a device-busy rejection in milliseconds.
    pub device_busy_backoff_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            max_attempts: 60,
            device_busy_backoff_ms: 10_000,
        }
    }
}

impl PollConfig {
    /// Creates a configuration with the given interval and attempt budget.
    #[must_use]
    pub fn new(interval_ms: u64, max_attempts: u32) -> Self {
        Self {
            interval_ms,
            max_attempts,
            ..Default::default()
        }
    }

    /// Sets the device-busy backoff.
    #[must_use]
    pub fn with_device_busy_backoff(mut self, backoff_ms: u64) -> Self {
        self.device_busy_backoff_ms = backoff_ms;
        self
    }

    /// Returns the polling interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Returns the device-busy backoff.
    #[must_use]
    pub fn device_busy_backoff(&self) -> Duration {
        Duration::from_millis(self.device_busy_backoff_ms)
    }

    /// Returns the longest time a poll loop can take, excluding request
    /// latency.
    #[must_use]
    pub fn ceiling(&self) -> Duration {
        self.interval().saturating_mul(self.max_attempts)
    }
}

/// Polls a single task until it finishes or the budget runs out.
#[derive(Debug, Clone)]
pub struct TaskPoller {
    client: Arc<dyn RemoteTaskClient>,
    config: PollConfig,
}

impl TaskPoller {
    /// Creates a new poller.
    #[must_use]
    pub fn new(client: Arc<dyn RemoteTaskClient>, config: PollConfig) -> Self {
        Self { client, config }
    }

    /// Returns the polling configuration.
    #[must_use]
    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Polls the task until it reaches a terminal status.
    ///
    /// Never fails: transient errors are retried on the next tick and an
    /// exhausted budget yields [`TaskOutcome::TimedOut`].
    pub async fn await_result(&self, task_id: &TaskId) -> TaskOutcome {
        let max_attempts = self.config.max_attempts;

        for attempt in 1..=max_attempts {
            tokio::time::sleep(self.config.interval()).await;

            match self.client.poll(task_id).await {
                Ok(RawStatus::Completed(output)) => {
                    let raw_price = RawStatus::price_from_output(&output);
                    tracing::info!(%task_id, attempt, price = %raw_price, "task completed");
                    return TaskOutcome::completed(raw_price);
                }
                Ok(RawStatus::Failed(reason)) => {
                    tracing::warn!(%task_id, attempt, %reason, "task failed");
                    return TaskOutcome::failed(reason);
                }
                Ok(status) => {
                    tracing::debug!(%task_id, attempt, max_attempts, %status, "task pending");
                }
                Err(error) => {
                    tracing::warn!(%task_id, attempt, max_attempts, %error, "poll failed, retrying");
                }
            }
        }

        tracing::warn!(
            %task_id,
            max_attempts,
            ceiling_secs = self.config.ceiling().as_secs(),
            "task timed out"
        );
        TaskOutcome::TimedOut
    }

    /// Turns a submission failure into a terminal outcome.
    ///
    /// A busy device is not retried: the poller waits one backoff period so
    /// the next submission has a chance, then gives up on this task.
    pub async fn reject_submission(&self, error: &TaskApiError) -> TaskOutcome {
        if error.is_device_unavailable() {
            tracing::warn!(
                %error,
                backoff_ms = self.config.device_busy_backoff_ms,
                "device unavailable, backing off"
            );
            tokio::time::sleep(self.config.device_busy_backoff()).await;
        } else {
            tracing::warn!(%error, "task submission failed");
        }
        TaskOutcome::submission_error(error.to_string())
    }
}
