//! # MobileRun Client
//!
//! [`RemoteTaskClient`] implementation for the MobileRun task API.
//!
//! - `POST {base_url}/tasks` submits a task and answers `{"id": "..."}`
//! - `GET {base_url}/tasks/{id}` answers the task status in one of two shapes
//!   (see [`crate::infrastructure::task_api::status`])
//!
//! # Examples
//!
//! ```no_run
//! use price_compare::infrastructure::task_api::mobilerun::{MobileRunClient, TaskApiConfig};
//!
//! let config = TaskApiConfig::new("secret-key", "device-1");
//! let client = MobileRunClient::new(&config)?;
//! # Ok::<(), price_compare::infrastructure::task_api::error::TaskApiError>(())
//! ```

use crate::domain::entities::task_request::TaskRequest;
use crate::domain::value_objects::TaskId;
use crate::infrastructure::task_api::error::{TaskApiError, TaskApiResult};
use crate::infrastructure::task_api::http_client::HttpClient;
use crate::infrastructure::task_api::status::detect_status;
use crate::infrastructure::task_api::traits::{RawStatus, RemoteTaskClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Default MobileRun API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.mobilerun.ai/v1";

/// Default submission request timeout in milliseconds.
const DEFAULT_SUBMIT_TIMEOUT_MS: u64 = 30_000;

/// Default status request timeout in milliseconds.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 30_000;

/// Connection settings for the task API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskApiConfig {
    /// API base URL, without trailing slash.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Device that executes the tasks.
    pub device_id: String,
    /// Timeout for the submission request in milliseconds.
    pub submit_timeout_ms: u64,
    /// Timeout for each status request in milliseconds.
    pub poll_timeout_ms: u64,
}

impl Default for TaskApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            device_id: String::new(),
            submit_timeout_ms: DEFAULT_SUBMIT_TIMEOUT_MS,
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
        }
    }
}

impl TaskApiConfig {
    /// Creates a configuration for the default endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            device_id: device_id.into(),
            ..Default::default()
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the submission timeout.
    #[must_use]
    pub fn with_submit_timeout(mut self, timeout_ms: u64) -> Self {
        self.submit_timeout_ms = timeout_ms;
        self
    }

    /// Sets the status request timeout.
    #[must_use]
    pub fn with_poll_timeout(mut self, timeout_ms: u64) -> Self {
        self.poll_timeout_ms = timeout_ms;
        self
    }
}

impl fmt::Debug for TaskApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("device_id", &self.device_id)
            .field("submit_timeout_ms", &self.submit_timeout_ms)
            .field("poll_timeout_ms", &self.poll_timeout_ms)
            .finish()
    }
}

/// Submission body in the API's camelCase wire format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitTaskBody<'a> {
    llm_model: &'a str,
    task: &'a str,
    apps: &'a [String],
    device_id: &'a str,
    execution_timeout: u64,
    max_steps: u32,
    output_schema: Value,
    reasoning: bool,
    temperature: f64,
    vision: bool,
}

impl<'a> SubmitTaskBody<'a> {
    fn new(request: &'a TaskRequest, device_id: &'a str) -> Self {
        let model = request.model();
        Self {
            llm_model: &model.llm_model,
            task: request.instruction(),
            apps: request.apps(),
            device_id,
            execution_timeout: model.execution_timeout_secs,
            max_steps: model.max_steps,
            output_schema: request.output_schema().to_json_schema(),
            reasoning: model.reasoning,
            temperature: model.temperature,
            vision: model.vision,
        }
    }
}

/// HTTP client for the MobileRun task API.
#[derive(Debug, Clone)]
pub struct MobileRunClient {
    http: HttpClient,
    tasks_url: String,
    device_id: String,
    submit_timeout: Duration,
    poll_timeout: Duration,
}

impl MobileRunClient {
    /// Creates a client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns `TaskApiError::Internal` if the HTTP client cannot be built.
    pub fn new(config: &TaskApiConfig) -> TaskApiResult<Self> {
        let default_timeout = config.submit_timeout_ms.max(config.poll_timeout_ms);
        let http = HttpClient::with_bearer_token(default_timeout, &config.api_key)?;

        Ok(Self {
            http,
            tasks_url: format!("{}/tasks", config.base_url.trim_end_matches('/')),
            device_id: config.device_id.clone(),
            submit_timeout: Duration::from_millis(config.submit_timeout_ms),
            poll_timeout: Duration::from_millis(config.poll_timeout_ms),
        })
    }

    fn task_url(&self, task_id: &TaskId) -> String {
        format!("{}/{}", self.tasks_url, task_id)
    }
}

#[async_trait]
impl RemoteTaskClient for MobileRunClient {
    async fn submit(&self, request: &TaskRequest) -> TaskApiResult<TaskId> {
        let body = SubmitTaskBody::new(request, &self.device_id);

        tracing::debug!(
            platform = %request.platform(),
            url = %self.tasks_url,
            "submitting task"
        );

        let response = self
            .http
            .post_json(&self.tasks_url, &body, self.submit_timeout)
            .await?;

        let task_id = response
            .get("id")
            .and_then(|id| match id {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .map(TaskId::new)
            .filter(|id| !id.is_blank())
            .ok_or_else(|| TaskApiError::protocol("submission response carried no task id"))?;

        Ok(task_id)
    }

    async fn poll(&self, task_id: &TaskId) -> TaskApiResult<RawStatus> {
        let body = self
            .http
            .get_json(&self.task_url(task_id), self.poll_timeout)
            .await?;

        Ok(detect_status(&body))
    }
}
