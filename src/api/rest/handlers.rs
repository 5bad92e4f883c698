//! # REST Handlers
//!
//! Request handlers, request/response bodies and error mapping.

use crate::application::error::ApplicationError;
use crate::application::services::search_orchestrator::SearchOrchestrator;
use crate::domain::entities::comparison::{ComparisonResult, LowestPrice};
use crate::domain::entities::task_outcome::{TaskOutcome, TaskSnapshot};
use crate::domain::value_objects::{PlatformId, RawPrice, TaskId, TaskState};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Shared state of the REST API.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Runs searches, status checks and comparisons.
    pub orchestrator: Arc<SearchOrchestrator>,
}

impl AppState {
    /// Creates the state around an orchestrator.
    #[must_use]
    pub fn new(orchestrator: SearchOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

/// Error body returned by every failing route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}

/// Application error rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(error: ApplicationError) -> Self {
        Self(error)
    }
}

impl ApiError {
    /// Returns the HTTP status for the wrapped error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ApplicationError::Validation(_) => StatusCode::BAD_REQUEST,
            ApplicationError::TaskApi(_) => StatusCode::BAD_GATEWAY,
            ApplicationError::Infrastructure(_) | ApplicationError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            ApplicationError::Validation(message) => message.clone(),
            other => {
                tracing::error!(error = %other, "request failed");
                other.to_string()
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Health check body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok`.
    pub status: String,
}

/// Body of `POST /api/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Product to search for.
    #[serde(default)]
    pub product_name: Option<String>,
}

/// Body of `GET /api/task/{task_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusResponse {
    /// The task checked.
    pub task_id: TaskId,
    /// Current state.
    pub status: TaskState,
    /// Reported price, once completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<RawPrice>,
    /// Diagnostic, once failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TaskStatusResponse {
    /// Builds the response body from a snapshot.
    #[must_use]
    pub fn from_snapshot(task_id: TaskId, snapshot: TaskSnapshot) -> Self {
        let status = snapshot.state();
        let (price, error) = match snapshot {
            TaskSnapshot::Pending(_) => (None, None),
            TaskSnapshot::Finished(TaskOutcome::Completed { raw_price }) => (Some(raw_price), None),
            TaskSnapshot::Finished(outcome) => {
                (None, Some(outcome.reason().unwrap_or("Task failed").to_string()))
            }
        };

        Self {
            task_id,
            status,
            price,
            error,
        }
    }
}

/// Body of `POST /api/compare`.
///
/// Prices may be strings, numbers or `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareRequest {
    /// Raw price per platform.
    #[serde(default)]
    pub prices: IndexMap<PlatformId, Value>,
}

/// Response of `POST /api/compare`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareResponse {
    /// The prices as received.
    pub all_prices: IndexMap<PlatformId, RawPrice>,
    /// Prices that normalized.
    pub valid_prices: IndexMap<PlatformId, f64>,
    /// Cheapest platform, if any.
    pub lowest: Option<LowestPrice>,
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// `POST /api/search`
///
/// Blocks until every platform resolved.
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<Json<ComparisonResult>> {
    let product_name = request.product_name.unwrap_or_default();
    let result = state.orchestrator.search(&product_name).await?;
    Ok(Json(result))
}

/// `GET /api/task/{task_id}`
pub async fn task_status(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<TaskStatusResponse>> {
    let task_id = TaskId::new(task_id);
    let snapshot = state.orchestrator.task_status(&task_id).await?;
    Ok(Json(TaskStatusResponse::from_snapshot(task_id, snapshot)))
}

/// `POST /api/compare`
pub async fn compare(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Json<CompareResponse> {
    let all_prices: IndexMap<PlatformId, RawPrice> = request
        .prices
        .into_iter()
        .map(|(platform, value)| (platform, raw_price_from_value(value)))
        .collect();

    let aggregated = state.orchestrator.compare(&all_prices);

    Json(CompareResponse {
        all_prices,
        valid_prices: aggregated.valid_prices,
        lowest: aggregated.lowest,
    })
}

fn raw_price_from_value(value: Value) -> RawPrice {
    match value {
        Value::String(text) => RawPrice::from(text),
        Value::Number(number) => RawPrice::from(number.to_string()),
        _ => RawPrice::NotAvailable,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::infrastructure::task_api::error::TaskApiError;
    use serde_json::json;

    #[test]
    fn error_status_mapping() {
        assert_eq!(
            ApiError(ApplicationError::validation("x")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(TaskApiError::connection("down").into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError(ApplicationError::internal("x")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn completed_snapshot_carries_price() {
        let body = TaskStatusResponse::from_snapshot(
            TaskId::new("t1"),
            TaskSnapshot::Finished(TaskOutcome::completed("₹1,499")),
        );
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"task_id": "t1", "status": "completed", "price": "₹1,499"})
        );
    }

    #[test]
    fn failed_snapshot_carries_error() {
        let body = TaskStatusResponse::from_snapshot(
            TaskId::new("t2"),
            TaskSnapshot::Finished(TaskOutcome::failed("App crashed")),
        );
        assert_eq!(body.status, TaskState::Failed);
        assert_eq!(body.error.as_deref(), Some("App crashed"));
        assert!(body.price.is_none());
    }

    #[test]
    fn pending_snapshot_has_no_extras() {
        let body = TaskStatusResponse::from_snapshot(
            TaskId::new("t3"),
            TaskSnapshot::Pending(Some(TaskState::Queued)),
        );
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"task_id": "t3", "status": "queued"})
        );
    }

    #[test]
    fn compare_values_become_raw_prices() {
        assert_eq!(raw_price_from_value(json!("₹10")), RawPrice::from("₹10"));
        assert_eq!(raw_price_from_value(json!(199.5)), RawPrice::from("199.5"));
        assert_eq!(raw_price_from_value(json!(null)), RawPrice::NotAvailable);
        assert_eq!(raw_price_from_value(json!("N/A")), RawPrice::NotAvailable);
        assert_eq!(raw_price_from_value(json!({"a": 1})), RawPrice::NotAvailable);
    }
}
