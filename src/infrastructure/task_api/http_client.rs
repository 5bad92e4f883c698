//! # HTTP Client Utilities
//!
//! Thin wrapper over `reqwest` for the task API.
//!
//! This module provides:
//! - Per-request timeouts on top of a client-wide default
//! - JSON bodies in both directions
//! - Status-code and transport error mapping to [`TaskApiError`]
//!
//! Responses are decoded to [`serde_json::Value`] rather than typed structs:
//! the status endpoint returns more than one shape and the caller decides
//! how to read it.

use crate::infrastructure::task_api::error::{TaskApiError, TaskApiResult};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// HTTP client wrapper for the task API.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client. Cloning shares the connection pool.
    client: Client,
    /// Default request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified default timeout.
    ///
    /// # Errors
    ///
    /// Returns `TaskApiError::Internal` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> TaskApiResult<Self> {
        Self::with_headers(timeout_ms, HeaderMap::new())
    }

    /// Creates a new HTTP client with default headers.
    ///
    /// # Errors
    ///
    /// Returns `TaskApiError::Internal` if the client cannot be created.
    pub fn with_headers(timeout_ms: u64, default_headers: HeaderMap) -> TaskApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .default_headers(default_headers)
            .build()
            .map_err(|e| TaskApiError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout_ms })
    }

    /// Creates a client that sends `Authorization: Bearer <token>` on every
    /// request.
    ///
    /// # Errors
    ///
    /// Returns `TaskApiError::Internal` if the token is not a valid header
    /// value or the client cannot be created.
    pub fn with_bearer_token(timeout_ms: u64, token: &str) -> TaskApiResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| TaskApiError::internal("API key is not a valid header value"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        Self::with_headers(timeout_ms, headers)
    }

    /// Returns the default timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a GET request and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `TaskApiError::Timeout` or `Connection` if the request fails,
    /// a status error for non-success responses, and
    /// `TaskApiError::Protocol` if the body is not JSON.
    pub async fn get_json(&self, url: &str, timeout: Duration) -> TaskApiResult<Value> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Makes a POST request with a JSON body and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `TaskApiError::Timeout` or `Connection` if the request fails,
    /// a status error for non-success responses, and
    /// `TaskApiError::Protocol` if the body is not JSON.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        timeout: Duration,
    ) -> TaskApiResult<Value> {
        let response = self
            .client
            .post(url)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Handles the HTTP response, checking status and decoding JSON.
    async fn handle_response(&self, response: Response) -> TaskApiResult<Value> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<Value>()
                .await
                .map_err(|e| TaskApiError::protocol(format!("Failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            Err(self.map_status_error(status, &error_body))
        }
    }

    /// Maps a reqwest error to a TaskApiError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> TaskApiError {
        if error.is_timeout() {
            TaskApiError::timeout("Request timed out")
        } else if error.is_connect() {
            TaskApiError::connection(format!("Connection failed: {}", error))
        } else {
            TaskApiError::connection(format!("HTTP request failed: {}", error))
        }
    }

    /// Maps an HTTP status code to a TaskApiError.
    fn map_status_error(&self, status: StatusCode, body: &str) -> TaskApiError {
        let diagnostic = if body.trim().is_empty() {
            format!("HTTP {}", status.as_u16())
        } else {
            body.to_string()
        };

        match status {
            StatusCode::PRECONDITION_FAILED => TaskApiError::device_unavailable(diagnostic),
            _ => TaskApiError::rejected(status.as_u16(), diagnostic),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn new_client() {
        let client = HttpClient::new(5000);
        assert!(client.is_ok());
        assert_eq!(client.unwrap().timeout_ms(), 5000);
    }

    #[test]
    fn bearer_token_client() {
        assert!(HttpClient::with_bearer_token(3000, "secret-key").is_ok());
    }

    #[test]
    fn invalid_bearer_token() {
        let result = HttpClient::with_bearer_token(3000, "bad\nkey");
        assert!(matches!(result, Err(TaskApiError::Internal { .. })));
    }

    #[test]
    fn precondition_failed_is_device_unavailable() {
        let client = HttpClient::new(1000).unwrap();
        let error = client.map_status_error(StatusCode::PRECONDITION_FAILED, "device busy");
        assert!(error.is_device_unavailable());
    }

    #[test]
    fn empty_body_uses_status_line() {
        let client = HttpClient::new(1000).unwrap();
        let error = client.map_status_error(StatusCode::BAD_GATEWAY, "");
        assert_eq!(error, TaskApiError::rejected(502, "HTTP 502"));
    }
}
