//! HTTP behaviour of the MobileRun client against a mock task API.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use price_compare::domain::entities::platform::PlatformSpec;
use price_compare::domain::entities::task_request::{ModelParams, TaskRequest};
use price_compare::domain::value_objects::TaskId;
use price_compare::infrastructure::task_api::{
    MobileRunClient, RawStatus, RemoteTaskClient, TaskApiConfig, TaskApiError,
};
use serde_json::{Value, json};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-key";

fn client(server: &MockServer) -> MobileRunClient {
    let config = TaskApiConfig::new(API_KEY, "device-42")
        .with_base_url(format!("{}/", server.uri()))
        .with_submit_timeout(2_000)
        .with_poll_timeout(2_000);
    MobileRunClient::new(&config).unwrap()
}

fn amazon_request() -> TaskRequest {
    let platform = PlatformSpec::new("amazon", "com.amazon.mShop.android.shopping");
    TaskRequest::for_platform(&platform, "boat headphones", ModelParams::default())
}

#[tokio::test]
async fn submit_sends_bearer_token_and_wire_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .and(header("authorization", format!("Bearer {API_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "task-123"})))
        .expect(1)
        .mount(&server)
        .await;

    let task_id = assert_ok!(client(&server).submit(&amazon_request()).await);
    assert_eq!(task_id, TaskId::new("task-123"));

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body["llmModel"], json!("google/gemini-2.5-flash"));
    assert_eq!(
        body["task"],
        json!("Open the amazon app, search for boat headphones, and extract the price of the first product")
    );
    assert_eq!(body["apps"], json!(["com.amazon.mShop.android.shopping"]));
    assert_eq!(body["deviceId"], json!("device-42"));
    assert_eq!(body["executionTimeout"], json!(1800));
    assert_eq!(body["maxSteps"], json!(150));
    assert_eq!(body["temperature"], json!(0.5));
    assert_eq!(body["reasoning"], json!(true));
    assert_eq!(body["vision"], json!(true));
    assert_eq!(
        body["outputSchema"],
        json!({"type": "object", "properties": {"price": {"type": "string"}}})
    );
}

#[tokio::test]
async fn submit_accepts_numeric_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 987})))
        .mount(&server)
        .await;

    let task_id = assert_ok!(client(&server).submit(&amazon_request()).await);
    assert_eq!(task_id.as_str(), "987");
}

#[tokio::test]
async fn precondition_failed_means_device_busy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(412).set_body_string("device is busy"))
        .mount(&server)
        .await;

    let error = assert_err!(client(&server).submit(&amazon_request()).await);
    assert!(error.is_device_unavailable());
    assert_eq!(error.status(), Some(412));
}

#[tokio::test]
async fn server_error_is_rejected_with_truncated_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(500).set_body_string("x".repeat(1_000)))
        .mount(&server)
        .await;

    let error = assert_err!(client(&server).submit(&amazon_request()).await);
    match &error {
        TaskApiError::Rejected { status, message } => {
            assert_eq!(*status, 500);
            assert!(message.chars().count() <= 200);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(error.is_retryable());
}

#[tokio::test]
async fn submit_without_id_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "queued"})))
        .mount(&server)
        .await;

    let error = assert_err!(client(&server).submit(&amazon_request()).await);
    assert!(matches!(error, TaskApiError::Protocol { .. }));
}

#[tokio::test]
async fn poll_reads_task_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/task-1"))
        .and(header("authorization", format!("Bearer {API_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "task": {"status": "completed", "output": {"price": "₹1,499"}}
        })))
        .mount(&server)
        .await;

    let status = assert_ok!(client(&server).poll(&TaskId::new("task-1")).await);
    match status {
        RawStatus::Completed(output) => {
            assert_eq!(RawStatus::price_from_output(&output).as_str(), "₹1,499");
        }
        other => panic!("unexpected status: {other:?}"),
    }
}

#[tokio::test]
async fn poll_reads_items_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/task-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "status": "failed",
                "trajectory": [
                    {"event": "StepEvent", "data": {}},
                    {"event": "ExceptionEvent", "data": {"exception": "App crashed"}}
                ]
            }]
        })))
        .mount(&server)
        .await;

    let status = assert_ok!(client(&server).poll(&TaskId::new("task-2")).await);
    assert_eq!(status, RawStatus::Failed("App crashed".to_string()));
}

#[tokio::test]
async fn poll_unrecognized_body_is_unknown_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/task-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let status = assert_ok!(client(&server).poll(&TaskId::new("task-3")).await);
    assert_eq!(status, RawStatus::UnknownShape);
}

#[tokio::test]
async fn poll_invalid_json_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/task-4"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let error = assert_err!(client(&server).poll(&TaskId::new("task-4")).await);
    assert!(matches!(error, TaskApiError::Protocol { .. }));
}

#[tokio::test]
async fn unreachable_server_is_connection_error() {
    let config = TaskApiConfig::new(API_KEY, "device-42")
        .with_base_url("http://127.0.0.1:1")
        .with_submit_timeout(2_000);
    let client = MobileRunClient::new(&config).unwrap();

    let error = assert_err!(client.submit(&amazon_request()).await);
    assert!(error.is_retryable());
}
