use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::DateTime;
use contact_api_rest::{routes::contact::CONTACT_ROUTE, RestServer, RestServerConfig};
use contact_core_submission_contracts::MockSubmissionService;
use contact_core_submission_impl::{SubmissionServiceConfig, SubmissionServiceImpl};
use contact_shared_impl::{
    fault::{FaultServiceConfig, FaultServiceImpl},
    time::TimeServiceImpl,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(fault: FaultServiceConfig) -> Router {
    let submission = SubmissionServiceImpl::new(
        TimeServiceImpl,
        FaultServiceImpl::new(fault),
        SubmissionServiceConfig {
            processing_delay: Duration::ZERO,
        },
    );

    RestServer::new(
        submission,
        RestServerConfig {
            addr: ([127, 0, 0, 1], 0).into(),
            real_ip_config: None,
        },
    )
    .router()
}

async fn send(app: Router, method: Method, body: Value) -> (StatusCode, Option<String>, Value) {
    let request = Request::builder()
        .method(method)
        .uri(CONTACT_ROUTE)
        .header("Content-Type", "application/json")
        .header("User-Agent", "contact-tests")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let request_id = response
        .headers()
        .get("X-Request-Id")
        .map(|value| value.to_str().unwrap().to_owned());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, request_id, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn valid_submission_is_acknowledged() {
    let (status, request_id, body) = send(
        app(FaultServiceConfig::Disabled),
        Method::POST,
        json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "message": "This is a valid ten-plus char message.",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(request_id.is_some_and(|id| !id.is_empty()));
    assert_eq!(body["message"], "Message sent successfully");
    DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).unwrap();
}

#[tokio::test]
async fn invalid_grammar_is_rejected() {
    let (status, _, body) = send(
        app(FaultServiceConfig::Disabled),
        Method::POST,
        json!({
            "name": "Jane123",
            "email": "not-an-email",
            "message": "Valid length message here.",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "error": "Validation failed",
            "details": [
                {"field": "name", "message": "Name can only contain letters and spaces"},
                {"field": "email", "message": "Please enter a valid email address"},
            ],
        })
    );
}

#[tokio::test]
async fn non_object_body_reports_every_field() {
    let (status, _, body) = send(app(FaultServiceConfig::Disabled), Method::POST, json!([])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"],
        json!([
            {"field": "name", "message": "Required"},
            {"field": "email", "message": "Required"},
            {"field": "message", "message": "Required"},
        ])
    );
}

#[tokio::test]
async fn get_is_not_allowed() {
    let (status, request_id, body) = send(
        app(FaultServiceConfig::Disabled),
        Method::GET,
        json!({"name": "Jane Doe"}),
    )
    .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(request_id.is_some());
    assert_eq!(body, json!({"error": "Method not allowed"}));
}

#[tokio::test]
async fn injected_fault() {
    let (status, _, body) = send(
        app(FaultServiceConfig::Enabled { probability: 1.0 }),
        Method::POST,
        json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "message": "This is a valid ten-plus char message.",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "Internal server error", "message": "Please try again later"})
    );
}

#[tokio::test]
async fn injected_fault_does_not_hide_validation_errors() {
    let (status, _, _) = send(
        app(FaultServiceConfig::Enabled { probability: 1.0 }),
        Method::POST,
        json!({"name": "J", "email": "jane@example.com", "message": "short"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn panicking_handler_returns_internal_server_error() {
    // the mock has no expectations, so the handler panics
    let app = RestServer::new(
        MockSubmissionService::new(),
        RestServerConfig {
            addr: ([127, 0, 0, 1], 0).into(),
            real_ip_config: None,
        },
    )
    .router();

    let (status, request_id, body) = send(app, Method::POST, json!({})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(request_id.is_some());
    assert_eq!(
        body,
        json!({"error": "Internal server error", "message": "Please try again later"})
    );
}
