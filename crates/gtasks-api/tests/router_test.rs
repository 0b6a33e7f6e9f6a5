//! Router-level tests driven through `tower::ServiceExt::oneshot`.
//!
//! These never reach a real upstream: the state points at an unroutable
//! base URL, and every asserted path (health, validation, parameter
//! rejection) is decided before any upstream call would go out.

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use gtasks_api::{build_router, AppState};
use gtasks_client::TokenManager;
use gtasks_shared::{config::GoogleConfig, GtasksConfig};

fn test_router() -> Router {
    let config = GtasksConfig {
        google: GoogleConfig {
            tasks_base_url: "http://127.0.0.1:1/tasks/v1".to_string(),
            gmail_base_url: "http://127.0.0.1:1/gmail/v1".to_string(),
            ..GoogleConfig::default()
        },
        ..GtasksConfig::default()
    };
    let state = AppState::with_tokens(&config, TokenManager::static_token("t")).into_shared();
    build_router(state, Duration::from_secs(5))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = test_router()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_root_reports_service() {
    let response = test_router()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["service"], "gtasks-bridge");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = test_router()
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_task_list_empty_title_is_422() {
    let response = test_router()
        .oneshot(json_request("POST", "/task-lists", r#"{"title": ""}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["status_code"], 422);
    assert!(body["error"].as_str().unwrap().contains("title"));
}

#[tokio::test]
async fn test_create_task_overlong_title_is_422() {
    let payload = format!(r#"{{"title": "{}"}}"#, "x".repeat(201));
    let response = test_router()
        .oneshot(json_request("POST", "/task-lists/l1/tasks", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_search_requires_query_param() {
    let response = test_router()
        .oneshot(Request::get("/search/tasks").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_send_email_without_recipients_is_422() {
    let response = test_router()
        .oneshot(json_request(
            "POST",
            "/emails/send",
            r#"{"to": [], "subject": "hi", "body": "text"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_filter_emails_without_criteria_is_422() {
    let response = test_router()
        .oneshot(json_request("POST", "/emails/filter", r#"{}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_batch_with_failures_is_200_not_201() {
    // Every item fails against the unroutable upstream, so the outcome
    // carries errors and the endpoint must not claim 201 Created.
    let response = test_router()
        .oneshot(json_request(
            "POST",
            "/task-lists/l1/tasks/batch",
            r#"{"tasks": [{"title": "one"}]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["created_count"], 0);
    assert!(!body["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    let response = test_router()
        .oneshot(Request::get("/task-lists").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["status_code"], 502);
}
