//! Integration tests for `GmailService` against a stub upstream server.

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use serde_json::{json, Value};

use gtasks_client::{GmailApiClient, GmailService, TokenManager};
use gtasks_shared::models::{EmailSearchResults, OutgoingEmail};

const TEST_TOKEN: &str = "test-access-token";

fn require_bearer(headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TEST_TOKEN}"));
    if authorized {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"code": 401, "message": "Invalid Credentials"}})),
        ))
    }
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": {"code": 404, "message": "Not Found"}})),
    )
}

fn metadata_message() -> Value {
    json!({
        "id": "m1",
        "threadId": "t1",
        "snippet": "Quick note...",
        "labelIds": ["INBOX", "UNREAD"],
        "payload": {
            "headers": [
                {"name": "Subject", "value": "Quick note"},
                {"name": "From", "value": "alice@example.com"},
                {"name": "Date", "value": "Tue, 25 Aug 2026 09:00:00 -0700"}
            ]
        }
    })
}

fn full_message() -> Value {
    json!({
        "id": "m1",
        "threadId": "t1",
        "payload": {
            "headers": [
                {"name": "Subject", "value": "Quick note"},
                {"name": "From", "value": "alice@example.com"},
                {"name": "Date", "value": "Tue, 25 Aug 2026 09:00:00 -0700"}
            ],
            "parts": [
                {"mimeType": "text/plain", "body": {"data": URL_SAFE.encode("plain body")}},
                {"mimeType": "text/html", "body": {"data": URL_SAFE.encode("<p>html</p>")}}
            ]
        }
    })
}

/// Stub implementing the Gmail v1 endpoints the service touches. Listing
/// returns two ids; only "m1" resolves to a message, so "m2" exercises the
/// vanished-during-hydration path. Message fetches insist on the expected
/// `format` parameter: summaries must ask for metadata, bodies for full.
fn stub_router() -> Router {
    Router::new()
        .route(
            "/users/me/messages",
            get(
                |headers: HeaderMap, Query(params): Query<HashMap<String, String>>| async move {
                    require_bearer(&headers)?;
                    let unread_only = params.get("labelIds").map(String::as_str) == Some("UNREAD");
                    let mut messages = vec![json!({"id": "m1", "threadId": "t1"})];
                    if !unread_only {
                        messages.push(json!({"id": "m2", "threadId": "t2"}));
                    }
                    Ok::<_, (StatusCode, Json<Value>)>(Json(json!({"messages": messages})))
                },
            ),
        )
        .route(
            "/users/me/messages/send",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                require_bearer(&headers)?;
                if body["raw"].as_str().unwrap_or_default().is_empty() {
                    return Err((
                        StatusCode::BAD_REQUEST,
                        Json(json!({"error": {"code": 400, "message": "Missing raw"}})),
                    ));
                }
                Ok(Json(
                    json!({"id": "sent-1", "threadId": "t9", "labelIds": ["SENT"]}),
                ))
            }),
        )
        .route(
            "/users/me/messages/{id}",
            get(
                |headers: HeaderMap,
                 Path(id): Path<String>,
                 Query(params): Query<HashMap<String, String>>| async move {
                    require_bearer(&headers)?;
                    if id != "m1" {
                        return Err(not_found());
                    }
                    match params.get("format").map(String::as_str) {
                        Some("metadata") => Ok(Json(metadata_message())),
                        Some("full") => Ok(Json(full_message())),
                        other => Err((
                            StatusCode::BAD_REQUEST,
                            Json(json!({"error": {
                                "code": 400,
                                "message": format!("Unexpected format {other:?}")
                            }})),
                        )),
                    }
                },
            ),
        )
}

async fn spawn_stub() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stub_router()).await.unwrap();
    });
    format!("http://{addr}")
}

fn service(base_url: &str) -> GmailService {
    GmailService::new(GmailApiClient::new(
        base_url,
        TokenManager::static_token(TEST_TOKEN),
    ))
}

#[tokio::test]
async fn test_search_without_content_returns_bare_refs() {
    let base = spawn_stub().await;
    let results = service(&base)
        .search_emails("from:alice", None, false)
        .await
        .unwrap();
    // Two refs come back untouched, including "m2" which no longer resolves
    // to a message; no per-message fetches happen on this path.
    match results {
        EmailSearchResults::Refs(refs) => {
            assert_eq!(refs.len(), 2);
            assert_eq!(refs[0].id, "m1");
            assert_eq!(refs[1].id, "m2");
            assert_eq!(refs[0].thread_id.as_deref(), Some("t1"));
        }
        EmailSearchResults::Summaries(_) => panic!("expected bare refs"),
    }
}

#[tokio::test]
async fn test_search_with_content_hydrates_summaries() {
    let base = spawn_stub().await;
    let results = service(&base)
        .search_emails("from:alice", None, true)
        .await
        .unwrap();
    // "m2" vanished between listing and hydration, so one summary remains.
    // The stub rejects anything but format=metadata on this path.
    match results {
        EmailSearchResults::Summaries(summaries) => {
            assert_eq!(summaries.len(), 1);
            assert_eq!(summaries[0].id, "m1");
            assert_eq!(summaries[0].subject, "Quick note");
            assert_eq!(summaries[0].from, "alice@example.com");
        }
        EmailSearchResults::Refs(_) => panic!("expected hydrated summaries"),
    }
}

#[tokio::test]
async fn test_unread_emails_filters_by_label() {
    let base = spawn_stub().await;
    let summaries = service(&base).unread_emails(None).await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert!(summaries[0].labels.iter().any(|l| l == "UNREAD"));
}

#[tokio::test]
async fn test_read_email_decodes_plain_body() {
    let base = spawn_stub().await;
    let content = service(&base).read_email("m1").await.unwrap().unwrap();
    assert_eq!(content.subject, "Quick note");
    assert_eq!(content.body, "plain body");
}

#[tokio::test]
async fn test_read_missing_email_is_none() {
    let base = spawn_stub().await;
    assert!(service(&base).read_email("ghost").await.unwrap().is_none());
}

#[tokio::test]
async fn test_send_email() {
    let base = spawn_stub().await;
    let outcome = service(&base)
        .send_email(&OutgoingEmail {
            to: vec!["bob@example.com".to_string()],
            subject: "Status".to_string(),
            body: "All green.".to_string(),
            cc: vec![],
            bcc: vec![],
            html: false,
        })
        .await
        .unwrap();
    assert_eq!(outcome.id, "sent-1");
    assert_eq!(outcome.thread_id.as_deref(), Some("t9"));
}
