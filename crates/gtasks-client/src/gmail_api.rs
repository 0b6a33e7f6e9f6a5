//! HTTP client for the Gmail v1 API.
//!
//! Covers the three endpoints the bridge needs: listing message ids,
//! fetching a message (`format=metadata` for summaries, `format=full` for
//! bodies), and sending a raw RFC 2822 message. Header extraction and body
//! decoding happen here so callers deal in the shared models rather than the
//! upstream payload tree.

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::Deserialize;
use serde_json::Value;

use gtasks_shared::errors::{ClientError, ClientResult};
use gtasks_shared::models::{EmailContent, MessageRef, MessageSummary, OutgoingEmail, SendOutcome};

use crate::auth::TokenManager;

#[derive(Debug, Deserialize)]
struct MessageListResponse {
    #[serde(default)]
    messages: Vec<MessageRef>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    #[serde(default)]
    message: String,
}

/// Fetch depth for a single message.
///
/// `Metadata` returns headers, snippet, and labels without the body tree;
/// `Full` includes the MIME parts needed to decode a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    Metadata,
    Full,
}

impl MessageFormat {
    fn as_param(self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::Full => "full",
        }
    }
}

/// Thin wrapper over the Gmail v1 REST endpoints for the `me` user.
#[derive(Debug, Clone)]
pub struct GmailApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenManager,
}

impl GmailApiClient {
    pub fn new(base_url: &str, tokens: TokenManager) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Message ids matching a Gmail search query and/or label set.
    pub async fn list_messages(
        &self,
        query: Option<&str>,
        label_ids: &[&str],
        max_results: u32,
    ) -> ClientResult<Vec<MessageRef>> {
        let url = format!("{}/users/me/messages", self.base_url);
        let max = max_results.to_string();
        let mut params: Vec<(&str, &str)> = vec![("maxResults", &max)];
        if let Some(q) = query {
            if !q.is_empty() {
                params.push(("q", q));
            }
        }
        for label in label_ids {
            params.push(("labelIds", label));
        }

        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .get(&url)
            .query(&params)
            .bearer_auth(token)
            .send()
            .await?;
        let listed: MessageListResponse = decode(response).await?;
        Ok(listed.messages)
    }

    /// Headline view of a message. `None` when the id does not exist.
    pub async fn get_summary(&self, message_id: &str) -> ClientResult<Option<MessageSummary>> {
        let Some(payload) = self.get_message(message_id, MessageFormat::Metadata).await? else {
            return Ok(None);
        };
        Ok(Some(summarize_message(&payload)))
    }

    /// Full content with the decoded plain-text body. `None` when the id
    /// does not exist.
    pub async fn get_content(&self, message_id: &str) -> ClientResult<Option<EmailContent>> {
        let Some(payload) = self.get_message(message_id, MessageFormat::Full).await? else {
            return Ok(None);
        };
        Ok(Some(extract_content(&payload)))
    }

    /// Assemble an RFC 2822 message and send it from the authorized account.
    pub async fn send(&self, email: &OutgoingEmail) -> ClientResult<SendOutcome> {
        let raw = URL_SAFE.encode(build_mime(email));
        let url = format!("{}/users/me/messages/send", self.base_url);
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "raw": raw }))
            .send()
            .await?;
        decode(response).await
    }

    /// Raw message payload at the requested fetch depth. `None` on 404.
    pub async fn get_message(
        &self,
        message_id: &str,
        format: MessageFormat,
    ) -> ClientResult<Option<Value>> {
        let url = format!("{}/users/me/messages/{message_id}", self.base_url);
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .get(&url)
            .query(&[("format", format.as_param())])
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(api_error_from(status, response).await);
        }
        Ok(Some(response.json().await?))
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(api_error_from(status, response).await);
    }
    Ok(response.json().await?)
}

async fn api_error_from(status: reqwest::StatusCode, response: reqwest::Response) -> ClientError {
    let message = match response.json::<GoogleErrorEnvelope>().await {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    };
    ClientError::api_error(status.as_u16(), message)
}

/// Build a raw RFC 2822 message with CRLF line endings.
fn build_mime(email: &OutgoingEmail) -> String {
    let mut message = String::new();
    message.push_str(&format!("To: {}\r\n", email.to.join(", ")));
    if !email.cc.is_empty() {
        message.push_str(&format!("Cc: {}\r\n", email.cc.join(", ")));
    }
    if !email.bcc.is_empty() {
        message.push_str(&format!("Bcc: {}\r\n", email.bcc.join(", ")));
    }
    message.push_str(&format!("Subject: {}\r\n", email.subject));
    message.push_str("MIME-Version: 1.0\r\n");
    let content_type = if email.html { "text/html" } else { "text/plain" };
    message.push_str(&format!(
        "Content-Type: {content_type}; charset=\"utf-8\"\r\n"
    ));
    message.push_str("\r\n");
    message.push_str(&email.body);
    message
}

/// Pull a named header out of `payload.headers`, case-insensitively.
fn header_value(payload: &Value, name: &str) -> String {
    payload["headers"]
        .as_array()
        .into_iter()
        .flatten()
        .find(|h| {
            h["name"]
                .as_str()
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
        .and_then(|h| h["value"].as_str())
        .unwrap_or_default()
        .to_string()
}

/// Headline fields from a `format=full` message.
fn summarize_message(message: &Value) -> MessageSummary {
    let payload = &message["payload"];
    MessageSummary {
        id: message["id"].as_str().unwrap_or_default().to_string(),
        subject: header_value(payload, "Subject"),
        from: header_value(payload, "From"),
        date: header_value(payload, "Date"),
        snippet: message["snippet"].as_str().unwrap_or_default().to_string(),
        labels: message["labelIds"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
    }
}

/// Full content including the decoded body.
fn extract_content(message: &Value) -> EmailContent {
    let payload = &message["payload"];
    EmailContent {
        id: message["id"].as_str().unwrap_or_default().to_string(),
        subject: header_value(payload, "Subject"),
        from: header_value(payload, "From"),
        date: header_value(payload, "Date"),
        body: extract_body(payload),
    }
}

/// Decode the message body, preferring a text/plain part and falling back
/// to text/html, then to the top-level body data.
///
/// Direct children are scanned before any nested multipart containers, so a
/// plain-text sibling always beats HTML buried one level down.
fn extract_body(payload: &Value) -> String {
    if let Some(parts) = payload["parts"].as_array() {
        for wanted in ["text/plain", "text/html"] {
            for part in parts {
                if part["mimeType"].as_str() == Some(wanted) {
                    if let Some(data) = part["body"]["data"].as_str() {
                        return decode_body_data(data);
                    }
                }
            }
        }
        // Multipart/alternative nests one level deeper.
        for part in parts {
            if part["parts"].is_array() {
                let nested = extract_body(part);
                if !nested.is_empty() {
                    return nested;
                }
            }
        }
    }
    payload["body"]["data"]
        .as_str()
        .map(decode_body_data)
        .unwrap_or_default()
}

fn decode_body_data(data: &str) -> String {
    let bytes = URL_SAFE
        .decode(data)
        .or_else(|_| URL_SAFE_NO_PAD.decode(data))
        .unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_email() -> OutgoingEmail {
        OutgoingEmail {
            to: vec!["bob@example.com".to_string()],
            subject: "Status update".to_string(),
            body: "All green.".to_string(),
            cc: vec![],
            bcc: vec![],
            html: false,
        }
    }

    #[test]
    fn test_build_mime_plain() {
        let mime = build_mime(&sample_email());
        assert!(mime.starts_with("To: bob@example.com\r\n"));
        assert!(mime.contains("Subject: Status update\r\n"));
        assert!(mime.contains("Content-Type: text/plain; charset=\"utf-8\"\r\n"));
        assert!(mime.ends_with("\r\nAll green."));
        assert!(!mime.contains("Cc:"));
    }

    #[test]
    fn test_build_mime_html_with_cc_bcc() {
        let email = OutgoingEmail {
            cc: vec!["carol@example.com".to_string(), "dan@example.com".to_string()],
            bcc: vec!["eve@example.com".to_string()],
            html: true,
            ..sample_email()
        };
        let mime = build_mime(&email);
        assert!(mime.contains("Cc: carol@example.com, dan@example.com\r\n"));
        assert!(mime.contains("Bcc: eve@example.com\r\n"));
        assert!(mime.contains("Content-Type: text/html"));
    }

    #[test]
    fn test_mime_base64_round_trips() {
        let mime = build_mime(&sample_email());
        let encoded = URL_SAFE.encode(&mime);
        let decoded = URL_SAFE.decode(&encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), mime);
    }

    #[test]
    fn test_header_value_case_insensitive() {
        let payload = serde_json::json!({
            "headers": [
                {"name": "subject", "value": "Hello"},
                {"name": "From", "value": "alice@example.com"}
            ]
        });
        assert_eq!(header_value(&payload, "Subject"), "Hello");
        assert_eq!(header_value(&payload, "FROM"), "alice@example.com");
        assert_eq!(header_value(&payload, "Date"), "");
    }

    #[test]
    fn test_summarize_message() {
        let message = serde_json::json!({
            "id": "m42",
            "snippet": "Quick note...",
            "payload": {
                "headers": [
                    {"name": "Subject", "value": "Quick note"},
                    {"name": "From", "value": "alice@example.com"},
                    {"name": "Date", "value": "Tue, 25 Aug 2026 09:00:00 -0700"}
                ]
            }
        });
        let summary = summarize_message(&message);
        assert_eq!(summary.id, "m42");
        assert!(summary.labels.is_empty());
        assert_eq!(summary.subject, "Quick note");
        assert_eq!(summary.from, "alice@example.com");
        assert_eq!(summary.snippet, "Quick note...");
    }

    #[test]
    fn test_extract_body_from_parts() {
        let body = URL_SAFE.encode("plain text wins");
        let html = URL_SAFE.encode("<p>html</p>");
        let payload = serde_json::json!({
            "parts": [
                {"mimeType": "text/html", "body": {"data": html}},
                {"mimeType": "text/plain", "body": {"data": body}}
            ]
        });
        assert_eq!(extract_body(&payload), "plain text wins");
    }

    #[test]
    fn test_extract_body_plain_sibling_beats_nested_html() {
        let html = URL_SAFE.encode("<p>html</p>");
        let plain = URL_SAFE.encode("plain text");
        let payload = serde_json::json!({
            "parts": [
                {
                    "mimeType": "multipart/related",
                    "parts": [
                        {"mimeType": "text/html", "body": {"data": html}}
                    ]
                },
                {"mimeType": "text/plain", "body": {"data": plain}}
            ]
        });
        assert_eq!(extract_body(&payload), "plain text");
    }

    #[test]
    fn test_extract_body_nested_multipart() {
        let body = URL_SAFE.encode("nested body");
        let payload = serde_json::json!({
            "parts": [
                {
                    "mimeType": "multipart/alternative",
                    "parts": [
                        {"mimeType": "text/plain", "body": {"data": body}}
                    ]
                }
            ]
        });
        assert_eq!(extract_body(&payload), "nested body");
    }

    #[test]
    fn test_extract_body_top_level_fallback() {
        let body = URL_SAFE_NO_PAD.encode("single part");
        let payload = serde_json::json!({
            "body": {"data": body}
        });
        assert_eq!(extract_body(&payload), "single part");
    }

    #[test]
    fn test_extract_body_missing_data() {
        let payload = serde_json::json!({"body": {}});
        assert_eq!(extract_body(&payload), "");
    }
}
