//! Shared helper functions for MCP tool implementations.

use chrono::{DateTime, Utc};

use gtasks_shared::errors::ClientError;
use gtasks_shared::models::TaskStatus;

/// Build a structured error JSON string that LLMs can parse.
pub fn error_json(error_code: &str, message: &str) -> String {
    serde_json::json!({
        "error": error_code,
        "message": message,
    })
    .to_string()
}

/// Pretty-print a tool result, falling back to an error payload when the
/// value will not serialize.
pub fn ok_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| error_json("serialization_error", &e.to_string()))
}

/// Map a client failure onto a stable tool error code.
pub fn client_error_json(err: &ClientError) -> String {
    let code = match err {
        ClientError::InvalidInput(_) => "invalid_input",
        ClientError::Api { status: 404, .. } => "not_found",
        ClientError::Api { .. } => "api_error",
        ClientError::Auth(_) => "auth_error",
        ClientError::Config(_) => "config_error",
        _ => "api_error",
    };
    error_json(code, &err.to_string())
}

/// Parse an optional RFC 3339 due date.
pub fn parse_due(due: Option<&str>) -> Result<Option<DateTime<Utc>>, String> {
    match due {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| {
                error_json(
                    "invalid_due_date",
                    &format!("Due date '{raw}' is not RFC 3339: {e}"),
                )
            }),
    }
}

/// Parse an optional task status string.
pub fn parse_status(status: Option<&str>) -> Result<Option<TaskStatus>, String> {
    match status {
        None => Ok(None),
        Some(raw) => raw
            .parse::<TaskStatus>()
            .map(Some)
            .map_err(|e| error_json("invalid_status", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_json_shape() {
        let raw = error_json("not_found", "Task list missing");
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["error"], "not_found");
        assert_eq!(parsed["message"], "Task list missing");
    }

    #[test]
    fn test_parse_due_accepts_rfc3339() {
        let due = parse_due(Some("2026-09-01T12:00:00Z")).unwrap().unwrap();
        assert_eq!(due.to_rfc3339(), "2026-09-01T12:00:00+00:00");
        assert!(parse_due(None).unwrap().is_none());
    }

    #[test]
    fn test_parse_due_rejects_garbage() {
        let err = parse_due(Some("next tuesday")).unwrap_err();
        let parsed: serde_json::Value = serde_json::from_str(&err).unwrap();
        assert_eq!(parsed["error"], "invalid_due_date");
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(
            parse_status(Some("completed")).unwrap(),
            Some(TaskStatus::Completed)
        );
        assert!(parse_status(None).unwrap().is_none());
        let err = parse_status(Some("done")).unwrap_err();
        assert!(err.contains("invalid_status"));
    }

    #[test]
    fn test_client_error_json_codes() {
        let not_found = client_error_json(&ClientError::api_error(404, "gone"));
        assert!(not_found.contains("not_found"));

        let invalid = client_error_json(&ClientError::InvalidInput("bad".to_string()));
        assert!(invalid.contains("invalid_input"));
    }
}
