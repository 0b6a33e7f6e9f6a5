//! Unified error handling for the gtasks client library and its consumers.

use thiserror::Error;

/// Client operation result type
pub type ClientResult<T> = Result<T, ClientError>;

/// Error types for upstream API and local wrapper operations
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Google API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid response: {field} - {reason}")]
    InvalidResponse { field: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Create an API error from an upstream HTTP response
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid response error for protocol violations
    ///
    /// Use this when an upstream response is missing required fields or
    /// contains malformed data that should not be silently defaulted.
    pub fn invalid_response(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True when the upstream reported 404 for the addressed resource.
    ///
    /// Service layers translate this into `Option::None` rather than an error,
    /// matching the upstream "get or absent" contract.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }

    /// Check if the error is recoverable (worth retrying by the caller)
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            ClientError::Http(e) => e.is_timeout() || e.is_connect(),
            ClientError::Api { status, .. } => *status >= 500 || *status == 429,
            // Protocol violations are not recoverable - the upstream is broken
            ClientError::InvalidResponse { .. } => false,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_constructor() {
        let err = ClientError::api_error(404, "not found");
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "not found");
            }
            _ => panic!("Expected Api variant"),
        }
    }

    #[test]
    fn test_is_not_found() {
        assert!(ClientError::api_error(404, "gone").is_not_found());
        assert!(!ClientError::api_error(403, "forbidden").is_not_found());
        assert!(!ClientError::Auth("expired".to_string()).is_not_found());
    }

    #[test]
    fn test_api_error_500_is_recoverable() {
        assert!(ClientError::api_error(500, "internal error").is_recoverable());
        assert!(ClientError::api_error(503, "unavailable").is_recoverable());
    }

    #[test]
    fn test_rate_limit_is_recoverable() {
        assert!(ClientError::api_error(429, "rate limited").is_recoverable());
    }

    #[test]
    fn test_client_errors_not_recoverable() {
        assert!(!ClientError::api_error(400, "bad request").is_recoverable());
        assert!(!ClientError::api_error(404, "not found").is_recoverable());
        assert!(!ClientError::Auth("invalid token".to_string()).is_recoverable());
        assert!(!ClientError::Config("bad".to_string()).is_recoverable());
        assert!(!ClientError::InvalidInput("empty title".to_string()).is_recoverable());
        assert!(!ClientError::invalid_response("payload", "missing").is_recoverable());
    }

    #[test]
    fn test_display_api_error() {
        let err = ClientError::api_error(503, "service down");
        assert_eq!(format!("{err}"), "Google API error: 503 - service down");
    }

    #[test]
    fn test_display_config_error() {
        let err = ClientError::config_error("missing credentials path");
        assert_eq!(
            format!("{err}"),
            "Configuration error: missing credentials path"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{{bad}}").unwrap_err();
        let err: ClientError = json_err.into();
        assert!(matches!(err, ClientError::Serialization(_)));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file gone");
        let err: ClientError = io_err.into();
        assert!(matches!(err, ClientError::Io(_)));
        assert!(!err.is_recoverable());
    }
}
