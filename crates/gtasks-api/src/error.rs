//! Error translation from client errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use gtasks_shared::errors::ClientError;
use gtasks_shared::models::ErrorBody;

/// Handler-level error carrying the HTTP status to report.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("{what} not found"),
        }
    }

}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        let status = match &err {
            ClientError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ClientError::Api { status, .. } => match StatusCode::from_u16(*status) {
                // Upstream client errors pass through; upstream server
                // failures surface as a bad gateway.
                Ok(code) if code.is_client_error() => code,
                _ => StatusCode::BAD_GATEWAY,
            },
            ClientError::Http(_) => StatusCode::BAD_GATEWAY,
            ClientError::Auth(_) | ClientError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "Request failed");
        } else {
            tracing::debug!(status = %self.status, message = %self.message, "Request rejected");
        }
        let body = ErrorBody {
            error: self.message,
            status_code: self.status.as_u16(),
            detail: None,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_maps_to_422() {
        let err = ApiError::from(ClientError::InvalidInput("bad title".to_string()));
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_upstream_404_passes_through() {
        let err = ApiError::from(ClientError::api_error(404, "Not Found"));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_upstream_500_becomes_bad_gateway() {
        let err = ApiError::from(ClientError::api_error(500, "Backend Error"));
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_auth_error_is_internal() {
        let err = ApiError::from(ClientError::Auth("refresh failed".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
