//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use dirbrowse_core::error::{AppError, ErrorKind};

/// Message shown for every server-side failure.
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP wrapper around [`AppError`].
///
/// Handlers return `Result<_, ApiError>` and use `?` on any `AppResult`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status, error code, and the message clients may see.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        let err = &self.0;
        match err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.message.clone()),
            ErrorKind::PathRejected => (StatusCode::BAD_REQUEST, "INVALID_PATH", "Invalid path".into()),
            ErrorKind::NotADirectory => (
                StatusCode::BAD_REQUEST,
                "NOT_A_DIRECTORY",
                "Path is not a directory".into(),
            ),
            ErrorKind::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                AppError::invalid_credentials().message,
            ),
            ErrorKind::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                AppError::unauthenticated().message,
            ),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", "Path not found".into()),
            ErrorKind::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                "Method not allowed".into(),
            ),
            ErrorKind::Configuration | ErrorKind::EntropyUnavailable | ErrorKind::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.into(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if self.0.is_server_error() {
            tracing::error!(
                kind = %self.0.kind,
                error = %self.0.message,
                source = ?self.0.source,
                "Request failed with a server error"
            );
        } else {
            tracing::debug!(kind = %self.0.kind, detail = %self.0.message, "Request rejected");
        }

        let body = ApiErrorResponse {
            error: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_and_message(err: AppError) -> (StatusCode, String) {
        let (status, _, message) = ApiError(err).parts();
        (status, message)
    }

    #[test]
    fn test_client_errors_use_fixed_messages() {
        assert_eq!(
            status_and_message(AppError::path_rejected("/../etc escapes")),
            (StatusCode::BAD_REQUEST, "Invalid path".to_string())
        );
        assert_eq!(
            status_and_message(AppError::not_found("/secret/thing")),
            (StatusCode::NOT_FOUND, "Path not found".to_string())
        );
        assert_eq!(
            status_and_message(AppError::validation("Username and password are required")),
            (
                StatusCode::BAD_REQUEST,
                "Username and password are required".to_string()
            )
        );
    }

    #[test]
    fn test_server_errors_hide_detail() {
        for err in [
            AppError::internal("disk /var/x exploded"),
            AppError::entropy_unavailable("getrandom failed"),
            AppError::configuration("bad params"),
        ] {
            let (status, message) = status_and_message(err);
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message, INTERNAL_MESSAGE);
        }
    }

    #[test]
    fn test_auth_failures_are_401() {
        let (status, _) = status_and_message(AppError::invalid_credentials());
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, message) = status_and_message(AppError::unauthenticated());
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message, "Unauthorized");
    }
}
