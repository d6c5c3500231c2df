//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::{object_storage::StorageError, upload::UploadError};

/// API error response envelope: a single machine-readable `error` field
#[derive(Debug, Serialize, JsonSchema)]
pub struct ApiErrorResponse {
    /// Error code or message
    pub error: &'static str,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub const fn new(status: StatusCode, error: &'static str) -> Self {
        Self {
            status,
            inner: ApiErrorResponse { error },
        }
    }

    /// Missing or mismatched bearer credential
    #[must_use]
    pub const fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized")
    }

    /// No route matched the request
    #[must_use]
    pub const fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found")
    }

    /// The request outlived the server's timeout
    #[must_use]
    pub const fn request_timeout() -> Self {
        Self::new(StatusCode::REQUEST_TIMEOUT, "request_timeout")
    }

    /// HTTP status this error is reported with
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// The `error` field of the response body
    #[must_use]
    pub const fn error(&self) -> &'static str {
        self.inner.error
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!("Client error: {} - {}", self.status, self.inner.error),
            500..=599 => tracing::error!("Server error: {} - {}", self.status, self.inner.error),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert upload validation errors to application errors
impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        let status = match &err {
            UploadError::BodyTooLarge { limit } => {
                tracing::debug!("Upload body exceeded {limit} bytes");
                StatusCode::PAYLOAD_TOO_LARGE
            }
            _ => StatusCode::BAD_REQUEST,
        };

        Self::new(status, err.message())
    }
}

/// Convert object storage errors to application errors
impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::Unavailable(msg) => {
                tracing::error!("Storage backend unavailable: {msg}");
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable")
            }
            StorageError::Rejected(msg) => {
                tracing::error!("Storage backend rejected write: {msg}");
                Self::new(StatusCode::BAD_GATEWAY, "storage_error")
            }
        }
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_request() {
        let err = AppError::from(UploadError::MissingProductId);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error(), "missing x-product-id");

        let err = AppError::from(UploadError::InvalidViewIndex);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error(), "x-view-index must be 2 digits like 01");
    }

    #[test]
    fn test_oversized_body_is_payload_too_large() {
        let err = AppError::from(UploadError::BodyTooLarge { limit: 10 });
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.error(), "payload too large");
    }

    #[test]
    fn test_storage_errors_are_server_errors() {
        let err = AppError::from(StorageError::Unavailable("503 SlowDown".to_string()));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.error(), "storage_unavailable");

        let err = AppError::from(StorageError::Rejected("AccessDenied".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error(), "storage_error");
    }

    #[test]
    fn test_error_body_shape() {
        let body = serde_json::to_value(ApiErrorResponse {
            error: "unauthorized",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "error": "unauthorized" }));
    }
}
