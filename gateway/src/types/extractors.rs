//! Custom extractors for request validation

use std::convert::Infallible;

use aide::operation::OperationInput;
use aide::OperationOutput;
use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::HeaderMap,
};
use http_body_util::LengthLimitError;

use crate::{types::AppError, upload::UploadError};

/// Upload headers with the still-unread body
///
/// The body is left untouched so that authentication and header validation
/// run before any bytes are pulled from the client.
pub struct RawUpload {
    /// Request headers carrying the credential and upload metadata
    pub headers: HeaderMap,
    body: Body,
}

impl RawUpload {
    /// Reads the full body, refusing anything larger than `limit` bytes
    ///
    /// # Errors
    ///
    /// - `UploadError::BodyTooLarge` if the body exceeds `limit`
    /// - `UploadError::UnreadableBody` if the body stream fails
    pub async fn read_body(self, limit: usize) -> Result<Bytes, UploadError> {
        axum::body::to_bytes(self.body, limit)
            .await
            .map_err(|err| {
                if is_length_limit(&err) {
                    UploadError::BodyTooLarge { limit }
                } else {
                    tracing::debug!("Failed to read upload body: {err}");
                    UploadError::UnreadableBody
                }
            })
    }
}

fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(err) = source {
        if err.is::<LengthLimitError>() {
            return true;
        }
        source = err.source();
    }
    false
}

impl<S> FromRequest<S> for RawUpload
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        Ok(Self {
            headers: parts.headers,
            body,
        })
    }
}

impl OperationInput for RawUpload {
    fn operation_input(
        _ctx: &mut aide::generate::GenContext,
        _operation: &mut aide::openapi::Operation,
    ) {
        // Binary body and metadata headers are opaque to schema generation
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        // Document validation error responses
        AppError::inferred_responses(ctx, operation)
    }
}
