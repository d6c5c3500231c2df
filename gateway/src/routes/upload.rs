//! Product image upload endpoint

use std::sync::Arc;

use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    object_storage::{ObjectMetadata, ObjectStore},
    state::GatewayConfig,
    types::{AppError, RawUpload},
    upload::UploadMetadata,
};

/// Successful upload response
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Always `true`
    pub ok: bool,
    /// Object key the image was stored at, `products/<id>/view_<NN>.<ext>`
    pub key: String,
    /// Public URL of the stored image
    pub public_url: String,
}

/// Stores a product image at its deterministic key
///
/// Expects the raw image bytes as body and the following headers:
/// - `Authorization: Bearer <token>`
/// - `x-product-id`: product identifier, sanitized into the key
/// - `x-view-index`: two-digit view number such as `01`
/// - `x-ext`: `png` (default), `jpg`, `jpeg` or `webp`
///
/// Uploading the same product view again overwrites the previous image.
///
/// # Errors
///
/// - 401 `unauthorized` if the bearer token is missing or wrong
/// - 400 for the first failing header or an empty body
/// - 413 if the body exceeds the configured maximum
/// - 502/503 if the object store does not acknowledge the write
#[instrument(skip_all)]
pub async fn handler(
    Extension(config): Extension<Arc<GatewayConfig>>,
    Extension(object_store): Extension<Arc<dyn ObjectStore>>,
    upload: RawUpload,
) -> Result<Json<UploadResponse>, AppError> {
    // Auth runs before anything else, including reading the body
    if !config.is_authorized(&upload.headers) {
        return Err(AppError::unauthorized());
    }

    let metadata = UploadMetadata::from_headers(&upload.headers)?;
    let body = upload.read_body(config.max_upload_bytes()).await?;
    let request = metadata.with_body(body)?;

    let byte_count = request.body.len();
    object_store
        .put(
            &request.key,
            request.body,
            ObjectMetadata::immutable_image(request.content_type),
        )
        .await?;

    tracing::info!(key = %request.key, bytes = byte_count, "Stored product image");

    Ok(Json(UploadResponse {
        ok: true,
        public_url: config.public_url(&request.key),
        key: request.key.into_string(),
    }))
}
