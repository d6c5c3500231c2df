//! Upload request validation and key derivation
mod error;
mod key;

use axum::{body::Bytes, http::HeaderMap};

pub use error::UploadError;
pub use key::{ImageExt, ObjectKey, ProductSegment, ViewIndex, MAX_PRODUCT_SEGMENT_LEN};

/// Header carrying the product identifier
pub const PRODUCT_ID_HEADER: &str = "x-product-id";
/// Header carrying the two-digit view index
pub const VIEW_INDEX_HEADER: &str = "x-view-index";
/// Header carrying the optional image extension
pub const EXT_HEADER: &str = "x-ext";

/// Upload metadata that passed header validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadMetadata {
    /// Sanitized product identifier
    pub product: ProductSegment,
    /// View number within the product
    pub view_index: ViewIndex,
    /// Declared image extension
    pub ext: ImageExt,
}

impl UploadMetadata {
    /// Validates the metadata headers, stopping at the first failure.
    ///
    /// Checks run in this order: product id present, view index present,
    /// view index format, extension.
    ///
    /// # Errors
    ///
    /// Returns the `UploadError` of the first failing check
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, UploadError> {
        let product_id = header_str(headers, PRODUCT_ID_HEADER);
        let view_index = header_str(headers, VIEW_INDEX_HEADER);
        let ext = header_str(headers, EXT_HEADER);

        let product = ProductSegment::sanitize(product_id.as_deref().unwrap_or_default())?;
        let view_index = view_index.as_deref().unwrap_or_default().parse()?;
        let ext = ImageExt::from_declared(ext.as_deref())?;

        Ok(Self {
            product,
            view_index,
            ext,
        })
    }

    /// Storage key for this upload
    #[must_use]
    pub fn object_key(&self) -> ObjectKey {
        ObjectKey::new(&self.product, self.view_index, self.ext)
    }

    /// Attaches the body, completing validation
    ///
    /// # Errors
    ///
    /// Returns `UploadError::EmptyBody` if `body` has no bytes
    pub fn with_body(self, body: Bytes) -> Result<UploadRequest, UploadError> {
        if body.is_empty() {
            return Err(UploadError::EmptyBody);
        }

        Ok(UploadRequest {
            key: self.object_key(),
            content_type: self.ext.content_type(),
            body,
        })
    }
}

/// Fully validated upload, ready to be stored
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Derived storage key
    pub key: ObjectKey,
    /// MIME type resolved from the declared extension
    pub content_type: &'static str,
    /// Non-empty image bytes
    pub body: Bytes,
}

impl UploadRequest {
    /// Validates headers then body, in that order
    ///
    /// # Errors
    ///
    /// Returns the `UploadError` of the first failing check
    pub fn validate(headers: &HeaderMap, body: Bytes) -> Result<Self, UploadError> {
        UploadMetadata::from_headers(headers)?.with_body(body)
    }
}

/// Header value as text, repeated headers joined with `", "`.
///
/// Non-UTF-8 bytes are replaced rather than rejected, sanitization turns them
/// into underscores anyway.
fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    let values: Vec<_> = headers
        .get_all(name)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}
