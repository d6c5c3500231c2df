//! Error types for upload validation

use thiserror::Error;

/// Reasons an upload is refused before it reaches object storage
///
/// Variants are listed in the order the checks run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// `x-product-id` absent or blank
    #[error("missing x-product-id")]
    MissingProductId,

    /// `x-view-index` absent or blank
    #[error("missing x-view-index")]
    MissingViewIndex,

    /// `x-view-index` is not exactly two digits
    #[error("x-view-index must be 2 digits like 01")]
    InvalidViewIndex,

    /// `x-ext` is present but not a supported image extension
    #[error("unsupported ext")]
    UnsupportedExt,

    /// Request body larger than the configured ceiling
    #[error("payload too large")]
    BodyTooLarge {
        /// Ceiling in bytes
        limit: usize,
    },

    /// Request body could not be read from the client
    #[error("unreadable body")]
    UnreadableBody,

    /// Request body has no bytes
    #[error("empty body")]
    EmptyBody,
}

impl UploadError {
    /// Message reported in the `error` field of the response
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::MissingProductId => "missing x-product-id",
            Self::MissingViewIndex => "missing x-view-index",
            Self::InvalidViewIndex => "x-view-index must be 2 digits like 01",
            Self::UnsupportedExt => "unsupported ext",
            Self::BodyTooLarge { .. } => "payload too large",
            Self::UnreadableBody => "unreadable body",
            Self::EmptyBody => "empty body",
        }
    }
}
