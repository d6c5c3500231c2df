//! Object storage for uploaded images
mod error;
#[cfg(any(test, feature = "test-utils"))]
mod memory;
mod s3;

use async_trait::async_trait;
use axum::body::Bytes;

pub use error::{StorageError, StorageResult};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::{InMemoryObjectStore, StoredObject};
pub use s3::S3ObjectStore;

use crate::upload::ObjectKey;

/// Cache directive stored with every image. Keys are overwritten in place,
/// never versioned, and CDNs may keep them for a year.
pub const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// HTTP metadata stored alongside an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectMetadata {
    /// `Content-Type` served for the object
    pub content_type: &'static str,
    /// `Cache-Control` served for the object
    pub cache_control: &'static str,
}

impl ObjectMetadata {
    /// Metadata for an image with the long-lived immutable cache directive
    #[must_use]
    pub const fn immutable_image(content_type: &'static str) -> Self {
        Self {
            content_type,
            cache_control: IMMUTABLE_CACHE_CONTROL,
        }
    }
}

/// A bucket that accepts whole-object writes
///
/// `put` must not return until the backend has acknowledged the write.
/// Writing an existing key replaces it.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `body` at `key`
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the backend does not acknowledge the write
    async fn put(&self, key: &ObjectKey, body: Bytes, metadata: ObjectMetadata)
        -> StorageResult<()>;
}
