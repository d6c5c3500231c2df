//! S3-compatible object store (AWS S3, Cloudflare R2, MinIO, LocalStack)

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};
use axum::body::Bytes;
use tracing::debug;

use super::{ObjectMetadata, ObjectStore, StorageResult};
use crate::upload::ObjectKey;

/// Object store backed by an S3 bucket
pub struct S3ObjectStore {
    s3_client: Arc<S3Client>,
    bucket_name: String,
}

impl S3ObjectStore {
    /// Creates a new S3 object store
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - Bucket the images are written to
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>, bucket_name: String) -> Self {
        Self {
            s3_client,
            bucket_name,
        }
    }

    /// Name of the target bucket
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    /// Writes the object with a single `PutObject` call
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` for 5xx responses, timeouts and connection failures
    /// Returns `StorageError::Rejected` for any other S3 error
    async fn put(
        &self,
        key: &ObjectKey,
        body: Bytes,
        metadata: ObjectMetadata,
    ) -> StorageResult<()> {
        let content_length = body.len();

        self.s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key.as_str())
            .body(ByteStream::from(body))
            .content_type(metadata.content_type)
            .cache_control(metadata.cache_control)
            .send()
            .await?;

        debug!(
            "Stored s3://{}/{} ({content_length} bytes)",
            self.bucket_name, key
        );

        Ok(())
    }
}
