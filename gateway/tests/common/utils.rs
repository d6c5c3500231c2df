use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    response::Response,
};
use http_body_util::BodyExt;
use image_gateway::{
    object_storage::{ObjectMetadata, ObjectStore, StorageError, StorageResult},
    upload::ObjectKey,
};

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Read response body as text
pub async fn read_response_text(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Generate deterministic test image bytes with a PNG signature
pub fn generate_test_image(size: usize) -> Vec<u8> {
    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    PNG_SIGNATURE
        .iter()
        .copied()
        .chain((0..).map(|i: u32| (i % 251) as u8))
        .take(size)
        .collect()
}

/// Object store whose every write fails with the given error
pub struct FailingObjectStore(pub StorageError);

#[async_trait]
impl ObjectStore for FailingObjectStore {
    async fn put(
        &self,
        _key: &ObjectKey,
        _body: Bytes,
        _metadata: ObjectMetadata,
    ) -> StorageResult<()> {
        Err(self.0.clone())
    }
}

/// Object store that takes `delay` to acknowledge each write
pub struct SlowObjectStore(pub Duration);

#[async_trait]
impl ObjectStore for SlowObjectStore {
    async fn put(
        &self,
        _key: &ObjectKey,
        _body: Bytes,
        _metadata: ObjectMetadata,
    ) -> StorageResult<()> {
        tokio::time::sleep(self.0).await;
        Ok(())
    }
}

/// Request body that yields a few bytes and then fails, like a dropped connection
pub fn interrupted_body() -> Body {
    Body::from_stream(futures::stream::iter([
        Ok(Bytes::from_static(b"\x89PNG")),
        Err(std::io::Error::other("connection reset")),
    ]))
}
