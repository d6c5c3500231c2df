//! In-memory object store for tests

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use axum::body::Bytes;

use super::{ObjectMetadata, ObjectStore, StorageResult};
use crate::upload::ObjectKey;

/// An object as written by the last `put`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object bytes
    pub body: Bytes,
    /// Metadata written with the object
    pub metadata: ObjectMetadata,
}

/// Object store keeping everything in a map, last write wins
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<HashMap<String, StoredObject>>,
    puts: Mutex<usize>,
}

impl InMemoryObjectStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Object currently stored at `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Number of distinct keys stored
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `put` calls received
    #[must_use]
    pub fn put_count(&self) -> usize {
        *self.puts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(
        &self,
        key: &ObjectKey,
        body: Bytes,
        metadata: ObjectMetadata,
    ) -> StorageResult<()> {
        *self.puts.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), StoredObject { body, metadata });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::{ImageExt, ProductSegment};

    fn key(view: &str) -> ObjectKey {
        let product = ProductSegment::sanitize("sku").unwrap();
        ObjectKey::new(&product, view.parse().unwrap(), ImageExt::Png)
    }

    #[tokio::test]
    async fn test_put_overwrites_same_key() {
        let store = InMemoryObjectStore::new();
        let metadata = ObjectMetadata::immutable_image("image/png");

        store
            .put(&key("01"), Bytes::from_static(b"first"), metadata)
            .await
            .unwrap();
        store
            .put(&key("01"), Bytes::from_static(b"second"), metadata)
            .await
            .unwrap();
        store
            .put(&key("02"), Bytes::from_static(b"other"), metadata)
            .await
            .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.put_count(), 3);
        let stored = store.get("products/sku/view_01.png").unwrap();
        assert_eq!(&stored.body[..], b"second");
        assert_eq!(
            stored.metadata.cache_control,
            "public, max-age=31536000, immutable"
        );
    }
}
