//! In-memory object storage, a drop-in substitute for the S3 backend in tests
//! and ephemeral environments. Data does not survive a process restart; that
//! is an intentional, documented property of this backend.

use crate::content::FileContent;
use crate::keys;
use crate::traits::{ByteStream, ObjectStorage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory object storage implementation.
///
/// Each instance owns its own map, so tests construct isolated stores and
/// inject them explicitly; there is no shared ambient state. The map is
/// internally synchronized with last-write-wins semantics for concurrent
/// uploads to the same key.
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<String, Bytes>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects, for test assertions.
    pub fn len(&self) -> usize {
        self.objects.read().map(|objects| objects.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStore {
    async fn upload(
        &self,
        key: &str,
        content: FileContent,
        content_length: u64,
        _content_type: &str,
    ) -> StorageResult<()> {
        keys::validate_key(key)?;

        let bytes = content.into_bytes(content_length).await?;
        let size = bytes.len();

        self.objects
            .write()
            .map_err(|_| StorageError::Backend("storage map poisoned".to_string()))?
            .insert(key.to_string(), bytes);

        tracing::info!(key = %key, size_bytes = size, "Stored file in memory");

        Ok(())
    }

    async fn download(&self, key: &str) -> StorageResult<ByteStream> {
        keys::validate_key(key)?;

        let bytes = self
            .objects
            .read()
            .map_err(|_| StorageError::Backend("storage map poisoned".to_string()))?
            .get(key)
            .cloned();

        match bytes {
            Some(bytes) => {
                tracing::debug!(key = %key, size_bytes = bytes.len(), "Retrieving file from memory");
                // Bytes clones are cheap reference-counted views; each caller
                // gets an independent single-chunk stream.
                Ok(Box::pin(futures::stream::once(async move { Ok(bytes) })))
            }
            None => {
                tracing::warn!(key = %key, "File not found in memory");
                Err(StorageError::NotFound(key.to_string()))
            }
        }
    }
}

#[cfg(all(test, feature = "storage-memory"))]
mod tests {
    use super::*;
    use futures::StreamExt;

    async fn drain(mut stream: ByteStream) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(chunk) = stream.next().await {
            out.extend_from_slice(&chunk.unwrap());
        }
        out
    }

    #[tokio::test]
    async fn test_upload_download_round_trip() {
        let storage = InMemoryObjectStore::new();
        let data = b"sbom payload".to_vec();

        storage
            .upload(
                "gen-1/sbom.json",
                FileContent::from_bytes(data.clone()),
                data.len() as u64,
                "application/json",
            )
            .await
            .unwrap();

        let downloaded = drain(storage.download("gen-1/sbom.json").await.unwrap()).await;
        assert_eq!(downloaded, data);
    }

    #[tokio::test]
    async fn test_overwrite_same_key() {
        let storage = InMemoryObjectStore::new();

        storage
            .upload("k/a", FileContent::from_bytes(b"first".to_vec()), 5, "text/plain")
            .await
            .unwrap();
        storage
            .upload("k/a", FileContent::from_bytes(b"second".to_vec()), 6, "text/plain")
            .await
            .unwrap();

        let downloaded = drain(storage.download("k/a").await.unwrap()).await;
        assert_eq!(downloaded, b"second");
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_file() {
        let storage = InMemoryObjectStore::new();

        storage
            .upload("k/empty", FileContent::from_bytes(Vec::new()), 0, "text/plain")
            .await
            .unwrap();

        let downloaded = drain(storage.download("k/empty").await.unwrap()).await;
        assert!(downloaded.is_empty());
    }

    #[tokio::test]
    async fn test_download_absent_key_is_not_found() {
        let storage = InMemoryObjectStore::new();

        let err = storage
            .download("gen-1/missing.json")
            .await
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_length_mismatch_rejected() {
        let storage = InMemoryObjectStore::new();

        let err = storage
            .upload("k/a", FileContent::from_bytes(b"abc".to_vec()), 99, "text/plain")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::LengthMismatch { .. }));
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_key_rejected() {
        let storage = InMemoryObjectStore::new();

        let err = storage
            .upload("", FileContent::from_bytes(Vec::new()), 0, "text/plain")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey { .. }));

        let err = storage
            .download("/leading/slash")
            .await
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey { .. }));
    }

    #[tokio::test]
    async fn test_upload_from_reader() {
        let storage = InMemoryObjectStore::new();
        let data = b"streamed sbom content".to_vec();

        storage
            .upload(
                "gen-1/streamed.json",
                FileContent::from_reader(std::io::Cursor::new(data.clone())),
                data.len() as u64,
                "application/json",
            )
            .await
            .unwrap();

        let downloaded = drain(storage.download("gen-1/streamed.json").await.unwrap()).await;
        assert_eq!(downloaded, data);
    }

    #[tokio::test]
    async fn test_downloads_are_independent_copies() {
        let storage = InMemoryObjectStore::new();
        let data = b"shared".to_vec();

        storage
            .upload("k/a", FileContent::from_bytes(data.clone()), 6, "text/plain")
            .await
            .unwrap();

        let first = storage.download("k/a").await.unwrap();
        let second = storage.download("k/a").await.unwrap();
        assert_eq!(drain(first).await, data);
        assert_eq!(drain(second).await, data);
    }

    #[tokio::test]
    async fn test_concurrent_uploads_distinct_keys() {
        let storage = std::sync::Arc::new(InMemoryObjectStore::new());

        let mut handles = Vec::new();
        for i in 0..16 {
            let storage = storage.clone();
            handles.push(tokio::spawn(async move {
                let data = format!("payload-{}", i).into_bytes();
                let key = format!("gen/{}.json", i);
                storage
                    .upload(&key, FileContent::from_bytes(data.clone()), data.len() as u64, "application/json")
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(storage.len(), 16);
    }
}
