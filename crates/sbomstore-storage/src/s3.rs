use crate::content::FileContent;
use crate::keys;
use crate::traits::{ByteStream, ObjectStorage, StorageError, StorageResult};
use async_trait::async_trait;
use futures::StreamExt;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, Attributes, ObjectStore, ObjectStoreExt, PutOptions, PutPayload,
    Result as ObjectResult,
};

/// S3-compatible object storage implementation
#[derive(Clone)]
pub struct S3ObjectStore {
    store: AmazonS3,
    bucket: String,
    max_object_size: u64,
}

impl S3ObjectStore {
    /// Create a new S3ObjectStore instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `force_path_style` - Use path-style addressing; required by most
    ///   S3-compatible providers
    /// * `max_object_size` - Ceiling on a single upload. Uploads are buffered
    ///   fully in memory before the put call, so this bounds per-upload memory.
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        force_path_style: bool,
        max_object_size: u64,
    ) -> StorageResult<Self> {
        // Build AmazonS3 object store from environment and explicit settings.
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region)
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        if force_path_style {
            builder = builder.with_virtual_hosted_style_request(false);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::Config(e.to_string()))?;

        Ok(S3ObjectStore {
            store,
            bucket,
            max_object_size,
        })
    }
}

/// Translate an object_store error into the classified taxonomy.
///
/// This is the only place backend errors are interpreted; nothing above the
/// port boundary ever sees an `object_store::Error`.
fn classify_error(err: ObjectStoreError, key: &str) -> StorageError {
    match err {
        ObjectStoreError::NotFound { .. } => StorageError::NotFound(key.to_string()),
        e @ ObjectStoreError::PermissionDenied { .. } => StorageError::AccessDenied(e.to_string()),
        e @ ObjectStoreError::Unauthenticated { .. } => StorageError::AccessDenied(e.to_string()),
        e @ ObjectStoreError::InvalidPath { .. } => StorageError::InvalidKey {
            key: key.to_string(),
            reason: e.to_string(),
        },
        ObjectStoreError::Generic { store, source } => {
            let message = source.to_string();
            if is_transient(&message) {
                StorageError::Unavailable(format!("{}: {}", store, message))
            } else {
                StorageError::Backend(format!("{}: {}", store, message))
            }
        }
        other => StorageError::Backend(other.to_string()),
    }
}

/// Transport errors that indicate the backend is transiently unreachable or
/// overloaded. The client retries these internally first; by the time they
/// surface here its retry budget is exhausted.
fn is_transient(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("timed out")
        || message.contains("timeout")
        || message.contains("connect")
        || message.contains("connection")
        || message.contains("503")
        || message.contains("service unavailable")
        || message.contains("slow down")
        || message.contains("retries exhausted")
        || message.contains("retry")
}

#[async_trait]
impl ObjectStorage for S3ObjectStore {
    async fn upload(
        &self,
        key: &str,
        content: FileContent,
        content_length: u64,
        content_type: &str,
    ) -> StorageResult<()> {
        keys::validate_key(key)?;

        if content_length > self.max_object_size {
            return Err(StorageError::TooLarge {
                size: content_length,
                limit: self.max_object_size,
            });
        }

        // Buffer the single-use content before the put call. The transport
        // client retries transient failures internally, and each attempt must
        // replay the full payload; a partially consumed reader cannot do that.
        let bytes = content.into_bytes(content_length).await?;

        let size = bytes.len() as u64;
        let location = Path::from(key.to_string());

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());

        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self
            .store
            .put_opts(&location, PutPayload::from(bytes), PutOptions::from(attributes))
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            classify_error(e, key)
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            content_type = %content_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(())
    }

    async fn download(&self, key: &str) -> StorageResult<ByteStream> {
        keys::validate_key(key)?;

        let start = std::time::Instant::now();
        let location = Path::from(key.to_string());

        let result: ObjectResult<_> = self.store.get(&location).await;

        let result = result.map_err(|e| {
            let classified = classify_error(e, key);
            if matches!(classified, StorageError::NotFound(_)) {
                tracing::warn!(bucket = %self.bucket, key = %key, "S3 object not found");
            } else {
                tracing::error!(
                    error = %classified,
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 download failed"
                );
            }
            classified
        })?;

        let bucket = self.bucket.clone();
        let key = key.to_string();

        let stream = result.into_stream().map(move |res| match res {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                tracing::error!(
                    bucket = %bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 download stream error"
                );
                Err(classify_error(e, &key))
            }
        });

        Ok(Box::pin(stream))
    }
}
