//! Storage abstraction trait
//!
//! This module defines the ObjectStorage trait that all storage backends must
//! implement, together with the classified error taxonomy shared by every
//! backend and by the administration layer above them.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

use crate::content::FileContent;

/// Classified storage failures.
///
/// Adapters are the only place where backend-specific errors are translated
/// into this taxonomy; no backend error type crosses the port boundary.
/// Each variant maps to exactly one canonical status code via
/// [`StorageError::status_code`], which the (external) REST layer uses
/// verbatim.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage access denied: {0}")]
    AccessDenied(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("File too large: {size} bytes exceeds the {limit} byte upload ceiling")]
    TooLarge { size: u64, limit: u64 },

    #[error("Content length mismatch: declared {declared} bytes, stream yielded {actual}")]
    LengthMismatch { declared: u64, actual: u64 },

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Canonical status code for this failure kind.
    pub fn status_code(&self) -> u16 {
        match self {
            StorageError::AccessDenied(_) => 403,
            StorageError::NotFound(_) => 404,
            StorageError::InvalidKey { .. } => 400,
            StorageError::Unavailable(_) => 503,
            StorageError::TooLarge { .. } => 413,
            StorageError::LengthMismatch { .. } => 400,
            StorageError::Backend(_) | StorageError::Config(_) | StorageError::Io(_) => 500,
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A downloaded object's content: an owned stream of byte chunks.
///
/// The stream is a fresh, independently readable copy; dropping it releases
/// any backend resources it holds.
pub type ByteStream = Pin<Box<dyn Stream<Item = StorageResult<Bytes>> + Send>>;

/// Storage abstraction trait
///
/// All storage backends (S3-compatible object stores, process memory) must
/// implement this trait. This allows the administration layer to work with any
/// backend without coupling to implementation details.
///
/// **Key format:** keys are generation-scoped, `{generation_id}/{filename}` or
/// `{generation_id}/{enhancement_id}/{filename}`. See the crate root
/// documentation.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `content` under `key`, replacing any existing object.
    ///
    /// `content_length` must equal the exact number of bytes the content
    /// yields; a mismatch fails with [`StorageError::LengthMismatch`]. The
    /// content is fully buffered before any retryable network call, so the
    /// caller's reader is consumed exactly once even if the transport retries.
    async fn upload(
        &self,
        key: &str,
        content: FileContent,
        content_length: u64,
        content_type: &str,
    ) -> StorageResult<()>;

    /// Fetch the object stored under `key`.
    ///
    /// An absent key always fails with [`StorageError::NotFound`], never an
    /// empty stream.
    async fn download(&self, key: &str) -> StorageResult<ByteStream>;
}
