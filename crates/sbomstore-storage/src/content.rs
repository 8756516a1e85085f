//! Owned upload content: an already-buffered byte value or a single-use reader.
//!
//! Backend SDK clients retry failed uploads transparently. A retried request
//! that re-reads a partially consumed stream sends truncated or corrupted
//! bytes, so adapters convert the caller's content into a replayable `Bytes`
//! value before the first network attempt. [`FileContent::into_bytes`] is that
//! conversion: one full read pass, validated against the declared length.

use bytes::Bytes;
use std::pin::Pin;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::traits::{StorageError, StorageResult};

const READ_CHUNK_SIZE: usize = 8192;

// Preallocation cap; the declared length is caller input and must not drive
// an arbitrarily large allocation before any bytes arrive.
const MAX_PREALLOC_BYTES: u64 = 16 * 1024 * 1024;

/// Content handed to [`crate::ObjectStorage::upload`].
///
/// Single-owner, single-use: once an upload begins buffering, the underlying
/// reader is consumed exactly once and cannot be reused by the caller.
pub enum FileContent {
    /// Content already resident in memory.
    Bytes(Bytes),
    /// A non-replayable byte source, read once to exhaustion.
    Reader(Pin<Box<dyn AsyncRead + Send + Unpin>>),
}

impl FileContent {
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        FileContent::Bytes(bytes.into())
    }

    pub fn from_reader(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        FileContent::Reader(Box::pin(reader))
    }

    /// Buffer the content into a single `Bytes` value of exactly
    /// `declared_len` bytes.
    ///
    /// Fails with [`StorageError::LengthMismatch`] if the content yields a
    /// different byte count. Reading stops as soon as the declared length is
    /// exceeded, so a misbehaving reader cannot grow the buffer unboundedly.
    pub async fn into_bytes(self, declared_len: u64) -> StorageResult<Bytes> {
        match self {
            FileContent::Bytes(bytes) => {
                let actual = bytes.len() as u64;
                if actual != declared_len {
                    return Err(StorageError::LengthMismatch {
                        declared: declared_len,
                        actual,
                    });
                }
                Ok(bytes)
            }
            FileContent::Reader(mut reader) => {
                let mut buffer =
                    Vec::with_capacity(declared_len.min(MAX_PREALLOC_BYTES) as usize);
                let mut temp_buf = vec![0u8; READ_CHUNK_SIZE];

                loop {
                    let bytes_read = reader.read(&mut temp_buf).await?;
                    if bytes_read == 0 {
                        break;
                    }
                    buffer.extend_from_slice(&temp_buf[..bytes_read]);
                    if buffer.len() as u64 > declared_len {
                        return Err(StorageError::LengthMismatch {
                            declared: declared_len,
                            actual: buffer.len() as u64,
                        });
                    }
                }

                if buffer.len() as u64 != declared_len {
                    return Err(StorageError::LengthMismatch {
                        declared: declared_len,
                        actual: buffer.len() as u64,
                    });
                }

                Ok(Bytes::from(buffer))
            }
        }
    }
}

impl From<Bytes> for FileContent {
    fn from(bytes: Bytes) -> Self {
        FileContent::Bytes(bytes)
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(bytes: Vec<u8>) -> Self {
        FileContent::Bytes(Bytes::from(bytes))
    }
}

impl std::fmt::Debug for FileContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileContent::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            FileContent::Reader(_) => f.debug_tuple("Reader").finish(),
        }
    }
}
