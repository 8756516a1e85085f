//! Shared key generation and validation for storage backends.
//!
//! Key format: `{generation_id}/{filename}` for generation-level files,
//! `{generation_id}/{enhancement_id}/{filename}` for enhancement-level files.
//! The layout is part of the persisted contract and must stay bit-exact
//! across backend migrations.

use crate::traits::{StorageError, StorageResult};

/// Generate the storage key for a generation-level file.
///
/// Identical inputs always produce the identical key, so repeated stores of
/// the same file overwrite deterministically.
pub fn generation_key(generation_id: &str, filename: &str) -> String {
    format!("{}/{}", generation_id, filename)
}

/// Generate the storage key for an enhancement-level file, nested under the
/// generation.
pub fn enhancement_key(generation_id: &str, enhancement_id: &str, filename: &str) -> String {
    format!("{}/{}/{}", generation_id, enhancement_id, filename)
}

/// Validate a single key segment (an identifier or filename).
///
/// Segments must be non-empty and must not contain `/`; embedded slashes are
/// not escaped during key construction and would change the key shape.
pub fn validate_segment(segment: &str, what: &str) -> StorageResult<()> {
    if segment.is_empty() {
        return Err(StorageError::InvalidKey {
            key: segment.to_string(),
            reason: format!("{} must not be empty", what),
        });
    }
    if segment.contains('/') {
        return Err(StorageError::InvalidKey {
            key: segment.to_string(),
            reason: format!("{} must not contain '/'", what),
        });
    }
    Ok(())
}

/// Validate a full storage key before handing it to a backend.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey {
            key: key.to_string(),
            reason: "key must not be empty".to_string(),
        });
    }
    if key.starts_with('/') {
        return Err(StorageError::InvalidKey {
            key: key.to_string(),
            reason: "key must not start with '/'".to_string(),
        });
    }
    if key.split('/').any(|segment| segment == ".." || segment.is_empty()) {
        return Err(StorageError::InvalidKey {
            key: key.to_string(),
            reason: "key must not contain empty or '..' segments".to_string(),
        });
    }
    Ok(())
}
