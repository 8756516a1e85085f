//! Storage administration: key construction and batch orchestration.
//!
//! Each call is stateless. Key computation is deterministic, so repeating a
//! store call overwrites the same objects. A failed upload in a batch is
//! surfaced immediately; files uploaded before the failure stay persisted —
//! there is no compensating rollback.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use sbomstore_storage::keys;
use sbomstore_storage::{ByteStream, ObjectStorage, StorageError, StorageResult};

use crate::sbom_file::SbomFile;

/// Orchestrates SBOM file persistence over an injected storage backend.
#[derive(Clone)]
pub struct StorageAdministration {
    storage: Arc<dyn ObjectStorage>,
}

impl StorageAdministration {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        StorageAdministration { storage }
    }

    /// Store files at the root of the generation folder.
    ///
    /// Key shape: `{generation_id}/{filename}`. Returns the mapping from each
    /// filename to its storage key.
    pub async fn store_generation_sboms(
        &self,
        generation_id: &str,
        files: Vec<SbomFile>,
    ) -> StorageResult<HashMap<String, String>> {
        keys::validate_segment(generation_id, "generation id")?;
        self.store_batch(files, |filename| {
            keys::generation_key(generation_id, filename)
        })
        .await
    }

    /// Store files nested under the generation in an enhancement folder.
    ///
    /// Key shape: `{generation_id}/{enhancement_id}/{filename}`.
    pub async fn store_enhancement_sboms(
        &self,
        generation_id: &str,
        enhancement_id: &str,
        files: Vec<SbomFile>,
    ) -> StorageResult<HashMap<String, String>> {
        keys::validate_segment(generation_id, "generation id")?;
        keys::validate_segment(enhancement_id, "enhancement id")?;
        self.store_batch(files, |filename| {
            keys::enhancement_key(generation_id, enhancement_id, filename)
        })
        .await
    }

    /// Fetch the content stored under `storage_key`.
    ///
    /// Delegates directly to the active backend; an absent key is a
    /// [`StorageError::NotFound`] failure, passed through unchanged.
    pub async fn get_file_content(&self, storage_key: &str) -> StorageResult<ByteStream> {
        self.storage.download(storage_key).await
    }

    async fn store_batch<F>(
        &self,
        files: Vec<SbomFile>,
        make_key: F,
    ) -> StorageResult<HashMap<String, String>>
    where
        F: Fn(&str) -> String,
    {
        // Validate the whole batch before the first upload, so structural
        // caller errors never leave partial state behind.
        let mut seen = HashSet::with_capacity(files.len());
        for file in &files {
            keys::validate_segment(&file.filename, "filename")?;
            if !seen.insert(file.filename.clone()) {
                return Err(StorageError::InvalidKey {
                    key: file.filename.clone(),
                    reason: "duplicate filename in batch".to_string(),
                });
            }
        }

        let mut mapping = HashMap::with_capacity(files.len());
        for file in files {
            let key = make_key(&file.filename);
            self.storage
                .upload(&key, file.content, file.size, &file.content_type)
                .await?;
            tracing::debug!(filename = %file.filename, key = %key, "Stored SBOM file");
            mapping.insert(file.filename, key);
        }

        tracing::info!(file_count = mapping.len(), "Stored SBOM batch");

        Ok(mapping)
    }
}
