//! Sbomstore Services Library
//!
//! This crate provides the storage administration layer: it turns
//! domain-level batches of SBOM files into object-storage operations and
//! returns the resulting filename-to-key mapping. The REST surface that
//! consumes it lives elsewhere.

pub mod admin;
pub mod sbom_file;

// Re-export commonly used types
pub use admin::StorageAdministration;
pub use sbom_file::SbomFile;
pub use sbomstore_storage::{
    create_storage, ByteStream, FileContent, ObjectStorage, StorageError, StorageResult,
};
