//! Sbomstore Storage Library
//!
//! This crate provides the object-storage abstraction and implementations for
//! sbomstore. It includes the ObjectStorage trait and implementations backed
//! by S3-compatible object stores and by process memory.
//!
//! # Storage key format
//!
//! Storage keys are derived from the generation identity. All backends use the
//! same key layout for consistency:
//!
//! - **Generation-level files**: `{generation_id}/{filename}`
//! - **Enhancement-level files**: `{generation_id}/{enhancement_id}/{filename}`
//!
//! Keys must not contain `..` or a leading `/`. Key generation is centralized
//! in the `keys` module so all callers stay consistent.
//!
//! # Upload buffering
//!
//! Adapters buffer the caller's content fully in memory before any network
//! call, so transport-level retries inside the backend client always replay
//! identical bytes. Single-object size is therefore capped by the configured
//! `max_object_size_bytes` ceiling.

pub mod content;
pub mod factory;
pub mod keys;
#[cfg(feature = "storage-memory")]
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use content::FileContent;
pub use factory::create_storage;
#[cfg(feature = "storage-memory")]
pub use memory::InMemoryObjectStore;
#[cfg(feature = "storage-s3")]
pub use s3::S3ObjectStore;
pub use sbomstore_core::StorageBackend;
pub use traits::{ByteStream, ObjectStorage, StorageError, StorageResult};
