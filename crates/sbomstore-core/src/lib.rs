//! Sbomstore Core Library
//!
//! This crate provides configuration and shared type definitions used across
//! the sbomstore components. Storage logic itself lives in `sbomstore-storage`.

pub mod config;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use storage_types::StorageBackend;
