//! Configuration module
//!
//! This module provides configuration for the storage service, loaded from
//! environment variables (with `.env` support for local development).
//! Backend connection parameters (endpoint, credentials, bucket, region) are
//! deployment concerns; the AWS credential chain itself is resolved by the
//! storage backend from the standard `AWS_*` variables.

use std::env;

use crate::storage_types::StorageBackend;

const MAX_OBJECT_SIZE_MB: u64 = 64;

/// Storage service configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    // Storage configuration
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO etc.)
    pub s3_force_path_style: bool,
    pub aws_region: Option<String>,
    /// Ceiling on a single buffered upload. Uploads are held fully in memory
    /// before hitting the backend transport, so this bounds per-request memory.
    pub max_object_size_bytes: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => Some(value.parse::<StorageBackend>()?),
            Err(_) => None,
        };

        let max_object_size_mb = env::var("MAX_OBJECT_SIZE_MB")
            .unwrap_or_else(|_| MAX_OBJECT_SIZE_MB.to_string())
            .parse::<u64>()
            .unwrap_or(MAX_OBJECT_SIZE_MB);

        let s3_force_path_style = env::var("S3_FORCE_PATH_STYLE")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Config {
            environment,
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            s3_force_path_style,
            aws_region: env::var("AWS_REGION").ok(),
            max_object_size_bytes: max_object_size_mb * 1024 * 1024,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    // Convenience getters for common fields
    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.s3_endpoint.as_deref()
    }

    pub fn s3_force_path_style(&self) -> bool {
        self.s3_force_path_style
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.aws_region.as_deref()
    }

    pub fn max_object_size_bytes(&self) -> u64 {
        self.max_object_size_bytes
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            environment: "development".to_string(),
            storage_backend: None,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            s3_force_path_style: false,
            aws_region: None,
            max_object_size_bytes: MAX_OBJECT_SIZE_MB * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.is_production());
        assert_eq!(config.max_object_size_bytes(), 64 * 1024 * 1024);
        assert!(config.storage_backend().is_none());
    }

    #[test]
    fn test_is_production() {
        let config = Config {
            environment: "Production".to_string(),
            ..Config::default()
        };
        assert!(config.is_production());
    }
}
