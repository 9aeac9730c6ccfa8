//! Blob storage abstraction trait
//!
//! This module defines the `BlobStorage` trait the item store uses to persist and remove
//! the bytes behind file items.

use async_trait::async_trait;
use quickshare_core::AppError;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;
use uuid::Uuid;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid blob path: {0}")]
    InvalidPath(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Sequential, read-once byte stream supplied by the uploader.
pub type BlobReader = Pin<Box<dyn AsyncRead + Send + Unpin>>;

/// Outcome of a successful `store` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub path: PathBuf,
    pub bytes_written: u64,
}

/// Blob storage trait
///
/// Blobs are addressed by the item identifier when written and by the returned path
/// afterwards. Implementations never derive on-disk names from the caller's filename.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Stream `reader` to a new blob named after `id` and return where it landed.
    ///
    /// `name_hint` is the uploaded filename; at most its extension is reused. On failure
    /// no partial blob is left behind.
    async fn store(&self, id: Uuid, name_hint: &str, reader: BlobReader)
        -> StorageResult<StoredBlob>;

    /// Delete the blob at `path`. Removing a blob that is already gone succeeds.
    async fn remove(&self, path: &Path) -> StorageResult<()>;
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UploadFailed(msg) => AppError::Storage(msg),
            StorageError::DeleteFailed(msg) => AppError::Storage(msg),
            StorageError::InvalidPath(msg) => AppError::Internal(msg),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_storage_error_upload_failed() {
        let app_err: AppError = StorageError::UploadFailed("disk full".to_string()).into();
        match app_err {
            AppError::Storage(msg) => assert_eq!(msg, "disk full"),
            _ => panic!("Expected Storage variant"),
        }
    }

    #[test]
    fn test_from_storage_error_delete_failed() {
        let app_err: AppError = StorageError::DeleteFailed("busy".to_string()).into();
        assert!(matches!(app_err, AppError::Storage(_)));
    }

    #[test]
    fn test_from_storage_error_invalid_path() {
        let app_err: AppError = StorageError::InvalidPath("/etc/passwd".to_string()).into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }
}
