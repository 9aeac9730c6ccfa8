use crate::keys::blob_file_name;
use crate::traits::{BlobReader, BlobStorage, StorageError, StorageResult, StoredBlob};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Local filesystem blob storage
#[derive(Clone, Debug)]
pub struct LocalBlobStorage {
    base_path: PathBuf,
}

impl LocalBlobStorage {
    /// Create a new LocalBlobStorage rooted at `base_path`.
    ///
    /// The directory (and its parents) is created if missing, then canonicalized so every
    /// blob path handed out is absolute.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        let base_path = fs::canonicalize(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to canonicalize storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        tracing::info!(path = %base_path.display(), "Using upload directory");

        Ok(LocalBlobStorage { base_path })
    }

    /// Canonical directory all blobs live under.
    pub fn root(&self) -> &Path {
        &self.base_path
    }

    /// Reject paths that could point outside the storage directory.
    fn validate_path(&self, path: &Path) -> StorageResult<()> {
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::CurDir));

        if escapes || !path.starts_with(&self.base_path) || path == self.base_path {
            return Err(StorageError::InvalidPath(format!(
                "{} is not a blob under {}",
                path.display(),
                self.base_path.display()
            )));
        }

        Ok(())
    }

    /// Remove a partially written blob after a failed upload.
    async fn discard_partial(&self, path: &Path) {
        if let Err(e) = fs::remove_file(path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::error!(
                    error = %e,
                    path = %path.display(),
                    "Failed to remove partially written blob"
                );
            }
        }
    }
}

#[async_trait]
impl BlobStorage for LocalBlobStorage {
    async fn store(
        &self,
        id: Uuid,
        name_hint: &str,
        mut reader: BlobReader,
    ) -> StorageResult<StoredBlob> {
        let path = self.base_path.join(blob_file_name(id, name_hint));
        let start = std::time::Instant::now();

        // create_new: an existing blob is never truncated or overwritten
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        let written = async {
            let bytes_copied = tokio::io::copy(&mut reader, &mut file).await.map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to write stream to file {}: {}",
                    path.display(),
                    e
                ))
            })?;

            file.flush().await.map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to flush file {}: {}",
                    path.display(),
                    e
                ))
            })?;

            file.sync_all().await.map_err(|e| {
                StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
            })?;

            Ok::<u64, StorageError>(bytes_copied)
        }
        .await;

        drop(file);

        let bytes_written = match written {
            Ok(bytes) => bytes,
            Err(e) => {
                self.discard_partial(&path).await;
                tracing::warn!(
                    error = %e,
                    item_id = %id,
                    path = %path.display(),
                    "Blob upload failed, partial file removed"
                );
                return Err(e);
            }
        };

        tracing::info!(
            path = %path.display(),
            item_id = %id,
            size_bytes = bytes_written,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage stream upload successful"
        );

        Ok(StoredBlob {
            path,
            bytes_written,
        })
    }

    async fn remove(&self, path: &Path) -> StorageResult<()> {
        self.validate_path(path)?;
        let start = std::time::Instant::now();

        match fs::remove_file(path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Blob already removed");
                return Ok(());
            }
            Err(e) => {
                return Err(StorageError::DeleteFailed(format!(
                    "Failed to delete file {}: {}",
                    path.display(),
                    e
                )));
            }
        }

        tracing::info!(
            path = %path.display(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage delete successful"
        );

        Ok(())
    }
}
