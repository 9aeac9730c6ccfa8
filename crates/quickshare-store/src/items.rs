//! Item index
//!
//! All metadata lives in one `HashMap` behind a `tokio::sync::RwLock`. Reads (`get`,
//! `list`, `resolve_blob`) share the lock; `create` and `delete` take it exclusively,
//! but only around the index mutation. Blob I/O always happens outside the lock:
//! identifiers are random UUIDs, so a blob can be written before its entry exists
//! without racing another writer for the same name.
//!
//! Expired entries are invisible to every read. Whichever read first notices one reaps
//! it: the entry is removed under the write lock after re-checking expiry, then its
//! blob is removed.

use chrono::{Duration, Utc};
use quickshare_core::{
    derive_display_name, file_display_name, AppError, BlobLocation, FileMeta, Item, ItemKind,
};
use quickshare_storage::{BlobReader, BlobStorage};
use std::collections::hash_map::Entry as MapEntry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Index entry: the public item plus the blob path only the store may see.
#[derive(Debug, Clone)]
struct Entry {
    item: Item,
    blob_path: Option<PathBuf>,
}

/// Input to [`ItemStore::create`].
pub struct NewItem {
    pub kind: ItemKind,
    /// Caller-chosen display name; blank means "derive one".
    pub name: Option<String>,
    /// Snippet text, for text items.
    pub content: Option<String>,
    /// Upload metadata, for file items.
    pub file: Option<FileMeta>,
    /// Upload byte stream, required for file items.
    pub reader: Option<BlobReader>,
}

impl NewItem {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Text,
            name: None,
            content: Some(content.into()),
            file: None,
            reader: None,
        }
    }

    pub fn file(meta: FileMeta, reader: BlobReader) -> Self {
        Self {
            kind: ItemKind::File,
            name: None,
            content: None,
            file: Some(meta),
            reader: Some(reader),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Item {} not found", id))
}

/// Concurrent item index backed by a [`BlobStorage`] for file payloads.
pub struct ItemStore {
    items: RwLock<HashMap<Uuid, Entry>>,
    storage: Arc<dyn BlobStorage>,
    ttl: Duration,
}

impl ItemStore {
    /// Create an empty store. Every item expires `ttl` after creation.
    pub fn new(storage: Arc<dyn BlobStorage>, ttl: Duration) -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            storage,
            ttl,
        }
    }

    /// Create an item. For file items the blob is fully written before the entry is
    /// inserted; if writing fails nothing is inserted.
    #[tracing::instrument(skip(self, new_item), fields(item.kind = %new_item.kind))]
    pub async fn create(&self, new_item: NewItem) -> Result<Item, AppError> {
        let NewItem {
            kind,
            name,
            content,
            file,
            reader,
        } = new_item;

        let provided_name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let expires_at = created_at.checked_add_signed(self.ttl).ok_or_else(|| {
            AppError::Internal(format!("Item lifetime {} overflows the clock", self.ttl))
        })?;

        let entry = match kind {
            ItemKind::Text => {
                let content = content.filter(|c| !c.is_empty()).ok_or_else(|| {
                    AppError::InvalidInput("Content cannot be empty".to_string())
                })?;
                let name = provided_name.unwrap_or_else(|| derive_display_name(&content));

                Entry {
                    item: Item {
                        id,
                        name,
                        kind,
                        created_at,
                        expires_at,
                        content: Some(content),
                        file_name: None,
                        content_type: None,
                        size_bytes: None,
                    },
                    blob_path: None,
                }
            }
            ItemKind::File => {
                let reader = reader.ok_or_else(|| {
                    AppError::InvalidInput("File data is required for file items".to_string())
                })?;
                let meta = file.unwrap_or_default();
                let name = provided_name.unwrap_or_else(|| file_display_name(&meta.file_name));

                let stored = self.storage.store(id, &meta.file_name, reader).await?;

                if let Some(declared) = meta.declared_size {
                    if declared != stored.bytes_written {
                        tracing::debug!(
                            item_id = %id,
                            declared_size = declared,
                            actual_size = stored.bytes_written,
                            "Declared upload size differs from bytes written"
                        );
                    }
                }

                Entry {
                    item: Item {
                        id,
                        name,
                        kind,
                        created_at,
                        expires_at,
                        content: None,
                        file_name: Some(meta.file_name),
                        content_type: meta.content_type.filter(|ct| !ct.is_empty()),
                        size_bytes: Some(stored.bytes_written),
                    },
                    blob_path: Some(stored.path),
                }
            }
        };

        let item = entry.item.clone();
        let rejected = {
            let mut items = self.items.write().await;
            match items.entry(id) {
                MapEntry::Vacant(slot) => {
                    slot.insert(entry);
                    None
                }
                MapEntry::Occupied(_) => Some(entry),
            }
        };

        if let Some(entry) = rejected {
            if let Some(path) = &entry.blob_path {
                self.remove_blob(id, path).await;
            }
            return Err(AppError::Internal(format!(
                "Generated item ID {} collides with a live item",
                id
            )));
        }

        tracing::info!(
            item_id = %item.id,
            item_type = %item.kind,
            name = %item.name,
            size_bytes = ?item.size_bytes,
            expires_at = %item.expires_at,
            "Added item"
        );

        Ok(item)
    }

    /// Fetch a live item.
    #[tracing::instrument(skip(self), fields(item_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Item, AppError> {
        let now = Utc::now();
        {
            let items = self.items.read().await;
            match items.get(&id) {
                None => return Err(not_found(id)),
                Some(entry) if !entry.item.is_expired_at(now) => return Ok(entry.item.clone()),
                Some(_) => {}
            }
        }

        self.reap(&[id]).await;
        Err(not_found(id))
    }

    /// All live items, newest first. File items never carry inline content.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Vec<Item> {
        let now = Utc::now();
        let mut expired = Vec::new();

        let mut live: Vec<Item> = {
            let items = self.items.read().await;
            items
                .values()
                .filter_map(|entry| {
                    if entry.item.is_expired_at(now) {
                        expired.push(entry.item.id);
                        return None;
                    }
                    let mut item = entry.item.clone();
                    if item.is_file() {
                        item.content = None;
                    }
                    Some(item)
                })
                .collect()
        };

        live.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        if !expired.is_empty() {
            self.reap(&expired).await;
        }

        live
    }

    /// Delete an item. The entry is gone once this returns `Ok`, even if its blob could
    /// not be removed from disk.
    #[tracing::instrument(skip(self), fields(item_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let now = Utc::now();
        let removed = {
            let mut items = self.items.write().await;
            items.remove(&id)
        };

        let Some(entry) = removed else {
            return Err(not_found(id));
        };

        if let Some(path) = &entry.blob_path {
            self.remove_blob(id, path).await;
        }

        if entry.item.is_expired_at(now) {
            tracing::info!(item_id = %id, "Reaped expired item on delete");
            return Err(not_found(id));
        }

        tracing::info!(item_id = %id, item_type = %entry.item.kind, "Deleted item");
        Ok(())
    }

    /// On-disk location of a live file item, for the download path.
    #[tracing::instrument(skip(self), fields(item_id = %id))]
    pub async fn resolve_blob(&self, id: Uuid) -> Result<BlobLocation, AppError> {
        let now = Utc::now();
        {
            let items = self.items.read().await;
            match items.get(&id) {
                None => return Err(not_found(id)),
                Some(entry) if !entry.item.is_expired_at(now) => {
                    let path = entry.blob_path.clone().ok_or_else(|| not_found(id))?;
                    return Ok(BlobLocation {
                        path,
                        original_file_name: entry
                            .item
                            .file_name
                            .clone()
                            .unwrap_or_else(|| entry.item.name.clone()),
                        content_type: entry.item.content_type.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        self.reap(&[id]).await;
        Err(not_found(id))
    }

    /// Remove every expired item and its blob. Returns how many items were reaped.
    pub async fn reap_expired(&self) -> usize {
        let now = Utc::now();
        let expired: Vec<Uuid> = {
            let items = self.items.read().await;
            items
                .values()
                .filter(|entry| entry.item.is_expired_at(now))
                .map(|entry| entry.item.id)
                .collect()
        };

        if expired.is_empty() {
            return 0;
        }
        self.reap(&expired).await
    }

    /// Number of live items.
    pub async fn len(&self) -> usize {
        let now = Utc::now();
        self.items
            .read()
            .await
            .values()
            .filter(|entry| !entry.item.is_expired_at(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Remove the given entries if they are still expired, then their blobs.
    async fn reap(&self, ids: &[Uuid]) -> usize {
        let now = Utc::now();
        let reaped: Vec<(Uuid, Option<PathBuf>)> = {
            let mut items = self.items.write().await;
            ids.iter()
                .filter_map(|id| {
                    // re-check: the entry may have been deleted since the read
                    let expired = items
                        .get(id)
                        .is_some_and(|entry| entry.item.is_expired_at(now));
                    if !expired {
                        return None;
                    }
                    items.remove(id).map(|entry| (*id, entry.blob_path))
                })
                .collect()
        };

        for (id, blob_path) in &reaped {
            tracing::info!(item_id = %id, "Reaped expired item");
            if let Some(path) = blob_path {
                self.remove_blob(*id, path).await;
            }
        }

        reaped.len()
    }

    /// Best-effort blob removal; failures are logged and swallowed.
    async fn remove_blob(&self, id: Uuid, path: &Path) {
        match self.storage.remove(path).await {
            Ok(()) => {
                tracing::debug!(item_id = %id, path = %path.display(), "Deleted blob");
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    item_id = %id,
                    path = %path.display(),
                    "Failed to delete blob, continuing with metadata removal"
                );
            }
        }
    }

    #[cfg(test)]
    pub(crate) async fn force_expire(&self, id: Uuid) {
        if let Some(entry) = self.items.write().await.get_mut(&id) {
            entry.item.expires_at = Utc::now() - Duration::seconds(1);
        }
    }

    #[cfg(test)]
    pub(crate) async fn contains_raw(&self, id: Uuid) -> bool {
        self.items.read().await.contains_key(&id)
    }
}
