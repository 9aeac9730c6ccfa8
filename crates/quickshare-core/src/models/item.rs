use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use utoipa::ToSchema;
use uuid::Uuid;

/// Whether an item carries inline text or an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Text,
    File,
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ItemKind::Text => write!(f, "text"),
            ItemKind::File => write!(f, "file"),
        }
    }
}

/// A shared item as seen by callers.
///
/// The on-disk location of a file item's blob is deliberately absent; it stays inside
/// the store and is only handed out through [`BlobLocation`] for downloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(rename = "size", skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

impl Item {
    pub fn is_file(&self) -> bool {
        self.kind == ItemKind::File
    }

    /// An item is expired once its expiry instant is no longer in the future.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Descriptive metadata supplied by the uploader of a file item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMeta {
    pub file_name: String,
    pub content_type: Option<String>,
    /// Size announced by the client; the stored size is what was actually written.
    pub declared_size: Option<u64>,
}

/// Physical location of a live file item's blob, used by the download path only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobLocation {
    pub path: PathBuf,
    pub original_file_name: String,
    pub content_type: Option<String>,
}
