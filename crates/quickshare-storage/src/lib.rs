//! QuickShare Storage Library
//!
//! This crate owns the on-disk side of file items: the `BlobStorage` trait and its local
//! filesystem implementation.
//!
//! # Blob naming
//!
//! Blobs live directly under one root directory and are named after the item identifier:
//! `{id}` or `{id}.{ext}` when the uploaded filename carries a short alphanumeric
//! extension. The client-supplied filename never contributes a path component. Name
//! generation is centralized in the `keys` module.

pub(crate) mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalBlobStorage;
pub use traits::{BlobReader, BlobStorage, StorageError, StorageResult, StoredBlob};
