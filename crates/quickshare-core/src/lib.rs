//! QuickShare Core Library
//!
//! This crate provides the domain models, error types, configuration and display-name
//! derivation shared by the storage, store and API crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod naming;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{BlobLocation, FileMeta, Item, ItemKind};
pub use naming::{derive_display_name, file_display_name};
