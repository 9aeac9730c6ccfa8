//! QuickShare Store Library
//!
//! The in-memory item index and its coupling to blob storage. `ItemStore` is the only
//! component that mutates item metadata; `CleanupService` periodically reaps expired
//! items through it.

pub mod cleanup;
pub mod items;

pub use cleanup::CleanupService;
pub use items::{ItemStore, NewItem};
