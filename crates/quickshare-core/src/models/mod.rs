pub mod item;

pub use item::{BlobLocation, FileMeta, Item, ItemKind};
