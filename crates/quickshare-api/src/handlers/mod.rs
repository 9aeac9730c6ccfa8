pub mod files;
pub mod health;
pub mod items;
pub mod snippets;
