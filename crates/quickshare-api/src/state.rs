//! Shared application state handed to every handler

use quickshare_store::ItemStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ItemStore>,
}

impl AppState {
    pub fn new(store: Arc<ItemStore>) -> Self {
        Self { store }
    }
}
