use crate::flash::FlashStore;
use libreviews_search::SearchClient;
use libreviews_storage::Store;
use std::sync::Arc;

/// Shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub search: SearchClient,
    pub flash: FlashStore,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, search: SearchClient) -> Self {
        Self {
            store,
            search,
            flash: FlashStore::default(),
        }
    }
}
