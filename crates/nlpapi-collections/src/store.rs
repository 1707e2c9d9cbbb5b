use std::sync::Arc;
use tokio::sync::watch;

use nlpapi_core::traits::SelectionStore;
use nlpapi_core::types::{CollectionId, NO_COLLECTION};

/// `SelectionStore` backed by a watch channel. Clones share the same state.
#[derive(Debug, Clone)]
pub struct WatchSelectionStore {
    tx: Arc<watch::Sender<CollectionId>>,
}

impl WatchSelectionStore {
    pub fn new(initial: CollectionId) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }
}

impl Default for WatchSelectionStore {
    fn default() -> Self { Self::new(NO_COLLECTION) }
}

impl SelectionStore for WatchSelectionStore {
    fn set_current_collection(&self, collection_id: CollectionId) {
        // Republishing the same id still wakes subscribers.
        self.tx.send_replace(collection_id);
    }

    fn current_collection(&self) -> CollectionId { *self.tx.borrow() }

    fn subscribe(&self) -> watch::Receiver<CollectionId> { self.tx.subscribe() }
}
