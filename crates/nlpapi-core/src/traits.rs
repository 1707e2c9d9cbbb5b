use futures::future::BoxFuture;
use tokio::sync::watch;

use crate::types::{Collection, CollectionId, DeepDiveKind};

/// Remote operations behind the collection widgets.
///
/// Each returned future resolves exactly once with domain-shaped data.
/// Implementations do their work when the future is first polled, so dropping
/// a future that was never polled cancels the request.
pub trait CollectionRemote: Send + Sync {
    fn list_collections(&self) -> BoxFuture<'static, Vec<Collection>>;
    fn create_collection(&self, name: &str, kind: DeepDiveKind) -> BoxFuture<'static, CollectionId>;
}

/// Shared "current collection" state other parts of the application observe.
pub trait SelectionStore: Send + Sync {
    fn set_current_collection(&self, collection_id: CollectionId);
    fn current_collection(&self) -> CollectionId;
    fn subscribe(&self) -> watch::Receiver<CollectionId>;
}

impl<T: CollectionRemote + ?Sized> CollectionRemote for std::sync::Arc<T> {
    fn list_collections(&self) -> BoxFuture<'static, Vec<Collection>> {
        (**self).list_collections()
    }

    fn create_collection(&self, name: &str, kind: DeepDiveKind) -> BoxFuture<'static, CollectionId> {
        (**self).create_collection(name, kind)
    }
}
