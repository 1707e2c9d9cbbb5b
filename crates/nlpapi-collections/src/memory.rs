use futures::future::{self, BoxFuture};
use futures::FutureExt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use nlpapi_core::normalize;
use nlpapi_core::traits::CollectionRemote;
use nlpapi_core::types::{Collection, CollectionId, DeepDiveKind};
use nlpapi_core::wire::ApiCollectionResponse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    List,
    Create { name: String, kind: DeepDiveKind },
}

/// Process-local stand-in for the collections API.
///
/// Calls are logged immediately; the store is read or written only when the
/// returned future is polled, so a dropped request leaves no trace in it.
#[derive(Debug, Clone)]
pub struct InMemoryRemote {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug)]
struct Inner {
    collections: Vec<Collection>,
    next_id: CollectionId,
    calls: Vec<RemoteCall>,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryRemote {
    pub fn new() -> Self { Self::seeded(Vec::new()) }

    /// Start from existing collections; new ids continue after the largest one.
    pub fn seeded(collections: Vec<Collection>) -> Self {
        let next_id = collections.iter().map(|c| c.id.saturating_add(1)).max().unwrap_or(1).max(1);
        Self { inner: Arc::new(Mutex::new(Inner { collections, next_id, calls: Vec::new() })) }
    }

    pub fn calls(&self) -> Vec<RemoteCall> { lock(&self.inner).calls.clone() }

    pub fn collections(&self) -> Vec<Collection> { lock(&self.inner).collections.clone() }
}

impl Default for InMemoryRemote {
    fn default() -> Self { Self::new() }
}

impl CollectionRemote for InMemoryRemote {
    fn list_collections(&self) -> BoxFuture<'static, Vec<Collection>> {
        lock(&self.inner).calls.push(RemoteCall::List);
        let inner = Arc::clone(&self.inner);
        future::lazy(move |_| lock(&inner).collections.clone()).boxed()
    }

    fn create_collection(&self, name: &str, kind: DeepDiveKind) -> BoxFuture<'static, CollectionId> {
        lock(&self.inner).calls.push(RemoteCall::Create { name: name.to_string(), kind });
        let inner = Arc::clone(&self.inner);
        let name = name.to_string();
        future::lazy(move |_| {
            let mut inner = lock(&inner);
            let collection_id = inner.next_id;
            inner.next_id = inner.next_id.saturating_add(1);
            inner.collections.push(Collection { id: collection_id, name });
            debug!(collection_id, %kind, "stored collection");
            normalize(&ApiCollectionResponse { collection_id }).collection_id
        })
        .boxed()
    }
}
