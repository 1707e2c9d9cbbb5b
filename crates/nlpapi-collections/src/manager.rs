//! Collection picker state machine.
//!
//! Local state is `{collections, needs_update, is_creating}`; the selected
//! collection lives in the injected [`SelectionStore`]. Every transition runs
//! inside a `&mut self` method, so handlers never interleave. Busy flags are
//! always flipped before the matching request is issued.

use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use tracing::{debug, info};

use nlpapi_core::traits::{CollectionRemote, SelectionStore};
use nlpapi_core::types::{Collection, CollectionId, DeepDiveKind};

use crate::view::{self, SelectorView};

/// Result of a create submission. Refusals leave the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Submitted,
    /// The create form is not offered: creation is disabled or a real
    /// collection is selected.
    NotAllowed,
    AlreadyCreating,
    EmptyName,
}

/// A remote response that has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Listing stored; carries the number of collections.
    Listed(usize),
    /// Creation finished and the new id was published.
    Created(CollectionId),
}

enum Response {
    Listed(Vec<Collection>),
    Created(CollectionId),
}

pub struct CollectionManager<R, S> {
    remote: R,
    store: S,
    can_create: bool,
    deep_dive: DeepDiveKind,
    collections: Vec<Collection>,
    needs_update: bool,
    is_creating: bool,
    listing: bool,
    pending: FuturesUnordered<BoxFuture<'static, Response>>,
}

impl<R, S> CollectionManager<R, S>
where
    R: CollectionRemote,
    S: SelectionStore,
{
    pub fn new(remote: R, store: S, can_create: bool) -> Self {
        Self {
            remote,
            store,
            can_create,
            deep_dive: DeepDiveKind::default(),
            collections: Vec::new(),
            needs_update: true,
            is_creating: false,
            listing: false,
            pending: FuturesUnordered::new(),
        }
    }

    pub fn with_deep_dive(mut self, deep_dive: DeepDiveKind) -> Self {
        self.deep_dive = deep_dive;
        self
    }

    pub fn mount(&mut self) -> bool { self.settle() }

    /// Issue a listing if one is due. Returns whether a request went out.
    ///
    /// A refresh requested while a listing is still in flight stays pending
    /// and goes out on the settle after that listing lands.
    pub fn settle(&mut self) -> bool {
        if !self.needs_update || self.listing {
            return false;
        }
        self.needs_update = false;
        self.listing = true;
        debug!("requesting collection listing");
        let request = self.remote.list_collections();
        self.pending.push(request.map(Response::Listed).boxed());
        true
    }

    pub fn select(&mut self, collection_id: CollectionId) {
        debug!(collection_id, "selecting collection");
        self.store.set_current_collection(collection_id);
    }

    pub fn submit_create(&mut self, name: &str) -> CreateOutcome {
        if !self.show_create_form() {
            debug!("create form not offered, ignoring submission");
            return CreateOutcome::NotAllowed;
        }
        if self.is_creating {
            debug!("create already in flight, ignoring submission");
            return CreateOutcome::AlreadyCreating;
        }
        if name.trim().is_empty() {
            debug!("empty collection name, ignoring submission");
            return CreateOutcome::EmptyName;
        }
        self.is_creating = true;
        debug!(collection_name = name, deep_dive = %self.deep_dive, "creating collection");
        let request = self.remote.create_collection(name, self.deep_dive);
        self.pending.push(request.map(Response::Created).boxed());
        CreateOutcome::Submitted
    }

    /// Wait for the next in-flight request, apply it and settle.
    /// `None` when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        let response = self.pending.next().await?;
        let completion = match response {
            Response::Listed(collections) => {
                self.listing = false;
                let count = collections.len();
                info!(count, "collections listed");
                self.collections = collections;
                Completion::Listed(count)
            }
            Response::Created(collection_id) => {
                self.is_creating = false;
                self.needs_update = true;
                info!(collection_id, "collection created");
                self.store.set_current_collection(collection_id);
                Completion::Created(collection_id)
            }
        };
        self.settle();
        Some(completion)
    }

    pub async fn run_until_idle(&mut self) -> Vec<Completion> {
        let mut applied = Vec::new();
        while let Some(completion) = self.next_completion().await {
            applied.push(completion);
        }
        applied
    }

    pub fn show_create_form(&self) -> bool {
        view::show_create_form(self.store.current_collection(), self.can_create)
    }

    pub fn view(&self) -> SelectorView {
        SelectorView::build(&self.collections, self.store.current_collection(), self.can_create, self.is_creating)
    }

    /// Tear down, abandoning in-flight requests. Returns how many were dropped.
    pub fn unmount(self) -> usize {
        let cancelled = self.pending.len();
        if cancelled > 0 {
            debug!(cancelled, "dropping in-flight collection requests");
        }
        cancelled
    }

    pub fn collections(&self) -> &[Collection] { &self.collections }
    pub fn needs_update(&self) -> bool { self.needs_update }
    pub fn is_creating(&self) -> bool { self.is_creating }
    pub fn in_flight(&self) -> usize { self.pending.len() }
    pub fn store(&self) -> &S { &self.store }
}
