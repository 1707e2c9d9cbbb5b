use futures::channel::oneshot;
use futures::future::{self, BoxFuture};
use futures::FutureExt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use nlpapi_collections::{CollectionManager, Completion, CreateOutcome, WatchSelectionStore};
use nlpapi_core::traits::{CollectionRemote, SelectionStore};
use nlpapi_core::types::{Collection, CollectionId, DeepDiveKind, NO_COLLECTION};

/// Remote whose responses are released by the test.
#[derive(Default)]
struct ScriptedRemote {
    lists: Mutex<Vec<oneshot::Sender<Vec<Collection>>>>,
    creates: Mutex<Vec<(String, DeepDiveKind, oneshot::Sender<CollectionId>)>>,
}

impl ScriptedRemote {
    fn list_calls(&self) -> usize { self.lists.lock().unwrap().len() }
    fn create_calls(&self) -> usize { self.creates.lock().unwrap().len() }

    fn respond_list(&self, index: usize, collections: Vec<Collection>) {
        let tx = self.lists.lock().unwrap().remove(index);
        tx.send(collections).unwrap();
    }

    fn respond_create(&self, index: usize, collection_id: CollectionId) {
        let (_, _, tx) = self.creates.lock().unwrap().remove(index);
        tx.send(collection_id).unwrap();
    }
}

impl CollectionRemote for ScriptedRemote {
    fn list_collections(&self) -> BoxFuture<'static, Vec<Collection>> {
        let (tx, rx) = oneshot::channel();
        self.lists.lock().unwrap().push(tx);
        rx.then(|r| match r {
            Ok(v) => future::ready(v).boxed(),
            Err(_) => future::pending().boxed(),
        })
        .boxed()
    }

    fn create_collection(&self, name: &str, kind: DeepDiveKind) -> BoxFuture<'static, CollectionId> {
        let (tx, rx) = oneshot::channel();
        self.creates.lock().unwrap().push((name.to_string(), kind, tx));
        rx.then(|r| match r {
            Ok(v) => future::ready(v).boxed(),
            Err(_) => future::pending().boxed(),
        })
        .boxed()
    }
}

fn col(id: CollectionId, name: &str) -> Collection {
    Collection { id, name: name.to_string() }
}

fn setup(can_create: bool) -> (Arc<ScriptedRemote>, WatchSelectionStore, CollectionManager<Arc<ScriptedRemote>, WatchSelectionStore>) {
    let remote = Arc::new(ScriptedRemote::default());
    let store = WatchSelectionStore::default();
    let manager = CollectionManager::new(remote.clone(), store.clone(), can_create);
    (remote, store, manager)
}

#[test]
fn starts_needing_an_update() {
    let (remote, _store, manager) = setup(true);
    assert!(manager.needs_update());
    assert!(!manager.is_creating());
    assert!(manager.collections().is_empty());
    assert_eq!(remote.list_calls(), 0, "nothing is issued before mount");
}

#[test]
fn repeated_settles_issue_a_single_listing() {
    let (remote, _store, mut manager) = setup(true);
    assert!(manager.mount());
    assert!(!manager.needs_update(), "flag flips before the response arrives");
    for _ in 0..5 {
        assert!(!manager.settle());
    }
    assert_eq!(remote.list_calls(), 1);
    assert_eq!(manager.in_flight(), 1);
}

#[tokio::test]
async fn listing_response_is_stored_in_order() {
    let (remote, _store, mut manager) = setup(true);
    manager.mount();
    remote.respond_list(0, vec![col(3, "Gamma"), col(1, "Alpha"), col(2, "Beta")]);
    assert_eq!(manager.next_completion().await, Some(Completion::Listed(3)));
    let ids: Vec<_> = manager.collections().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert_eq!(manager.in_flight(), 0);
    assert_eq!(manager.next_completion().await, None);
}

#[test]
fn select_publishes_to_the_store_only() {
    let (remote, store, mut manager) = setup(true);
    manager.select(7);
    assert_eq!(store.current_collection(), 7);
    assert!(manager.needs_update(), "local state is untouched");
    assert_eq!(remote.list_calls(), 0);
    assert_eq!(remote.create_calls(), 0);
}

#[tokio::test]
async fn reselecting_the_current_id_still_notifies() {
    let (_remote, store, mut manager) = setup(true);
    manager.select(4);
    let mut rx = store.subscribe();
    manager.select(4);
    tokio::time::timeout(Duration::from_secs(1), rx.changed())
        .await
        .expect("notified")
        .expect("sender alive");
    assert_eq!(*rx.borrow(), 4);
}

#[test]
fn empty_or_blank_names_are_rejected_locally() {
    let (remote, _store, mut manager) = setup(true);
    for name in ["", "   ", "\t\n"] {
        assert_eq!(manager.submit_create(name), CreateOutcome::EmptyName);
    }
    assert_eq!(remote.create_calls(), 0);
    assert!(!manager.is_creating());
    assert!(manager.needs_update());
}

#[test]
fn create_is_refused_when_creation_is_disabled() {
    let (remote, store, mut manager) = setup(false);
    assert_eq!(manager.submit_create("Sneaky"), CreateOutcome::NotAllowed);
    assert_eq!(remote.create_calls(), 0);
    assert!(!manager.is_creating());
    assert!(manager.needs_update());
    assert_eq!(store.current_collection(), NO_COLLECTION);
    assert_eq!(manager.in_flight(), 0);
}

#[test]
fn create_is_refused_while_a_real_collection_is_selected() {
    let (remote, store, mut manager) = setup(true);
    manager.select(1);
    assert_eq!(manager.submit_create("Other"), CreateOutcome::NotAllowed);
    assert_eq!(remote.create_calls(), 0);
    assert!(!manager.is_creating());
    assert_eq!(store.current_collection(), 1);

    manager.select(NO_COLLECTION);
    assert_eq!(manager.submit_create("Other"), CreateOutcome::Submitted);
    assert_eq!(remote.create_calls(), 1);
}

#[test]
fn duplicate_submissions_are_absorbed() {
    let (remote, _store, mut manager) = setup(true);
    assert_eq!(manager.submit_create("Beta"), CreateOutcome::Submitted);
    assert!(manager.is_creating());
    for _ in 0..10 {
        assert_eq!(manager.submit_create("Beta"), CreateOutcome::AlreadyCreating);
    }
    assert_eq!(remote.create_calls(), 1);
}

#[test]
fn name_is_sent_as_typed_with_the_configured_kind() {
    let (remote, _store, manager) = setup(true);
    let mut manager = manager.with_deep_dive(DeepDiveKind::CircularEconomy);
    manager.submit_create("  Padded ");
    let creates = remote.creates.lock().unwrap();
    assert_eq!(creates[0].0, "  Padded ");
    assert_eq!(creates[0].1, DeepDiveKind::CircularEconomy);
}

#[tokio::test]
async fn unresolved_create_keeps_the_form_disabled() {
    let (remote, _store, mut manager) = setup(true);
    manager.mount();
    remote.respond_list(0, vec![]);
    manager.next_completion().await;
    manager.submit_create("Stuck");
    assert_eq!(manager.in_flight(), 1);
    let form = manager.view().create_form.expect("form visible");
    assert!(!form.submit_enabled);
    assert_eq!(manager.submit_create("Again"), CreateOutcome::AlreadyCreating);
    assert_eq!(manager.unmount(), 1);
}

#[tokio::test]
async fn refresh_after_create_waits_for_the_running_listing() {
    let (remote, store, mut manager) = setup(true);
    manager.mount();
    manager.submit_create("Beta");
    remote.respond_create(0, 2);
    assert_eq!(manager.next_completion().await, Some(Completion::Created(2)));
    assert_eq!(store.current_collection(), 2);
    assert!(manager.needs_update(), "refresh deferred while a listing is running");
    assert_eq!(remote.list_calls(), 1);

    remote.respond_list(0, vec![col(1, "Alpha")]);
    assert_eq!(manager.next_completion().await, Some(Completion::Listed(1)));
    assert_eq!(remote.list_calls(), 1, "deferred refresh goes out on settle");
    assert!(!manager.needs_update());

    remote.respond_list(0, vec![col(1, "Alpha"), col(2, "Beta")]);
    assert_eq!(manager.next_completion().await, Some(Completion::Listed(2)));
    assert_eq!(manager.collections().len(), 2);
}

#[test]
fn create_form_visibility_follows_selection_and_capability() {
    let (_remote, _store, mut manager) = setup(true);
    assert!(manager.show_create_form());
    manager.select(3);
    assert!(!manager.show_create_form());
    manager.select(NO_COLLECTION);
    assert!(manager.show_create_form());

    let (_remote, _store, manager) = setup(false);
    assert!(!manager.show_create_form());
    assert_eq!(manager.view().labels(), vec!["No Collection"]);
}

#[tokio::test]
async fn end_to_end_create_and_select() {
    let (remote, store, mut manager) = setup(true);
    assert_eq!(store.current_collection(), NO_COLLECTION);

    manager.mount();
    remote.respond_list(0, vec![col(1, "Alpha")]);
    manager.next_completion().await;
    assert_eq!(manager.view().labels(), vec!["New Collection", "Alpha"]);

    assert_eq!(manager.submit_create("Beta"), CreateOutcome::Submitted);
    {
        let creates = remote.creates.lock().unwrap();
        assert_eq!(creates.len(), 1);
        assert_eq!(creates[0].0, "Beta");
        assert_eq!(creates[0].1.as_str(), "circular_economy");
    }

    remote.respond_create(0, 2);
    assert_eq!(manager.next_completion().await, Some(Completion::Created(2)));
    assert_eq!(store.current_collection(), 2);
    assert!(!manager.is_creating());
    assert_eq!(remote.list_calls(), 1, "second listing issued");

    remote.respond_list(0, vec![col(1, "Alpha"), col(2, "Beta")]);
    manager.next_completion().await;
    let view = manager.view();
    assert_eq!(view.labels(), vec!["New Collection", "Alpha", "Beta"]);
    assert_eq!(view.selected, 2);
    assert!(view.create_form.is_none());
}
