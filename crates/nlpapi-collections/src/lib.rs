//! nlpapi-collections
//!
//! Collection picker logic: list collections, select one, or create a new one
//! while keeping at most one creation and one listing in flight.

pub mod manager;
pub mod memory;
pub mod store;
pub mod view;

pub use manager::{CollectionManager, Completion, CreateOutcome};
pub use memory::{InMemoryRemote, RemoteCall};
pub use store::WatchSelectionStore;
pub use view::{CreateForm, SelectorOption, SelectorView};
