use serde::Serialize;

use nlpapi_core::types::{Collection, CollectionId, NO_COLLECTION};

pub const NEW_COLLECTION_LABEL: &str = "New Collection";
pub const NO_COLLECTION_LABEL: &str = "No Collection";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorOption {
    pub value: CollectionId,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreateForm {
    pub submit_enabled: bool,
}

/// What the collection picker shows for a given state.
///
/// The sentinel option always comes first, then collections in listing order.
/// `create_form` is present only while creation is allowed and nothing real
/// is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorView {
    pub options: Vec<SelectorOption>,
    pub selected: CollectionId,
    pub create_form: Option<CreateForm>,
}

impl SelectorView {
    pub fn build(collections: &[Collection], selected: CollectionId, can_create: bool, is_creating: bool) -> Self {
        let sentinel_label = if can_create { NEW_COLLECTION_LABEL } else { NO_COLLECTION_LABEL };
        let options = std::iter::once(SelectorOption { value: NO_COLLECTION, label: sentinel_label.to_string() })
            .chain(collections.iter().map(|c| SelectorOption { value: c.id, label: c.name.clone() }))
            .collect();
        let create_form = show_create_form(selected, can_create).then_some(CreateForm { submit_enabled: !is_creating });
        Self { options, selected, create_form }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.label.as_str()).collect()
    }
}

pub fn show_create_form(selected: CollectionId, can_create: bool) -> bool {
    can_create && selected < 0
}
