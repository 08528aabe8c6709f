//! UI State Store
//!
//! Transient view state (current page, open form, loaded feeds) with
//! field-level reactivity. Persisted data lives in `Dashboard`.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::feeds::FeedCard;
use crate::navigation::Page;

/// Which modal form is open
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Favorite,
    Note,
    Todo,
    /// `Some(id)` edits an existing folder
    Folder(Option<String>),
    /// New bookmark when `bookmark_id` is `None`
    Bookmark {
        folder_id: String,
        bookmark_id: Option<String>,
    },
    Feed,
    Wallpaper,
}

#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    pub page: Page,
    pub modal: Option<Modal>,
    /// Last aggregation result, in source order
    pub feed_cards: Vec<FeedCard>,
    pub feeds_loading: bool,
}

impl UiState {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            feeds_loading: true,
            ..Default::default()
        }
    }
}

pub type UiStore = Store<UiState>;

/// Get the UI store from context
pub fn use_ui_store() -> UiStore {
    expect_context::<UiStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn open_modal(store: &UiStore, modal: Modal) {
    store.modal().set(Some(modal));
}

pub fn close_modal(store: &UiStore) {
    store.modal().set(None);
}

/// Drop the placeholder or card of a removed custom source right away,
/// before the next aggregation finishes
pub fn store_remove_feed_card(store: &UiStore, source_id: &str) {
    store
        .feed_cards()
        .write()
        .retain(|card| card.source().id.as_deref() != Some(source_id));
}
