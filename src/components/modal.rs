//! Modal Components
//!
//! `ModalFrame` draws the dialog chrome; `ModalHost` mounts the form for the
//! currently open modal. Closing unmounts the form, which resets its fields.

use leptos::prelude::*;

use super::{BookmarkForm, FavoriteForm, FeedForm, FolderForm, NoteForm, TodoForm, WallpaperForm};
use crate::store::{close_modal, use_ui_store, Modal, UiStateStoreFields};

/// Dialog with a title bar and close button. Clicking the backdrop closes it.
#[component]
pub fn ModalFrame(#[prop(into)] title: String, children: Children) -> impl IntoView {
    let store = use_ui_store();

    view! {
        <div class="modal active" on:click=move |_| close_modal(&store)>
            <div class="modal-content" on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h3>{title}</h3>
                    <button type="button" class="modal-close" on:click=move |_| close_modal(&store)>
                        "×"
                    </button>
                </div>
                {children()}
            </div>
        </div>
    }
}

/// Renders whichever form `UiState::modal` names
#[component]
pub fn ModalHost() -> impl IntoView {
    let store = use_ui_store();

    move || {
        store.modal().get().map(|modal| match modal {
            Modal::Favorite => view! { <FavoriteForm /> }.into_any(),
            Modal::Note => view! { <NoteForm /> }.into_any(),
            Modal::Todo => view! { <TodoForm /> }.into_any(),
            Modal::Folder(editing) => view! { <FolderForm editing=editing /> }.into_any(),
            Modal::Bookmark { folder_id, bookmark_id } => {
                view! { <BookmarkForm folder_id=folder_id bookmark_id=bookmark_id /> }.into_any()
            }
            Modal::Feed => view! { <FeedForm /> }.into_any(),
            Modal::Wallpaper => view! { <WallpaperForm /> }.into_any(),
        })
    }
}
