//! Bookmark Components
//!
//! Folder list with per-folder and per-bookmark controls, the import area and
//! the folder/bookmark forms.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;
use web_sys::{DragEvent, File, HtmlInputElement, SubmitEvent};

use super::{DeleteConfirmButton, ModalFrame};
use crate::context::{use_app_context, AppContext};
use crate::dashboard::{Action, Outcome};
use crate::error::ImportError;
use crate::models::{Bookmark, BookmarkFolder};
use crate::store::{close_modal, open_modal, use_ui_store, Modal};
use crate::view::{bookmark_label, EMPTY_BOOKMARKS, EMPTY_FOLDER, IMPORT_FAILED};

const DELETE_FOLDER_PROMPT: &str = "Delete this folder and all its bookmarks?";

// ========================
// Folder list
// ========================

#[component]
pub fn BookmarkFolders() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();

    view! {
        <section class="widget">
            <div class="widget-header">
                <h2>"Bookmarks"</h2>
                <button class="btn btn-small" on:click=move |_| open_modal(&store, Modal::Folder(None))>
                    <i class="fas fa-folder-plus"></i>" New Folder"
                </button>
            </div>
            <ImportArea />
            <div class="bookmarks-container">
                {move || {
                    let folders = ctx.dashboard.with(|d| d.folders().to_vec());
                    if folders.is_empty() {
                        view! { <div class="empty-state">{EMPTY_BOOKMARKS}</div> }.into_any()
                    } else {
                        folders
                            .into_iter()
                            .map(|folder| view! { <FolderView folder=folder /> })
                            .collect_view()
                            .into_any()
                    }
                }}
            </div>
        </section>
    }
}

#[component]
fn FolderView(folder: BookmarkFolder) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();
    let BookmarkFolder { id, name, bookmarks } = folder;

    let add_id = id.clone();
    let add_bookmark = move |_| {
        let modal = Modal::Bookmark {
            folder_id: add_id.clone(),
            bookmark_id: None,
        };
        open_modal(&store, modal);
    };
    let edit_id = id.clone();
    let rename = move |_| open_modal(&store, Modal::Folder(Some(edit_id.clone())));
    let delete_id = id.clone();
    let on_delete = Callback::new(move |_| {
        ctx.apply(Action::DeleteFolder(delete_id.clone()));
    });

    let rows = if bookmarks.is_empty() {
        view! { <p class="empty-folder">{EMPTY_FOLDER}</p> }.into_any()
    } else {
        bookmarks
            .into_iter()
            .map(|bookmark| bookmark_row(ctx, &id, bookmark))
            .collect_view()
            .into_any()
    };

    view! {
        <div class="bookmark-folder">
            <div class="bookmark-folder-header">
                <span class="bookmark-folder-name"><i class="fas fa-folder"></i>" " {name}</span>
                <div class="bookmark-folder-actions">
                    <button class="btn-icon" title="Add bookmark" on:click=add_bookmark>
                        <i class="fas fa-plus"></i>
                    </button>
                    <button class="btn-icon" title="Rename folder" on:click=rename>
                        <i class="fas fa-pen"></i>
                    </button>
                    <DeleteConfirmButton prompt=DELETE_FOLDER_PROMPT on_confirm=on_delete />
                </div>
            </div>
            <div class="bookmark-list">{rows}</div>
        </div>
    }
}

fn bookmark_row(ctx: AppContext, folder_id: &str, bookmark: Bookmark) -> impl IntoView {
    let store = use_ui_store();
    let label = bookmark_label(&bookmark).to_string();
    let Bookmark { id, url, favicon, .. } = bookmark;

    let edit = (folder_id.to_string(), id.clone());
    let delete = (folder_id.to_string(), id);

    view! {
        <div class="bookmark-item">
            <a href=url target="_blank" rel="noopener noreferrer" class="bookmark-item-link">
                <Favicon src=favicon />
                <span class="bookmark-title">{label}</span>
            </a>
            <div class="bookmark-actions">
                <button
                    class="btn-icon"
                    title="Edit"
                    on:click=move |_| {
                        let (folder_id, bookmark_id) = edit.clone();
                        let modal = Modal::Bookmark {
                            folder_id,
                            bookmark_id: Some(bookmark_id),
                        };
                        open_modal(&store, modal);
                    }
                >
                    <i class="fas fa-pen"></i>
                </button>
                <button
                    class="btn-icon"
                    title="Delete"
                    on:click=move |_| {
                        let (folder_id, bookmark_id) = delete.clone();
                        ctx.apply(Action::DeleteBookmark { folder_id, bookmark_id });
                    }
                >
                    <i class="fas fa-trash"></i>
                </button>
            </div>
        </div>
    }
}

/// Favicon that hides itself when missing or broken
#[component]
fn Favicon(src: String) -> impl IntoView {
    let (broken, set_broken) = signal(src.is_empty());

    view! {
        <Show when=move || !broken.get()>
            <img src=src.clone() alt="" class="bookmark-favicon" on:error=move |_| set_broken.set(true) />
        </Show>
    }
}

// ========================
// Import
// ========================

/// Click-to-pick or drop target for a browser bookmark export
#[component]
fn ImportArea() -> impl IntoView {
    let ctx = use_app_context();
    let input_ref = NodeRef::<html::Input>::new();
    let (dragging, set_dragging) = signal(false);

    let open_picker = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            import_file(ctx, file);
        }
        // allow picking the same file again
        input.set_value("");
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_dragging.set(false);
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
        let file = ev
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .and_then(|files| files.get(0));
        match file {
            Some(file) => import_file(ctx, file),
            None => log::warn!("[IMPORT] Drop contained no file"),
        }
    };

    view! {
        <div
            class=move || if dragging.get() { "upload-area active" } else { "upload-area" }
            on:click=open_picker
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop
        >
            <i class="fas fa-file-import"></i>
            <p>"Click or drop your exported bookmarks.html to import"</p>
            <input
                type="file"
                accept=".html,.htm"
                class="hidden-input"
                node_ref=input_ref
                on:click=|ev| ev.stop_propagation()
                on:change=on_change
            />
        </div>
    }
}

fn import_file(ctx: AppContext, file: File) {
    log::info!("[IMPORT] Reading {} ({} bytes)", file.name(), file.size());
    spawn_local(async move {
        let contents = read_text(&file).await;
        if let Err(e) = ctx.dispatch(Action::ImportBookmarks(contents)) {
            log::error!("[IMPORT] {}", e);
            if let Err(e) = window().alert_with_message(IMPORT_FAILED) {
                log::warn!("[IMPORT] Failed to show notice: {:?}", e);
            }
        }
    });
}

async fn read_text(file: &File) -> Result<String, ImportError> {
    let value = JsFuture::from(file.text())
        .await
        .map_err(|e| ImportError::Read(format!("{:?}", e)))?;
    value
        .as_string()
        .ok_or_else(|| ImportError::Read("file contents are not text".to_string()))
}

// ========================
// Forms
// ========================

/// New folder, or rename when `editing` names an existing one
#[component]
pub fn FolderForm(editing: Option<String>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();

    let initial = editing
        .as_deref()
        .and_then(|id| ctx.dashboard.with_untracked(|d| d.folder(id).map(|f| f.name.clone())))
        .unwrap_or_default();
    let title = if editing.is_some() { "Edit Folder" } else { "New Folder" };
    let (name, set_name) = signal(initial);

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let action = match editing.clone() {
            Some(id) => Action::RenameFolder { id, name: name.get() },
            None => Action::CreateFolder { name: name.get() },
        };
        if ctx.apply(action) != Outcome::Unchanged {
            close_modal(&store);
        }
    };

    view! {
        <ModalFrame title=title>
            <form on:submit=submit>
                <div class="form-group">
                    <label for="folderNameInput">"Folder name"</label>
                    <input
                        id="folderNameInput"
                        type="text"
                        required
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn btn-primary">"Save"</button>
            </form>
        </ModalFrame>
    }
}

/// New bookmark in `folder_id`, or edit when `bookmark_id` is set
#[component]
pub fn BookmarkForm(folder_id: String, bookmark_id: Option<String>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();

    let existing = bookmark_id.as_deref().and_then(|bm| {
        ctx.dashboard.with_untracked(|d| {
            d.folder(&folder_id)
                .and_then(|f| f.bookmarks.iter().find(|b| b.id == bm))
                .map(|b| (b.title.clone(), b.url.clone()))
        })
    });
    let title_text = if existing.is_some() { "Edit Bookmark" } else { "New Bookmark" };
    let (initial_title, initial_url) = existing.unwrap_or_default();
    let (title, set_title) = signal(initial_title);
    let (url, set_url) = signal(initial_url);

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let action = match bookmark_id.clone() {
            Some(bookmark_id) => Action::EditBookmark {
                folder_id: folder_id.clone(),
                bookmark_id,
                title: title.get(),
                url: url.get(),
            },
            None => Action::AddBookmark {
                folder_id: folder_id.clone(),
                title: title.get(),
                url: url.get(),
            },
        };
        if ctx.apply(action) != Outcome::Unchanged {
            close_modal(&store);
        }
    };

    view! {
        <ModalFrame title=title_text>
            <form on:submit=submit>
                <div class="form-group">
                    <label for="bookmarkTitleInput">"Title"</label>
                    <input
                        id="bookmarkTitleInput"
                        type="text"
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="bookmarkUrlInput">"URL"</label>
                    <input
                        id="bookmarkUrlInput"
                        type="url"
                        required
                        prop:value=move || url.get()
                        on:input=move |ev| set_url.set(event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn btn-primary">"Save"</button>
            </form>
        </ModalFrame>
    }
}
