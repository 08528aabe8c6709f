//! UI Components
//!
//! Leptos components for the dashboard pages and their modal forms.

mod bookmarks;
mod delete_confirm_button;
mod favorites;
mod feeds;
mod modal;
mod nav_bar;
mod notes;
mod pages;
mod todos;
mod wallpaper_form;

pub use bookmarks::{BookmarkFolders, BookmarkForm, FolderForm};
pub use delete_confirm_button::DeleteConfirmButton;
pub use favorites::{FavoriteForm, FavoritesGrid};
pub use feeds::{CustomFeedsPanel, FeedActions, FeedForm, FeedGrid};
pub use modal::{ModalFrame, ModalHost};
pub use nav_bar::NavBar;
pub use notes::{NoteForm, NotesList};
pub use pages::{BookmarksPage, FeedsPage, HomePage};
pub use todos::{TodoForm, TodoList};
pub use wallpaper_form::WallpaperForm;
