//! Dashboard State
//!
//! The single owner of every persisted collection and setting. Components never
//! touch storage directly: they send an `Action` to `Dashboard::dispatch`.

use crate::bookmark_import::{favicon_url, parse_bookmarks_html};
use crate::collection::{Collection, Insert};
use crate::error::{DashboardError, ImportError};
use crate::ids::{IdGenerator, BOOKMARK_PREFIX, CUSTOM_FEED_PREFIX, FOLDER_PREFIX};
use crate::models::{
    Bookmark, BookmarkFolder, CustomFeedSource, Favorite, FeedSource, Note, Theme, Todo, DEFAULT_FAVORITE_ICON,
};
use crate::settings::AppSettings;
use crate::storage::{
    KeyValueStore, PageStorage, KEY_BOOKMARKS, KEY_CUSTOM_FEEDS, KEY_FAVORITES, KEY_NOTES, KEY_TODOS,
};

// ========================
// Actions
// ========================

/// Every user-driven change to dashboard state
#[derive(Debug)]
pub enum Action {
    AddFavorite { label: String, url: String, icon: String },
    RemoveFavorite(u64),
    AddNote { title: String, content: String },
    RemoveNote(u64),
    AddTodo { text: String, due_date: String },
    ToggleTodo(u64),
    RemoveTodo(u64),
    CreateFolder { name: String },
    RenameFolder { id: String, name: String },
    DeleteFolder(String),
    AddBookmark { folder_id: String, title: String, url: String },
    EditBookmark { folder_id: String, bookmark_id: String, title: String, url: String },
    DeleteBookmark { folder_id: String, bookmark_id: String },
    /// File contents as read by the browser, or the read failure
    ImportBookmarks(Result<String, ImportError>),
    AddCustomFeed { name: String, url: String, icon: String },
    RemoveCustomFeed(String),
    ToggleTheme,
    SetWallpaper(String),
    ClearWallpaper,
}

/// What a dispatched action changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Invalid input or unknown id
    Unchanged,
    Updated,
    /// The custom feed list changed; feeds must be aggregated again
    FeedsChanged,
}

impl From<bool> for Outcome {
    fn from(changed: bool) -> Self {
        if changed {
            Outcome::Updated
        } else {
            Outcome::Unchanged
        }
    }
}

// ========================
// Dashboard
// ========================

#[derive(Debug, Clone)]
pub struct Dashboard<S: KeyValueStore = PageStorage> {
    store: S,
    ids: IdGenerator,
    favorites: Collection<Favorite>,
    notes: Collection<Note>,
    todos: Collection<Todo>,
    bookmarks: Collection<BookmarkFolder>,
    custom_feeds: Collection<CustomFeedSource>,
    settings: AppSettings,
}

impl<S: KeyValueStore> Dashboard<S> {
    /// Load all state from `store`. Never fails: unreadable values fall back
    /// to defaults.
    pub fn load(store: S) -> Self {
        let favorites = Collection::load(&store, KEY_FAVORITES, Insert::Back);
        let notes = Collection::load(&store, KEY_NOTES, Insert::Front);
        let todos = Collection::load(&store, KEY_TODOS, Insert::Front);
        let bookmarks = Collection::load(&store, KEY_BOOKMARKS, Insert::Front);
        let custom_feeds = Collection::load(&store, KEY_CUSTOM_FEEDS, Insert::Back);
        let settings = AppSettings::load(&store);

        let mut dashboard = Self {
            store,
            ids: IdGenerator::new(),
            favorites,
            notes,
            todos,
            bookmarks,
            custom_feeds,
            settings,
        };
        dashboard.seed_ids();
        dashboard
    }

    /// Advance the id generator past every stored id
    fn seed_ids(&mut self) {
        let ids = &mut self.ids;
        self.favorites.items().iter().for_each(|f| ids.observe(f.id));
        self.notes.items().iter().for_each(|n| ids.observe(n.id));
        self.todos.items().iter().for_each(|t| ids.observe(t.id));
        for folder in self.bookmarks.items() {
            ids.observe_prefixed(&folder.id);
            folder.bookmarks.iter().for_each(|b| ids.observe_prefixed(&b.id));
        }
        self.custom_feeds.items().iter().for_each(|c| ids.observe_prefixed(&c.id));
    }

    pub fn favorites(&self) -> &[Favorite] {
        self.favorites.items()
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.items()
    }

    pub fn todos(&self) -> &[Todo] {
        self.todos.items()
    }

    pub fn folders(&self) -> &[BookmarkFolder] {
        self.bookmarks.items()
    }

    pub fn folder(&self, id: &str) -> Option<&BookmarkFolder> {
        self.bookmarks.get(id)
    }

    pub fn custom_feeds(&self) -> &[CustomFeedSource] {
        self.custom_feeds.items()
    }

    /// Custom sources as aggregator input
    pub fn custom_feed_sources(&self) -> Vec<FeedSource> {
        self.custom_feeds.items().iter().map(FeedSource::from).collect()
    }

    pub fn theme(&self) -> Theme {
        self.settings.theme()
    }

    pub fn wallpaper(&self) -> Option<&str> {
        self.settings.wallpaper()
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, DashboardError> {
        log::debug!("[STORE] dispatch {:?}", ActionName(&action));
        let outcome: Outcome = match action {
            Action::AddFavorite { label, url, icon } => self.add_favorite(&label, &url, &icon).into(),
            Action::RemoveFavorite(id) => self.remove_favorite(id).into(),
            Action::AddNote { title, content } => self.add_note(&title, &content).into(),
            Action::RemoveNote(id) => self.remove_note(id).into(),
            Action::AddTodo { text, due_date } => self.add_todo(&text, &due_date).into(),
            Action::ToggleTodo(id) => self.toggle_todo(id).into(),
            Action::RemoveTodo(id) => self.remove_todo(id).into(),
            Action::CreateFolder { name } => self.create_folder(&name).into(),
            Action::RenameFolder { id, name } => self.rename_folder(&id, &name).into(),
            Action::DeleteFolder(id) => self.delete_folder(&id).into(),
            Action::AddBookmark { folder_id, title, url } => self.add_bookmark(&folder_id, &title, &url).into(),
            Action::EditBookmark {
                folder_id,
                bookmark_id,
                title,
                url,
            } => self.edit_bookmark(&folder_id, &bookmark_id, &title, &url).into(),
            Action::DeleteBookmark { folder_id, bookmark_id } => {
                self.delete_bookmark(&folder_id, &bookmark_id).into()
            }
            Action::ImportBookmarks(contents) => {
                self.import_bookmarks(&contents?)?;
                Outcome::Updated
            }
            Action::AddCustomFeed { name, url, icon } => {
                if self.add_custom_feed(&name, &url, &icon) {
                    Outcome::FeedsChanged
                } else {
                    Outcome::Unchanged
                }
            }
            Action::RemoveCustomFeed(id) => {
                if self.remove_custom_feed(&id) {
                    Outcome::FeedsChanged
                } else {
                    Outcome::Unchanged
                }
            }
            Action::ToggleTheme => {
                self.toggle_theme();
                Outcome::Updated
            }
            Action::SetWallpaper(url) => self.set_wallpaper(&url).into(),
            Action::ClearWallpaper => self.clear_wallpaper().into(),
        };
        Ok(outcome)
    }

    // ========================
    // Favorites
    // ========================

    /// Append a favorite. Label and url are required; a blank icon falls back
    /// to the globe icon.
    pub fn add_favorite(&mut self, label: &str, url: &str, icon: &str) -> bool {
        let (label, url, icon) = (label.trim(), url.trim(), icon.trim());
        if label.is_empty() || url.is_empty() {
            return false;
        }
        let favorite = Favorite {
            id: self.ids.next_id(),
            label: label.to_string(),
            url: url.to_string(),
            icon: if icon.is_empty() { DEFAULT_FAVORITE_ICON } else { icon }.to_string(),
        };
        self.favorites.add(&self.store, favorite);
        true
    }

    pub fn remove_favorite(&mut self, id: u64) -> bool {
        self.favorites.remove(&self.store, &id)
    }

    // ========================
    // Notes
    // ========================

    /// Prepend a note. Text is kept as typed; a note with neither title nor
    /// content is ignored.
    pub fn add_note(&mut self, title: &str, content: &str) -> bool {
        if title.trim().is_empty() && content.trim().is_empty() {
            return false;
        }
        let note = Note {
            id: self.ids.next_id(),
            title: title.to_string(),
            content: content.to_string(),
        };
        self.notes.add(&self.store, note);
        true
    }

    pub fn remove_note(&mut self, id: u64) -> bool {
        self.notes.remove(&self.store, &id)
    }

    // ========================
    // Todos
    // ========================

    /// Prepend a todo with trimmed text. Empty text is ignored.
    pub fn add_todo(&mut self, text: &str, due_date: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let todo = Todo {
            id: self.ids.next_id(),
            text: text.to_string(),
            due_date: due_date.trim().to_string(),
            completed: false,
        };
        self.todos.add(&self.store, todo);
        true
    }

    pub fn toggle_todo(&mut self, id: u64) -> bool {
        self.todos.update(&self.store, &id, |todo| todo.completed = !todo.completed)
    }

    pub fn remove_todo(&mut self, id: u64) -> bool {
        self.todos.remove(&self.store, &id)
    }

    // ========================
    // Bookmarks
    // ========================

    /// Prepend an empty folder
    pub fn create_folder(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let folder = BookmarkFolder {
            id: self.ids.next_prefixed(FOLDER_PREFIX),
            name: name.to_string(),
            bookmarks: Vec::new(),
        };
        self.bookmarks.add(&self.store, folder);
        true
    }

    pub fn rename_folder(&mut self, id: &str, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.bookmarks.update(&self.store, id, |folder| folder.name = name.to_string())
    }

    /// Remove a folder together with its bookmarks
    pub fn delete_folder(&mut self, id: &str) -> bool {
        self.bookmarks.remove(&self.store, id)
    }

    /// Append a bookmark to a folder. The url is required.
    pub fn add_bookmark(&mut self, folder_id: &str, title: &str, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() || self.bookmarks.get(folder_id).is_none() {
            return false;
        }
        let bookmark = Bookmark {
            id: self.ids.next_prefixed(BOOKMARK_PREFIX),
            title: title.trim().to_string(),
            url: url.to_string(),
            favicon: favicon_url(url),
        };
        self.bookmarks.update(&self.store, folder_id, |folder| folder.bookmarks.push(bookmark))
    }

    /// Replace a bookmark's title and url, deriving the favicon again
    pub fn edit_bookmark(&mut self, folder_id: &str, bookmark_id: &str, title: &str, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() || !self.has_bookmark(folder_id, bookmark_id) {
            return false;
        }
        self.bookmarks.update(&self.store, folder_id, |folder| {
            if let Some(bookmark) = folder.bookmarks.iter_mut().find(|b| b.id == bookmark_id) {
                bookmark.title = title.trim().to_string();
                bookmark.url = url.to_string();
                bookmark.favicon = favicon_url(url);
            }
        })
    }

    pub fn delete_bookmark(&mut self, folder_id: &str, bookmark_id: &str) -> bool {
        if !self.has_bookmark(folder_id, bookmark_id) {
            return false;
        }
        self.bookmarks.update(&self.store, folder_id, |folder| {
            folder.bookmarks.retain(|b| b.id != bookmark_id)
        })
    }

    fn has_bookmark(&self, folder_id: &str, bookmark_id: &str) -> bool {
        self.bookmarks
            .get(folder_id)
            .is_some_and(|folder| folder.bookmarks.iter().any(|b| b.id == bookmark_id))
    }

    /// Replace every folder with the contents of an export. The document is
    /// fully parsed before anything is touched.
    pub fn import_bookmarks(&mut self, html: &str) -> Result<usize, ImportError> {
        let folders = parse_bookmarks_html(html, &mut self.ids)?;
        let count = folders.len();
        self.bookmarks.replace_all(&self.store, folders);
        log::info!("[IMPORT] Imported {} folders", count);
        Ok(count)
    }

    // ========================
    // Custom feeds
    // ========================

    /// Append a custom source. Name and url are required; icon is optional.
    pub fn add_custom_feed(&mut self, name: &str, url: &str, icon: &str) -> bool {
        let (name, url) = (name.trim(), url.trim());
        if name.is_empty() || url.is_empty() {
            return false;
        }
        let source = CustomFeedSource {
            id: self.ids.next_prefixed(CUSTOM_FEED_PREFIX),
            name: name.to_string(),
            rss_url: url.to_string(),
            icon: icon.trim().to_string(),
        };
        self.custom_feeds.add(&self.store, source);
        true
    }

    pub fn remove_custom_feed(&mut self, id: &str) -> bool {
        self.custom_feeds.remove(&self.store, id)
    }

    // ========================
    // Settings
    // ========================

    pub fn toggle_theme(&mut self) -> Theme {
        self.settings.toggle_theme(&self.store)
    }

    pub fn set_wallpaper(&mut self, url: &str) -> bool {
        self.settings.set_wallpaper(&self.store, url)
    }

    pub fn clear_wallpaper(&mut self) -> bool {
        self.settings.clear_wallpaper(&self.store)
    }
}

/// Variant name only, so file contents stay out of the console
struct ActionName<'a>(&'a Action);

impl std::fmt::Debug for ActionName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.0 {
            Action::AddFavorite { .. } => "AddFavorite",
            Action::RemoveFavorite(_) => "RemoveFavorite",
            Action::AddNote { .. } => "AddNote",
            Action::RemoveNote(_) => "RemoveNote",
            Action::AddTodo { .. } => "AddTodo",
            Action::ToggleTodo(_) => "ToggleTodo",
            Action::RemoveTodo(_) => "RemoveTodo",
            Action::CreateFolder { .. } => "CreateFolder",
            Action::RenameFolder { .. } => "RenameFolder",
            Action::DeleteFolder(_) => "DeleteFolder",
            Action::AddBookmark { .. } => "AddBookmark",
            Action::EditBookmark { .. } => "EditBookmark",
            Action::DeleteBookmark { .. } => "DeleteBookmark",
            Action::ImportBookmarks(_) => "ImportBookmarks",
            Action::AddCustomFeed { .. } => "AddCustomFeed",
            Action::RemoveCustomFeed(_) => "RemoveCustomFeed",
            Action::ToggleTheme => "ToggleTheme",
            Action::SetWallpaper(_) => "SetWallpaper",
            Action::ClearWallpaper => "ClearWallpaper",
        };
        f.write_str(name)
    }
}
