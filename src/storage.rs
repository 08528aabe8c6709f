//! Persistent Store
//!
//! Synchronous key-value text storage. In the page this is `window.localStorage`;
//! tests (and browsers that deny storage access) use an in-memory map.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

pub const KEY_FAVORITES: &str = "favorites";
pub const KEY_NOTES: &str = "notes";
pub const KEY_TODOS: &str = "todos";
pub const KEY_BOOKMARKS: &str = "bookmarks";
pub const KEY_CUSTOM_FEEDS: &str = "customFeeds";
pub const KEY_THEME: &str = "theme";
pub const KEY_WALLPAPER: &str = "wallpaper";

/// Raw text storage. Each key is independent; there are no transactions.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`, looked up on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn local_storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))
    }

    pub fn is_available() -> bool {
        Self::local_storage().is_ok()
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        let storage = Self::local_storage().ok()?;
        match storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("[STORE] Failed to read '{}': {:?}", key, e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::local_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::WriteRejected {
                key: key.to_string(),
                message: format!("{:?}", e),
            })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::local_storage()?
            .remove_item(key)
            .map_err(|e| StorageError::WriteRejected {
                key: key.to_string(),
                message: format!("{:?}", e),
            })
    }
}

/// In-memory store. Clones share the same map, so a second `Dashboard`
/// built from a clone sees everything the first one wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<R>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> R) -> R {
        let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut entries)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.with_entries(|entries| entries.insert(key.to_string(), value.to_string()));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.with_entries(|entries| entries.remove(key));
        Ok(())
    }
}

/// Store used by the running page: localStorage when the browser allows it,
/// otherwise an in-memory map for the lifetime of the tab.
#[derive(Debug, Clone)]
pub enum PageStorage {
    Browser(BrowserStorage),
    Memory(MemoryStore),
}

impl PageStorage {
    pub fn detect() -> Self {
        if BrowserStorage::is_available() {
            PageStorage::Browser(BrowserStorage)
        } else {
            log::warn!("[STORE] localStorage unavailable, changes will not survive a reload");
            PageStorage::Memory(MemoryStore::new())
        }
    }
}

impl KeyValueStore for PageStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            PageStorage::Browser(s) => s.get(key),
            PageStorage::Memory(s) => s.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            PageStorage::Browser(s) => s.set(key, value),
            PageStorage::Memory(s) => s.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self {
            PageStorage::Browser(s) => s.remove(key),
            PageStorage::Memory(s) => s.remove(key),
        }
    }
}

/// Read a JSON value. Absent, `null` and malformed values yield the default;
/// malformed values are logged.
pub fn load_json<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key) else {
        return T::default();
    };

    match serde_json::from_str::<Option<T>>(&raw) {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            log::error!("[STORE] Error loading {} from storage: {}", key, e);
            T::default()
        }
    }
}

/// Serialize a value as JSON and write it under `key`
pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}
