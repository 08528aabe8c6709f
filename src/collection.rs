//! Domain Collections
//!
//! A typed record sequence mirrored to one storage key. Every mutation that
//! changes the sequence is written through immediately.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;
use crate::models::{BookmarkFolder, CustomFeedSource, Favorite, Note, Todo};
use crate::storage::{load_json, save_json, KeyValueStore};

/// A persisted record with a unique id
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Key: PartialEq + ?Sized;

    fn key(&self) -> &Self::Key;
}

impl Record for Favorite {
    type Key = u64;
    fn key(&self) -> &u64 {
        &self.id
    }
}

impl Record for Note {
    type Key = u64;
    fn key(&self) -> &u64 {
        &self.id
    }
}

impl Record for Todo {
    type Key = u64;
    fn key(&self) -> &u64 {
        &self.id
    }
}

impl Record for BookmarkFolder {
    type Key = str;
    fn key(&self) -> &str {
        &self.id
    }
}

impl Record for CustomFeedSource {
    type Key = str;
    fn key(&self) -> &str {
        &self.id
    }
}

/// Where `add` puts new records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insert {
    /// Most recent first
    Front,
    Back,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    key: &'static str,
    insert: Insert,
    items: Vec<T>,
}

impl<T: Record> Collection<T> {
    /// Read-through from the store; missing or corrupt data gives an empty collection
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, key: &'static str, insert: Insert) -> Self {
        let items: Vec<T> = load_json(store, key);
        log::debug!("[STORE] Loaded {} records from '{}'", items.len(), key);
        Self { key, insert, items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: &T::Key) -> Option<&T> {
        self.items.iter().find(|item| item.key() == id)
    }

    pub fn add<S: KeyValueStore + ?Sized>(&mut self, store: &S, record: T) {
        match self.insert {
            Insert::Front => self.items.insert(0, record),
            Insert::Back => self.items.push(record),
        }
        self.flush(store);
    }

    /// Remove by id. Returns false (and writes nothing) when the id is unknown.
    pub fn remove<S: KeyValueStore + ?Sized>(&mut self, store: &S, id: &T::Key) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.key() != id);
        let removed = self.items.len() != before;
        if removed {
            self.flush(store);
        }
        removed
    }

    /// Mutate one record in place. Returns false when the id is unknown.
    pub fn update<S, F>(&mut self, store: &S, id: &T::Key, f: F) -> bool
    where
        S: KeyValueStore + ?Sized,
        F: FnOnce(&mut T),
    {
        let Some(item) = self.items.iter_mut().find(|item| item.key() == id) else {
            return false;
        };
        f(item);
        self.flush(store);
        true
    }

    /// Swap the whole sequence (bookmark import)
    pub fn replace_all<S: KeyValueStore + ?Sized>(&mut self, store: &S, items: Vec<T>) {
        self.items = items;
        self.flush(store);
    }

    /// Write the current sequence back to the store
    pub fn persist<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<(), StorageError> {
        save_json(store, self.key, &self.items)
    }

    fn flush<S: KeyValueStore + ?Sized>(&self, store: &S) {
        if let Err(e) = self.persist(store) {
            log::error!("[STORE] {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn note(id: u64, title: &str) -> Note {
        Note {
            id,
            title: title.to_string(),
            content: String::new(),
        }
    }

    #[test]
    fn test_front_insert_and_reload() {
        let store = MemoryStore::new();
        let mut notes = Collection::<Note>::load(&store, "notes", Insert::Front);
        notes.add(&store, note(1, "first"));
        notes.add(&store, note(2, "second"));

        let reloaded = Collection::<Note>::load(&store, "notes", Insert::Front);
        assert_eq!(reloaded.items(), notes.items());
        assert_eq!(reloaded.items()[0].title, "second");
    }

    #[test]
    fn test_add_remove_sequence_round_trips_after_each_step() {
        let store = MemoryStore::new();
        let mut notes = Collection::<Note>::load(&store, "notes", Insert::Back);
        let steps: Vec<(bool, u64)> = vec![(true, 1), (true, 2), (false, 1), (true, 3), (false, 9), (false, 3)];

        for (is_add, id) in steps {
            if is_add {
                notes.add(&store, note(id, "n"));
            } else {
                notes.remove(&store, &id);
            }
            let reloaded = Collection::<Note>::load(&store, "notes", Insert::Back);
            assert_eq!(reloaded.items(), notes.items());
        }
        assert_eq!(notes.items().iter().map(|n| n.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_remove_unknown_id_does_not_write() {
        let store = MemoryStore::new();
        let mut notes = Collection::<Note>::load(&store, "notes", Insert::Back);
        assert!(!notes.remove(&store, &42));
        assert_eq!(store.get("notes"), None);
    }

    #[test]
    fn test_update_by_id() {
        let store = MemoryStore::new();
        let mut notes = Collection::<Note>::load(&store, "notes", Insert::Back);
        notes.add(&store, note(5, "draft"));
        assert!(notes.update(&store, &5, |n| n.title = "final".to_string()));
        assert!(!notes.update(&store, &6, |n| n.title = "nope".to_string()));

        let reloaded = Collection::<Note>::load(&store, "notes", Insert::Back);
        assert_eq!(reloaded.get(&5).map(|n| n.title.as_str()), Some("final"));
    }

    #[test]
    fn test_corrupt_storage_loads_empty() {
        let store = MemoryStore::new();
        store.set("notes", "[{\"id\":").unwrap();
        let notes = Collection::<Note>::load(&store, "notes", Insert::Front);
        assert!(notes.items().is_empty());
    }
}
