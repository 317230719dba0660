//! Persistence of decks and cards
//!
//! Two logical slots in a key-value store hold the serialized deck sequence and
//! the serialized card sequence. Both are read once at startup and rewritten in
//! full after every change.

mod collections;
mod file_storage;

use std::collections::HashMap;

pub use collections::{CollectionStorage, CARDS_KEY, DECKS_KEY};
pub use file_storage::{FileStorage, StorageError};

pub type Result<T> = std::result::Result<T, StorageError>;

/// A string key-value store
pub trait KeyValueStore {
    /// The value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, for front ends without a disk and for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
