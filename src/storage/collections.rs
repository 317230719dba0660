use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{KeyValueStore, Result};
use crate::cards::{Deck, VocabularyCard};

/// Slot holding the deck sequence
pub const DECKS_KEY: &str = "lingocard_decks_v1";

/// Slot holding the card sequence
pub const CARDS_KEY: &str = "lingocard_storage_v3";

/// Reads and writes the deck and card collections
pub struct CollectionStorage<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> CollectionStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persisted decks. Missing or unreadable data yields an empty list.
    pub fn load_decks(&self) -> Vec<Deck> {
        self.load_slot(DECKS_KEY)
    }

    /// Persisted cards. Missing or unreadable data yields an empty list, and
    /// cards without any meaning are dropped.
    pub fn load_cards(&self) -> Vec<VocabularyCard> {
        let cards: Vec<VocabularyCard> = self.load_slot(CARDS_KEY);
        let total = cards.len();
        let cards: Vec<VocabularyCard> = cards
            .into_iter()
            .filter(|c| !c.meanings.is_empty())
            .collect();
        if cards.len() < total {
            log::warn!("Dropped {} stored card(s) without meanings", total - cards.len());
        }
        cards
    }

    pub fn save_decks(&mut self, decks: &[Deck]) -> Result<()> {
        self.save_slot(DECKS_KEY, decks)
    }

    pub fn save_cards(&mut self, cards: &[VocabularyCard]) -> Result<()> {
        self.save_slot(CARDS_KEY, cards)
    }

    fn load_slot<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let content = match self.store.get(key) {
            Ok(Some(content)) => content,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Failed to read {}: {}", key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(values) => values,
            Err(e) => {
                log::warn!("Ignoring unreadable {}: {}", key, e);
                Vec::new()
            }
        }
    }

    fn save_slot<T: Serialize>(&mut self, key: &str, values: &[T]) -> Result<()> {
        let json = serde_json::to_string(values)?;
        self.store.set(key, &json)
    }
}
