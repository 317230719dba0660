use crate::cards::{Deck, DEFAULT_DECK_ID_EN, DEFAULT_DECK_ID_KR};

/// Insert the master decks into a loaded deck sequence if they are missing.
///
/// A missing English deck goes to the front. A missing Korean deck goes right
/// after the English deck. All other decks keep their relative order.
pub fn ensure_defaults(mut decks: Vec<Deck>) -> Vec<Deck> {
    if !decks.iter().any(|d| d.id == DEFAULT_DECK_ID_EN) {
        decks.insert(0, Deck::english_default());
    }

    if !decks.iter().any(|d| d.id == DEFAULT_DECK_ID_KR) {
        let en_index = decks
            .iter()
            .position(|d| d.id == DEFAULT_DECK_ID_EN)
            .unwrap_or(0);
        decks.insert(en_index + 1, Deck::korean_default());
    }

    decks
}

/// The ordered set of decks
#[derive(Debug, Clone)]
pub struct DeckRegistry {
    decks: Vec<Deck>,
}

impl Default for DeckRegistry {
    fn default() -> Self {
        Self::from_loaded(Vec::new())
    }
}

impl DeckRegistry {
    /// Build a registry from persisted decks, adding the master decks if needed
    pub fn from_loaded(decks: Vec<Deck>) -> Self {
        Self {
            decks: ensure_defaults(decks),
        }
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn get(&self, deck_id: &str) -> Option<&Deck> {
        self.decks.iter().find(|d| d.id == deck_id)
    }

    pub fn contains(&self, deck_id: &str) -> bool {
        self.get(deck_id).is_some()
    }

    pub fn first(&self) -> Option<&Deck> {
        self.decks.first()
    }

    /// Append a new deck and return its id.
    ///
    /// Returns `None` without changing anything when the trimmed name is empty.
    pub fn create_deck(&mut self, name: &str) -> Option<String> {
        if name.trim().is_empty() {
            return None;
        }

        let deck = Deck::new(name);
        let id = deck.id.clone();
        log::info!("Created deck '{}' ({})", deck.name, id);
        self.decks.push(deck);
        Some(id)
    }
}
