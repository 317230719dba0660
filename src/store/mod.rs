//! Card store
//!
//! Owns every saved card instance, most recent first. All mutations of the
//! card collection go through [`CardStore`].

use serde::Serialize;

use crate::cards::{same_lookup, CardStatus, VocabularyCard};

/// Progress of a deck, as shown in the review deck list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckProgress {
    pub total_cards: usize,
    pub mastered_cards: usize,
    /// Mastered share rounded to the nearest percent, 0 for an empty deck
    pub percent_mastered: u32,
}

#[derive(Debug, Clone, Default)]
pub struct CardStore {
    cards: Vec<VocabularyCard>,
}

impl CardStore {
    pub fn new(cards: Vec<VocabularyCard>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[VocabularyCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, card_id: &str) -> Option<&VocabularyCard> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    /// Insert a card at the front
    pub fn insert_front(&mut self, card: VocabularyCard) {
        log::debug!("Stored card '{}' ({}) in {:?}", card.term, card.id, card.deck_id);
        self.cards.insert(0, card);
    }

    /// Whether `deck_id` already holds a copy of the lookup `card`
    pub fn exists_in(&self, deck_id: &str, card: &VocabularyCard) -> bool {
        self.cards
            .iter()
            .any(|c| c.in_deck(deck_id) && same_lookup(c, card))
    }

    /// Ids of the decks that already hold a copy of the lookup `card`
    pub fn saved_deck_ids(&self, card: &VocabularyCard) -> Vec<String> {
        self.cards
            .iter()
            .filter(|c| same_lookup(c, card))
            .filter_map(|c| c.deck_id.clone())
            .collect()
    }

    /// Cards filed into `deck_id`, in store order
    pub fn cards_in_deck(&self, deck_id: &str) -> Vec<VocabularyCard> {
        self.cards
            .iter()
            .filter(|c| c.in_deck(deck_id))
            .cloned()
            .collect()
    }

    pub fn deck_progress(&self, deck_id: &str) -> DeckProgress {
        let (total_cards, mastered_cards) = self
            .cards
            .iter()
            .filter(|c| c.in_deck(deck_id))
            .fold((0, 0), |(total, mastered), c| {
                let m = usize::from(c.status == CardStatus::Mastered);
                (total + 1, mastered + m)
            });

        let percent_mastered = if total_cards == 0 {
            0
        } else {
            ((mastered_cards as f64 / total_cards as f64) * 100.0).round() as u32
        };

        DeckProgress {
            total_cards,
            mastered_cards,
            percent_mastered,
        }
    }

    /// Set the status of a card. Returns false if no card has that id.
    pub fn update_status(&mut self, card_id: &str, status: CardStatus) -> bool {
        match self.cards.iter_mut().find(|c| c.id == card_id) {
            Some(card) => {
                card.status = status;
                true
            }
            None => false,
        }
    }

    /// Remove a card. Returns the removed card, if any.
    pub fn delete(&mut self, card_id: &str) -> Option<VocabularyCard> {
        let pos = self.cards.iter().position(|c| c.id == card_id)?;
        Some(self.cards.remove(pos))
    }
}
