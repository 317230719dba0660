//! Save routing
//!
//! Files a generated card into a chosen deck and into its language's master
//! deck, skipping any deck that already holds the same lookup.

use crate::cards::{Language, VocabularyCard, DEFAULT_DECK_ID_EN, DEFAULT_DECK_ID_KR};
use crate::store::CardStore;

/// The master deck a card belongs to: Korean when the primary meaning's context
/// mentions Korean or the term was detected as Korean, English otherwise
pub fn master_deck_for(card: &VocabularyCard) -> &'static str {
    let korean_context = card
        .primary_meaning()
        .map_or(false, |m| m.mentions("korean"));

    if korean_context || card.detected_language == Language::Korean {
        DEFAULT_DECK_ID_KR
    } else {
        DEFAULT_DECK_ID_EN
    }
}

/// Save `card` into `target_deck_id` and into its master deck.
///
/// Each deck gets a fresh instance at the front of the store unless it already
/// holds the same lookup. Both checks run against the store as it was before
/// this call, so saving into the master deck itself adds one instance.
/// Returns the ids of the instances created.
pub fn save_card_to_deck(
    store: &mut CardStore,
    card: &VocabularyCard,
    target_deck_id: Option<&str>,
) -> Vec<String> {
    let master_deck_id = master_deck_for(card);

    let save_target = target_deck_id.filter(|id| !store.exists_in(id, card));
    let save_master = !store.exists_in(master_deck_id, card);

    let mut created = Vec::new();

    if let Some(deck_id) = save_target {
        let copy = card.copy_into_deck(deck_id);
        created.push(copy.id.clone());
        store.insert_front(copy);
    }

    if save_master && save_target != Some(master_deck_id) {
        let copy = card.copy_into_deck(master_deck_id);
        created.push(copy.id.clone());
        store.insert_front(copy);
    }

    log::info!(
        "Saved '{}' into {} deck(s) (target: {:?}, master: {})",
        card.term,
        created.len(),
        target_deck_id,
        master_deck_id
    );

    created
}
