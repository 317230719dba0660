//! Deck registry
//!
//! Owns the deck sequence and guarantees that the English and Korean master
//! decks are always present.

mod registry;

pub use registry::{ensure_defaults, DeckRegistry};
