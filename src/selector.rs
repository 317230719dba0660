//! Contextual meaning selection for a freshly generated card
//!
//! Japanese lookups carry translations into both English and Korean. The
//! caller picks a target-language tab and only the meanings for that language
//! are shown and saved. Other lookups are shown whole.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::{Deck, Language, Meaning, VocabularyCard, DEFAULT_DECK_ID_EN, DEFAULT_DECK_ID_KR};

/// Target-language tab for Japanese lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetTab {
    #[default]
    English,
    Korean,
}

impl TargetTab {
    pub fn language_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Korean => "Korean",
        }
    }

    pub fn master_deck_id(&self) -> &'static str {
        match self {
            Self::English => DEFAULT_DECK_ID_EN,
            Self::Korean => DEFAULT_DECK_ID_KR,
        }
    }
}

impl fmt::Display for TargetTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.language_name())
    }
}

impl FromStr for TargetTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" | "en" => Ok(Self::English),
            "korean" | "kr" | "ko" => Ok(Self::Korean),
            other => Err(format!("unknown target language '{}'", other)),
        }
    }
}

/// Meanings of `card` whose context label contains `language_name`.
///
/// Only Japanese cards are filtered. When nothing matches, all meanings are
/// returned so a card is never shown empty.
pub fn visible_meanings<'a>(card: &'a VocabularyCard, language_name: &str) -> Vec<&'a Meaning> {
    if card.detected_language != Language::Japanese {
        return card.meanings.iter().collect();
    }

    let filtered: Vec<&Meaning> = card
        .meanings
        .iter()
        .filter(|m| m.mentions(language_name))
        .collect();

    if filtered.is_empty() {
        card.meanings.iter().collect()
    } else {
        filtered
    }
}

/// Deck preselected for saving the card as currently shown.
///
/// Japanese cards follow the tab. Others go to the deck of their language, or to
/// the first deck when the language is unknown. The choice must name an existing
/// deck, otherwise the first deck is used.
pub fn default_save_deck(card: &VocabularyCard, tab: TargetTab, decks: &[Deck]) -> Option<String> {
    let preferred = match card.detected_language {
        Language::Japanese => Some(tab.master_deck_id()),
        Language::English => Some(DEFAULT_DECK_ID_EN),
        Language::Korean => Some(DEFAULT_DECK_ID_KR),
        Language::Unknown => None,
    };

    preferred
        .filter(|id| decks.iter().any(|d| d.id == *id))
        .map(str::to_string)
        .or_else(|| decks.first().map(|d| d.id.clone()))
}

/// The card to hand to the save router for the view shown under `tab`.
///
/// Japanese cards are narrowed to the visible meanings under a fresh id; other
/// cards are saved as generated.
pub fn card_for_save(card: &VocabularyCard, tab: TargetTab) -> VocabularyCard {
    if card.detected_language != Language::Japanese {
        return card.clone();
    }

    let meanings = visible_meanings(card, tab.language_name())
        .into_iter()
        .cloned()
        .collect();
    card.with_meanings(meanings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::models::fixtures::{card, meaning};
    use crate::decks::DeckRegistry;

    fn japanese() -> VocabularyCard {
        let mut c = card("ありがとう", Language::Japanese, "unused");
        c.meanings = vec![
            meaning("English (General)", "thank you"),
            meaning("Korean (Casual)", "고마워"),
        ];
        c
    }

    fn definitions(meanings: &[&Meaning]) -> Vec<String> {
        meanings.iter().map(|m| m.definition.clone()).collect()
    }

    #[test]
    fn test_japanese_filtered_by_tab() {
        let c = japanese();
        assert_eq!(definitions(&visible_meanings(&c, "English")), vec!["thank you"]);
        assert_eq!(definitions(&visible_meanings(&c, "korean")), vec!["고마워"]);
    }

    #[test]
    fn test_unmatched_tab_shows_all() {
        let c = japanese();
        assert_eq!(visible_meanings(&c, "Spanish").len(), 2);
    }

    #[test]
    fn test_non_japanese_unfiltered() {
        let mut c = card("hello", Language::English, "こんにちは");
        c.meanings.push(meaning("Korean (Casual)", "안녕"));
        assert_eq!(visible_meanings(&c, "English").len(), 2);
    }

    #[test]
    fn test_default_save_deck() {
        let registry = DeckRegistry::default();
        let decks = registry.decks();

        assert_eq!(
            default_save_deck(&japanese(), TargetTab::Korean, decks).as_deref(),
            Some(DEFAULT_DECK_ID_KR)
        );
        assert_eq!(
            default_save_deck(&card("안녕", Language::Korean, "x"), TargetTab::English, decks).as_deref(),
            Some(DEFAULT_DECK_ID_KR)
        );
        assert_eq!(
            default_save_deck(&card("?", Language::Unknown, "x"), TargetTab::Korean, decks).as_deref(),
            Some(DEFAULT_DECK_ID_EN)
        );
        assert_eq!(default_save_deck(&card("?", Language::Unknown, "x"), TargetTab::English, &[]), None);
    }

    #[test]
    fn test_card_for_save_narrows_japanese() {
        let c = japanese();
        let saved = card_for_save(&c, TargetTab::Korean);

        assert_ne!(saved.id, c.id);
        assert_eq!(saved.meanings.len(), 1);
        assert_eq!(saved.meanings[0].definition, "고마워");
    }

    #[test]
    fn test_tab_from_str() {
        assert_eq!("Korean".parse::<TargetTab>().unwrap(), TargetTab::Korean);
        assert_eq!("en".parse::<TargetTab>().unwrap(), TargetTab::English);
        assert!("spanish".parse::<TargetTab>().is_err());
    }
}
