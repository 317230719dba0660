//! Data models for vocabulary cards and decks

use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id of the English master deck
pub const DEFAULT_DECK_ID_EN: &str = "deck_default_english";

/// Id of the Korean master deck
pub const DEFAULT_DECK_ID_KR: &str = "deck_default_korean";

/// Current time at the millisecond precision timestamps are stored with
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Language detected for a looked-up term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Korean,
    Japanese,
    #[serde(other)]
    Unknown,
}

impl Default for Language {
    fn default() -> Self {
        Self::Unknown
    }
}

impl Language {
    /// Locale tag handed to a speech playback collaborator
    pub fn speech_locale(&self) -> &'static str {
        match self {
            Self::Korean => "ko-KR",
            Self::Japanese => "ja-JP",
            Self::English | Self::Unknown => "en-US",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Korean => "Korean",
            Self::Japanese => "Japanese",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Learning status of a card
///
/// Cards start as `New`; only a review grading moves them to `Learning` or `Mastered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardStatus {
    New,
    Learning,
    Mastered,
}

impl Default for CardStatus {
    fn default() -> Self {
        Self::New
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::New => "New",
            Self::Learning => "Learning",
            Self::Mastered => "Mastered",
        };
        f.write_str(label)
    }
}

/// An example sentence attached to a meaning
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExampleSentence {
    pub original: String,
    pub translation: String,
}

/// One context-tagged meaning of a term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    /// Context label, e.g. "General", "Business", "English (Formal)"
    pub context_type: String,
    pub definition: String,
    /// Usage guide, tone or vibe
    pub nuance: String,
    pub example: ExampleSentence,
}

impl Meaning {
    pub fn category(&self) -> ContextCategory {
        ContextCategory::classify(&self.context_type)
    }

    /// Whether the context label names `language` (case-insensitive)
    pub fn mentions(&self, language: &str) -> bool {
        self.context_type
            .to_lowercase()
            .contains(&language.to_lowercase())
    }
}

/// Coarse grouping of context labels, used for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextCategory {
    English,
    Korean,
    Formal,
    Casual,
    General,
    Academic,
    Other,
}

impl ContextCategory {
    /// Classify a context label. The first matching rule wins.
    pub fn classify(context_type: &str) -> Self {
        let lower = context_type.to_lowercase();
        let any = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

        if any(&["english"]) {
            Self::English
        } else if any(&["korean"]) {
            Self::Korean
        } else if any(&["econom", "business", "legal", "formal"]) {
            Self::Formal
        } else if any(&["slang", "casual", "internet"]) {
            Self::Casual
        } else if any(&["daily", "life", "general"]) {
            Self::General
        } else if any(&["academic", "science", "tech", "it", "medic"]) {
            Self::Academic
        } else {
            Self::Other
        }
    }
}

/// A named collection of cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub name: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Deck {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            created_at: now(),
        }
    }

    pub fn english_default() -> Self {
        Self {
            id: DEFAULT_DECK_ID_EN.to_string(),
            name: "English".to_string(),
            created_at: DateTime::UNIX_EPOCH,
        }
    }

    pub fn korean_default() -> Self {
        Self {
            id: DEFAULT_DECK_ID_KR.to_string(),
            name: "Korean".to_string(),
            created_at: DateTime::UNIX_EPOCH,
        }
    }

    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_DECK_ID_EN || self.id == DEFAULT_DECK_ID_KR
    }
}

/// A looked-up term with its meanings, filed into at most one deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyCard {
    pub id: String,
    pub term: String,
    pub detected_language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    /// Ordered, non-empty; the first entry is the primary meaning
    pub meanings: Vec<Meaning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_ref_term: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: CardStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_id: Option<String>,
}

impl VocabularyCard {
    pub fn new(term: String, detected_language: Language, meanings: Vec<Meaning>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            term,
            detected_language,
            pronunciation: None,
            meanings,
            cross_ref_term: None,
            created_at: now(),
            status: CardStatus::New,
            deck_id: None,
        }
    }

    /// The first meaning, the card's identity for dedup
    pub fn primary_meaning(&self) -> Option<&Meaning> {
        self.meanings.first()
    }

    /// The meaning shown first on the back of a review card: the one labelled
    /// exactly "General", else the primary meaning
    pub fn display_meaning(&self) -> Option<&Meaning> {
        self.meanings
            .iter()
            .find(|m| m.context_type == "General")
            .or_else(|| self.primary_meaning())
    }

    /// Pronunciation, treating an empty string as absent
    pub fn pronunciation(&self) -> Option<&str> {
        self.pronunciation.as_deref().filter(|p| !p.is_empty())
    }

    /// A new instance of the same lookup filed into `deck_id`
    pub fn copy_into_deck(&self, deck_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            deck_id: Some(deck_id.to_string()),
            ..self.clone()
        }
    }

    /// A new instance carrying only `meanings`
    pub fn with_meanings(&self, meanings: Vec<Meaning>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            meanings,
            ..self.clone()
        }
    }

    pub fn in_deck(&self, deck_id: &str) -> bool {
        self.deck_id.as_deref() == Some(deck_id)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn meaning(context_type: &str, definition: &str) -> Meaning {
        Meaning {
            context_type: context_type.to_string(),
            definition: definition.to_string(),
            nuance: String::new(),
            example: ExampleSentence::default(),
        }
    }

    pub fn card(term: &str, language: Language, definition: &str) -> VocabularyCard {
        VocabularyCard::new(
            term.to_string(),
            language,
            vec![meaning("General", definition)],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_card_json_uses_original_layout() {
        let mut card = card("hello", Language::English, "こんにちは");
        card.deck_id = Some(DEFAULT_DECK_ID_EN.to_string());

        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["detectedLanguage"], "English");
        assert_eq!(value["status"], "New");
        assert_eq!(value["deckId"], DEFAULT_DECK_ID_EN);
        assert_eq!(value["meanings"][0]["contextType"], "General");
        assert!(value["createdAt"].is_i64());
        assert!(value.get("pronunciation").is_none());
    }

    #[test]
    fn test_unrecognized_language_is_unknown() {
        let lang: Language = serde_json::from_str("\"Spanish\"").unwrap();
        assert_eq!(lang, Language::Unknown);
    }

    #[test]
    fn test_display_meaning_prefers_general() {
        let mut card = card("run", Language::English, "走る");
        card.meanings.insert(0, meaning("Business", "経営する"));

        assert_eq!(card.primary_meaning().unwrap().definition, "経営する");
        assert_eq!(card.display_meaning().unwrap().definition, "走る");
    }

    #[test]
    fn test_copy_into_deck_gets_fresh_id() {
        let card = card("hello", Language::English, "こんにちは");
        let copy = card.copy_into_deck("deck-1");

        assert_ne!(copy.id, card.id);
        assert_eq!(copy.deck_id.as_deref(), Some("deck-1"));
        assert_eq!(copy.meanings, card.meanings);
    }

    #[test]
    fn test_context_category() {
        assert_eq!(ContextCategory::classify("English (Formal)"), ContextCategory::English);
        assert_eq!(ContextCategory::classify("Korean (Casual)"), ContextCategory::Korean);
        assert_eq!(ContextCategory::classify("Legal"), ContextCategory::Formal);
        assert_eq!(ContextCategory::classify("Slang"), ContextCategory::Casual);
        assert_eq!(ContextCategory::classify("Daily Life"), ContextCategory::General);
        assert_eq!(ContextCategory::classify("Medical"), ContextCategory::Academic);
        assert_eq!(ContextCategory::classify("Sports"), ContextCategory::Other);
    }

    #[test]
    fn test_speech_locale() {
        assert_eq!(Language::Korean.speech_locale(), "ko-KR");
        assert_eq!(Language::Japanese.speech_locale(), "ja-JP");
        assert_eq!(Language::Unknown.speech_locale(), "en-US");
    }
}
