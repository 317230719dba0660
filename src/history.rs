//! History search
//!
//! Deep substring search over saved cards: the term, the pronunciation and
//! every field of every meaning are searched, not only the primary meaning.

use crate::cards::{Meaning, VocabularyCard};

/// Cards matching `query`, in their original order.
///
/// A blank query matches everything. Matching is case-insensitive.
pub fn filter<'a>(cards: &'a [VocabularyCard], query: &str) -> Vec<&'a VocabularyCard> {
    if query.trim().is_empty() {
        return cards.iter().collect();
    }

    let q = query.to_lowercase();
    cards.iter().filter(|card| matches(card, &q)).collect()
}

/// Order cards most recent first. Cards created at the same instant keep their order.
pub fn recent_first(mut cards: Vec<&VocabularyCard>) -> Vec<&VocabularyCard> {
    cards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    cards
}

fn matches(card: &VocabularyCard, q: &str) -> bool {
    if contains(&card.term, q) {
        return true;
    }
    if card.pronunciation().map_or(false, |p| contains(p, q)) {
        return true;
    }
    card.meanings.iter().any(|m| meaning_matches(m, q))
}

fn meaning_matches(m: &Meaning, q: &str) -> bool {
    contains(&m.definition, q)
        || contains(&m.nuance, q)
        || contains(&m.example.original, q)
        || contains(&m.example.translation, q)
}

fn contains(haystack: &str, lowered_query: &str) -> bool {
    haystack.to_lowercase().contains(lowered_query)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::cards::models::fixtures::{card, meaning};
    use crate::cards::{ExampleSentence, Language};

    fn apple() -> VocabularyCard {
        let mut c = card("apple", Language::English, "りんご");
        c.meanings[0].nuance = "informal tone".to_string();
        c
    }

    fn terms(found: &[&VocabularyCard]) -> Vec<String> {
        found.iter().map(|c| c.term.clone()).collect()
    }

    #[test]
    fn test_nuance_matches() {
        let cards = vec![apple()];
        assert_eq!(filter(&cards, "informal").len(), 1);
        assert!(filter(&cards, "banana").is_empty());
    }

    #[test]
    fn test_blank_query_returns_all() {
        let cards = vec![apple(), card("pear", Language::English, "梨")];
        assert_eq!(filter(&cards, "   ").len(), 2);
        assert_eq!(filter(&cards, "").len(), 2);
    }

    #[test]
    fn test_case_insensitive_term_and_pronunciation() {
        let mut c = card("Hello", Language::English, "こんにちは");
        c.pronunciation = Some("həˈloʊ".to_string());
        let cards = vec![c];

        assert_eq!(filter(&cards, "HELLO").len(), 1);
        assert_eq!(filter(&cards, "ˈlo").len(), 1);
    }

    #[test]
    fn test_searches_every_meaning() {
        let mut c = card("run", Language::English, "走る");
        c.meanings.push(Meaning {
            example: ExampleSentence {
                original: "She runs a small business.".to_string(),
                translation: "彼女は小さな会社を経営している。".to_string(),
            },
            ..meaning("Business", "経営する")
        });
        let cards = vec![c];

        assert_eq!(filter(&cards, "small business").len(), 1);
        assert_eq!(filter(&cards, "会社").len(), 1);
        assert_eq!(filter(&cards, "経営").len(), 1);
    }

    #[test]
    fn test_preserves_order() {
        let cards = vec![
            card("cat", Language::English, "猫"),
            card("dog", Language::English, "犬"),
            card("catalog", Language::English, "目録"),
        ];
        assert_eq!(terms(&filter(&cards, "cat")), vec!["cat", "catalog"]);
    }

    #[test]
    fn test_recent_first() {
        let mut old = card("old", Language::English, "古い");
        old.created_at = old.created_at - Duration::days(1);
        let new = card("new", Language::English, "新しい");
        let cards = vec![old, new];

        let sorted = recent_first(filter(&cards, ""));
        assert_eq!(terms(&sorted), vec!["new", "old"]);
    }
}
