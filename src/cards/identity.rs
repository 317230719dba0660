//! Lookup identity for saved cards
//!
//! Two card instances hold the same lookup when their terms are equal ignoring case
//! and their primary-meaning definitions are equal exactly. The definition is
//! compared case-sensitively: a definition that differs only in case is a
//! different meaning and may be saved alongside the first one.

use super::models::VocabularyCard;

/// Whether `a` and `b` are the same lookup result
pub fn same_lookup(a: &VocabularyCard, b: &VocabularyCard) -> bool {
    same_term(&a.term, &b.term) && same_definition(a, b)
}

fn same_term(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

fn same_definition(a: &VocabularyCard, b: &VocabularyCard) -> bool {
    match (a.primary_meaning(), b.primary_meaning()) {
        (Some(ma), Some(mb)) => ma.definition == mb.definition,
        (None, None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::models::fixtures::card;
    use crate::cards::Language;

    #[test]
    fn test_term_ignores_case() {
        let a = card("Hello", Language::English, "こんにちは");
        let b = card("hELLO", Language::English, "こんにちは");
        assert!(same_lookup(&a, &b));
    }

    #[test]
    fn test_definition_is_case_sensitive() {
        let a = card("set", Language::English, "Set");
        let b = card("set", Language::English, "set");
        assert!(!same_lookup(&a, &b));
    }

    #[test]
    fn test_only_primary_meaning_counts() {
        let a = card("run", Language::English, "走る");
        let mut b = card("run", Language::English, "走る");
        b.meanings.push(crate::cards::models::fixtures::meaning("Business", "経営する"));
        assert!(same_lookup(&a, &b));
    }
}
