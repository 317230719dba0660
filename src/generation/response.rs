//! Validation of generation service output

use serde::Deserialize;

use super::{GenerationError, Result};
use crate::cards::{ExampleSentence, Language, Meaning, VocabularyCard};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCard {
    detected_language: Option<String>,
    pronunciation: Option<String>,
    cross_ref_term: Option<String>,
    meanings: Option<Vec<RawMeaning>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMeaning {
    context_type: Option<String>,
    definition: Option<String>,
    nuance: Option<String>,
    example: Option<RawExample>,
}

#[derive(Debug, Deserialize)]
struct RawExample {
    original: Option<String>,
    translation: Option<String>,
}

/// Parse the JSON text returned for `term` into a new card.
///
/// `detectedLanguage` and a non-empty `meanings` array are required, and each
/// meaning needs a context label, a definition, a nuance and an example.
/// Example fields, the pronunciation and the cross reference may be missing or
/// empty; empty optional strings become `None`.
pub fn parse_card_response(term: &str, text: &str) -> Result<VocabularyCard> {
    let raw: RawCard = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    let language = raw
        .detected_language
        .as_deref()
        .map(parse_language)
        .ok_or_else(|| malformed("missing detectedLanguage"))?;

    let raw_meanings = raw.meanings.unwrap_or_default();
    if raw_meanings.is_empty() {
        return Err(malformed("no meanings"));
    }

    let meanings = raw_meanings
        .into_iter()
        .enumerate()
        .map(|(i, m)| validate_meaning(i, m))
        .collect::<Result<Vec<_>>>()?;

    let mut card = VocabularyCard::new(term.trim().to_string(), language, meanings);
    card.pronunciation = non_empty(raw.pronunciation);
    card.cross_ref_term = non_empty(raw.cross_ref_term);
    Ok(card)
}

fn validate_meaning(index: usize, raw: RawMeaning) -> Result<Meaning> {
    let required = |value: Option<String>, field: &str| {
        value
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| malformed(&format!("meaning {} has no {}", index, field)))
    };

    let context_type = required(raw.context_type, "contextType")?;
    let definition = required(raw.definition, "definition")?;
    let nuance = raw
        .nuance
        .ok_or_else(|| malformed(&format!("meaning {} has no nuance", index)))?;
    let example = raw
        .example
        .ok_or_else(|| malformed(&format!("meaning {} has no example", index)))?;

    Ok(Meaning {
        context_type,
        definition,
        nuance,
        example: ExampleSentence {
            original: example.original.unwrap_or_default(),
            translation: example.translation.unwrap_or_default(),
        },
    })
}

fn parse_language(value: &str) -> Language {
    match value.trim().to_lowercase().as_str() {
        "english" | "en" => Language::English,
        "korean" | "kr" | "ko" => Language::Korean,
        "japanese" | "jp" | "ja" => Language::Japanese,
        _ => Language::Unknown,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn malformed(reason: &str) -> GenerationError {
    GenerationError::MalformedResponse(reason.to_string())
}

/// Drop a surrounding markdown code fence, if any
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // A fence on one line has no language tag to skip
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
