//! Gemini `generateContent` client

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use super::response::parse_card_response;
use super::{CardGenerator, GenerationError, HandwritingRecognizer, Result};
use crate::cards::VocabularyCard;
use crate::config::GeminiConfig;

const CARD_INSTRUCTION: &str = r#"You are a linguist and translator working between English, Korean and Japanese.
Analyse the input term and produce a vocabulary card covering its most important meanings.

If the term is English or Korean:
- Report the detected language.
- Give every meaning in Japanese.
- Pick the contexts that matter for this word (General, Business, IT, Medical, Slang, Academic, ...).
  Only use Economics when the word is an economic term.
- Order meanings from most common to most specific.

If the term is Japanese:
- Report the detected language as Japanese.
- Give translations into BOTH English and Korean, two or three options per language
  that differ in nuance (casual vs formal, written vs spoken).
- Every contextType MUST start with the language name, e.g. "English (General)",
  "English (Formal)", "Korean (Casual)", "Korean (Honorific)".

For each meaning:
- contextType: the best fitting category.
- definition: the Japanese meaning, or the translated term.
- nuance: a Japanese explanation of tone, usage restrictions or synonyms.
- example: a sentence using the definition, with its Japanese translation.

Answer with JSON matching the response schema."#;

const RECOGNITION_PROMPT: &str = "Identify the handwritten text in this image. \
Return ONLY the text found, without any explanation. \
Korean or Japanese text must be returned exactly as written.";

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts joined
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        Some(text)
    }
}

/// Client for the Gemini API, used for both card generation and handwriting
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(GenerationError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// POST a generateContent request and return the answer text
    async fn generate_content(&self, body: Value) -> Result<String> {
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parsed
            .text()
            .filter(|t| !t.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}

fn card_request(term: &str) -> Value {
    json!({
        "systemInstruction": { "parts": [{ "text": CARD_INSTRUCTION }] },
        "contents": [{ "role": "user", "parts": [{ "text": format!("Term to explain: \"{}\"", term) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": card_schema(),
        }
    })
}

fn card_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "detectedLanguage": { "type": "STRING", "enum": ["English", "Korean", "Japanese"] },
            "pronunciation": {
                "type": "STRING",
                "description": "Reading guide (Katakana for Korean, IPA for English, Hiragana for Japanese)"
            },
            "crossRefTerm": { "type": "STRING", "description": "A simple equivalent term or synonym" },
            "meanings": {
                "type": "ARRAY",
                "description": "Meanings or translations by context",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "contextType": { "type": "STRING" },
                        "definition": { "type": "STRING" },
                        "nuance": { "type": "STRING" },
                        "example": {
                            "type": "OBJECT",
                            "properties": {
                                "original": { "type": "STRING" },
                                "translation": { "type": "STRING" }
                            }
                        }
                    },
                    "required": ["contextType", "definition", "nuance", "example"]
                }
            }
        },
        "required": ["detectedLanguage", "meanings"]
    })
}

fn recognition_request(png: &[u8]) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [
                { "inlineData": { "mimeType": "image/png", "data": BASE64.encode(png) } },
                { "text": RECOGNITION_PROMPT }
            ]
        }]
    })
}

#[async_trait]
impl CardGenerator for GeminiClient {
    async fn generate(&self, term: &str) -> Result<VocabularyCard> {
        log::info!("Generating card for '{}' with {}", term, self.model);
        let text = self.generate_content(card_request(term)).await?;
        parse_card_response(term, &text)
    }
}

#[async_trait]
impl HandwritingRecognizer for GeminiClient {
    async fn recognize(&self, png: &[u8]) -> Result<Option<String>> {
        log::info!("Recognising handwriting ({} bytes)", png.len());
        recognized(self.generate_content(recognition_request(png)).await)
    }
}

/// An empty or blank answer means nothing was recognised
fn recognized(answer: Result<String>) -> Result<Option<String>> {
    match answer {
        Ok(text) => Ok(Some(text.trim().to_string()).filter(|t| !t.is_empty())),
        Err(GenerationError::EmptyResponse) => Ok(None),
        Err(e) => Err(e),
    }
}
