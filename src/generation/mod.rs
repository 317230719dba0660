//! Card generation and handwriting recognition services
//!
//! The services are external collaborators behind async traits. Whatever they
//! return is untrusted and is validated into a [`VocabularyCard`] before the
//! rest of the crate sees it.

mod gemini;
mod offline;
mod response;

use async_trait::async_trait;
use thiserror::Error;

use crate::cards::VocabularyCard;

pub use gemini::GeminiClient;
pub use offline::ResponseFileGenerator;
pub use response::parse_card_response;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service error: {status} - {message}")]
    Service { status: u16, message: String },

    #[error("No response from the generation service")]
    EmptyResponse,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("No API key configured for the generation service")]
    MissingApiKey,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GenerationError>;

/// Produces a vocabulary card for a term
#[async_trait]
pub trait CardGenerator: Send + Sync {
    /// Generate a new, unsaved card for `term`
    async fn generate(&self, term: &str) -> Result<VocabularyCard>;
}

/// Reads handwritten text from an image
#[async_trait]
pub trait HandwritingRecognizer: Send + Sync {
    /// Recognise the text in a PNG image. `None` means nothing was recognised.
    async fn recognize(&self, png: &[u8]) -> Result<Option<String>>;
}
