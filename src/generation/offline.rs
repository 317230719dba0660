//! Generator backed by a saved response file

use std::path::PathBuf;

use async_trait::async_trait;

use super::response::parse_card_response;
use super::{CardGenerator, Result};
use crate::cards::VocabularyCard;

/// Answers every lookup with the generation response stored in a file.
///
/// The file holds the JSON object a generation service would return. Useful
/// without network access and for replaying a captured answer.
pub struct ResponseFileGenerator {
    path: PathBuf,
}

impl ResponseFileGenerator {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl CardGenerator for ResponseFileGenerator {
    async fn generate(&self, term: &str) -> Result<VocabularyCard> {
        log::info!("Reading generation response for '{}' from {:?}", term, self.path);
        let text = tokio::fs::read_to_string(&self.path).await?;
        parse_card_response(term, &text)
    }
}
