use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use lingocard_lib::app::LingoApp;
use lingocard_lib::cards::Deck;
use lingocard_lib::config::AppConfig;
use lingocard_lib::generation::{CardGenerator, GeminiClient, ResponseFileGenerator};
use lingocard_lib::storage::FileStorage;

/// Shared application state for CLI commands
pub struct App {
    pub config: AppConfig,
    pub state: LingoApp<FileStorage>,
}

impl App {
    /// Load config and open the data directory
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .or_else(AppConfig::default_path);
        let config = AppConfig::load(config_path.as_deref()).context("Failed to load config")?;

        let data_dir = config.data_dir().context("Failed to get data directory")?;
        log::debug!("Using data directory {:?}", data_dir);

        let storage = FileStorage::new(data_dir);
        storage.init().context("Failed to initialize storage")?;
        let state = LingoApp::open(storage).context("Failed to open card collection")?;

        Ok(Self { config, state })
    }

    /// The generator for lookups: a saved response file if given, else Gemini
    pub fn generator(&self, response: Option<PathBuf>) -> Result<Box<dyn CardGenerator>> {
        match response {
            Some(path) => Ok(Box::new(ResponseFileGenerator::new(path))),
            None => {
                let client = GeminiClient::new(&self.config.gemini).context(
                    "Failed to set up the Gemini client (set GEMINI_API_KEY or gemini.api_key)",
                )?;
                Ok(Box::new(client))
            }
        }
    }

    /// Find a deck by name (case-insensitive, exact match first, then prefix)
    pub fn find_deck(&self, name: &str) -> Result<Deck> {
        let decks = self.state.decks();
        let name_lower = name.to_lowercase();

        if let Some(deck) = decks.iter().find(|d| d.name.to_lowercase() == name_lower) {
            return Ok(deck.clone());
        }

        let matches: Vec<&Deck> = decks
            .iter()
            .filter(|d| d.name.to_lowercase().starts_with(&name_lower))
            .collect();

        match matches.len() {
            0 => bail!(
                "No deck matching '{}'. Available decks:\n{}",
                name,
                list_names(decks.iter())
            ),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous deck name '{}'. Matches:\n{}",
                name,
                list_names(matches.into_iter())
            ),
        }
    }

    /// Display name of a deck id, or the id itself when unknown
    pub fn deck_name(&self, deck_id: &str) -> String {
        self.state
            .deck(deck_id)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| deck_id.to_string())
    }
}

fn list_names<'a>(decks: impl Iterator<Item = &'a Deck>) -> String {
    decks
        .map(|d| format!("  - {}", d.name))
        .collect::<Vec<_>>()
        .join("\n")
}
