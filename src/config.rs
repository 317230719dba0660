//! Application configuration
//!
//! Read from `config.toml` in the platform config directory
//! (e.g. `~/.config/lingocard/config.toml`). Every field is optional.
//!
//! ```toml
//! data_dir = "/home/me/.local/share/lingocard"
//!
//! [gemini]
//! api_key = "..."
//! model = "gemini-3-flash-preview"
//! timeout_secs = 60
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR: &str = "lingocard";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "LINGOCARD_DATA_DIR";

/// Environment variables checked, in order, for the Gemini API key
pub const API_KEY_ENV: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Could not determine a data directory")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where decks and cards are stored; defaults to the platform data dir
    pub data_dir: Option<PathBuf>,
    pub gemini: GeminiConfig,
}

/// Settings for the Gemini generation and recognition service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-3-flash-preview".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 60,
        }
    }
}

impl AppConfig {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR).join("config.toml"))
    }

    /// Load the config at `path`, or defaults when the file does not exist.
    /// Environment overrides are applied afterwards.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::from_file(path),
            Some(path) => {
                log::debug!("No config file at {:?}, using defaults", path);
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = var(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(key) = API_KEY_ENV
            .iter()
            .find_map(|name| var(name).filter(|v| !v.is_empty()))
        {
            self.gemini.api_key = Some(key);
        }
    }

    /// The data directory to use
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_local_dir()
                .map(|p| p.join(APP_DIR))
                .ok_or(ConfigError::DataDirNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load_file(Some(&temp.path().join("config.toml"))).unwrap();
        assert_eq!(config.gemini.model, "gemini-3-flash-preview");
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "data_dir = \"/tmp/cards\"\n\n[gemini]\ntimeout_secs = 5\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/cards")));
        assert_eq!(config.gemini.timeout_secs, 5);
        assert_eq!(config.gemini.model, "gemini-3-flash-preview");
    }

    #[test]
    fn test_invalid_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "data_dir = [").unwrap();

        assert!(matches!(AppConfig::from_file(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env(|key| match key {
            "API_KEY" => Some("fallback".to_string()),
            DATA_DIR_ENV => Some("/data".to_string()),
            _ => None,
        });

        assert_eq!(config.gemini.api_key.as_deref(), Some("fallback"));
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/data"));
    }

    #[test]
    fn test_gemini_key_preferred() {
        let mut config = AppConfig::default();
        config.apply_env(|key| match key {
            "GEMINI_API_KEY" => Some("primary".to_string()),
            "API_KEY" => Some("fallback".to_string()),
            _ => None,
        });
        assert_eq!(config.gemini.api_key.as_deref(), Some("primary"));
    }
}
