use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TOPIC: &str = "DALYs in Low Back Pain: Comprehensive Explanation and Global Impact";

const APP_DIR: &str = "daly-deck";

/// Deck configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Credential for the generative service. Never written back out.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub topic: String,
    pub log_path: Option<PathBuf>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            topic: DEFAULT_TOPIC.to_string(),
            log_path: None,
        }
    }
}

impl DeckConfig {
    /// Default config file location, `<config dir>/daly-deck/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Default log file location, `<data dir>/daly-deck/deck.log`.
    pub fn default_log_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR)
            .join("deck.log")
    }

    /// Load configuration from a TOML file, or JSON when the extension is `.json`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::FileNotFound { path: display });
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: display.clone(), source })?;

        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            serde_json::from_str(&contents).map_err(|source| ConfigError::Json { path: display, source })
        } else {
            toml::from_str(&contents).map_err(|source| ConfigError::Toml { path: display, source })
        }
    }

    /// Resolve the effective configuration: defaults, then the config file,
    /// then the process environment.
    ///
    /// An explicit `path` must exist. The default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => {
                    let config = Self::load_from_file(&default)?;
                    tracing::info!(path = %default.display(), "Loaded configuration");
                    config
                }
                _ => {
                    tracing::debug!("Using default configuration");
                    Self::default()
                }
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overlay environment values supplied by `lookup`.
    ///
    /// `GEMINI_API_KEY` takes precedence over `API_KEY`. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("GEMINI_API_KEY").or_else(|| get("API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(model) = get("DECK_MODEL") {
            self.model = model;
        }
        if let Some(url) = get("DECK_BASE_URL") {
            self.base_url = url;
        }
        if let Some(path) = get("DECK_LOG_PATH") {
            self.log_path = Some(PathBuf::from(path));
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_path.clone().unwrap_or_else(Self::default_log_path)
    }
}
