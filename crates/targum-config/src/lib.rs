use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::network::NetworkConfig;
use self::popup::PopupConfig;
use self::speech::SpeechConfig;

pub mod dictionary;
pub mod network;
pub mod popup;
pub mod speech;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub popup: PopupConfig,
    pub speech: SpeechConfig,
    pub dictionary: DictionaryConfig,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        Config {
            network: NetworkConfig::new(),
            popup: PopupConfig::new(),
            speech: SpeechConfig::new(),
            dictionary: DictionaryConfig::default(),
        }
    }

    /// Load a JSON profile, missing sections and fields fall back to defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Json {
            path: path.display().to_string(),
            source,
        })
    }
}
