use forum_markup_engine::{
    DEFAULT_BASE_URL, DEFAULT_SMILE_BASE_URL, ParseOptions, TextCodec,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_LEGACY_CHARSET: &str = "windows-1251";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unknown legacy charset label: {0}")]
    UnknownCharset(String),
}

/// Settings for parsing markup outside the app (CLI, tests, tooling).
///
/// Every key is optional in the file; omitted keys take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host that relative links and images resolve against.
    pub base_url: String,
    /// Where smile images are served from.
    pub smile_base_url: String,
    /// WHATWG label of the forum's legacy code page.
    pub legacy_charset: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            smile_base_url: DEFAULT_SMILE_BASE_URL.to_string(),
            legacy_charset: DEFAULT_LEGACY_CHARSET.to_string(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/forum-markup");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Parser options built from these settings.
    pub fn parse_options(&self) -> Result<ParseOptions, ConfigError> {
        let codec = TextCodec::for_label(&self.legacy_charset)
            .ok_or_else(|| ConfigError::UnknownCharset(self.legacy_charset.clone()))?;
        Ok(ParseOptions {
            base_url: self.base_url.clone(),
            smile_base_url: self.smile_base_url.clone(),
            codec,
            ..ParseOptions::default()
        })
    }
}
