//! Application configuration.
//!
//! Holds the Bot API connection settings, logging settings and the map of
//! configured bots (name -> API key). Configuration is persisted as TOML and
//! is immutable once loaded.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{TgError, TgResult};
use crate::platform::{self, AppDir};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bot API connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Configured bots keyed by name.
    #[serde(default)]
    pub bots: BTreeMap<String, BotEntry>,
}

/// Bot API connection configuration shared by every client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL; the API key and method are appended directly
    /// (`<base_url><api_key>/<method>`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds. Uploads get a multiple of this.
    #[serde(default = "default_api_timeout")]
    pub timeout_ms: u64,

    /// Directory for staged uploads. If empty, uses `<cache_dir>/uploads`.
    #[serde(default)]
    pub upload_dir: String,
}

/// A single configured bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotEntry {
    /// Bot API key (token).
    pub api_key: String,

    /// Whether updates are delivered through a webhook instead of polling.
    #[serde(default)]
    pub webhook: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output in the log file.
    #[serde(default)]
    pub json_output: bool,
}

fn default_base_url() -> String {
    constants::DEFAULT_API_BASE.to_string()
}

fn default_api_timeout() -> u64 {
    constants::DEFAULT_API_TIMEOUT_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_api_timeout(),
            upload_dir: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl BotEntry {
    /// Create an entry for a polling bot.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            webhook: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default config file path, or defaults if absent.
    pub fn load_default() -> TgResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> TgResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> TgResult<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> TgResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| TgError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> TgResult<PathBuf> {
        Ok(AppDir::Config.path()?.join(constants::CONFIG_FILE_NAME))
    }

    /// Check the constraints serde cannot express: non-empty keys, a parseable base URL.
    pub fn validate(&self) -> TgResult<()> {
        for (name, bot) in &self.bots {
            if bot.api_key.trim().is_empty() {
                return Err(TgError::Config(format!("bot {name}: api_key cannot be empty")));
            }
        }
        if url::Url::parse(&self.api.base_url).is_err() {
            return Err(TgError::Config(format!(
                "api.base_url is not a valid URL: {}",
                self.api.base_url
            )));
        }
        if self.api.timeout_ms == 0 {
            return Err(TgError::Config("api.timeout_ms must be positive".into()));
        }
        Ok(())
    }

    /// Get the effective upload staging directory.
    pub fn effective_upload_dir(&self) -> TgResult<PathBuf> {
        self.api.effective_upload_dir()
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> TgResult<PathBuf> {
        platform::dir_or_default(&self.logging.directory, AppDir::Data, "logs")
    }
}

impl ApiConfig {
    /// Get the effective upload staging directory, using the configured path or the default.
    pub fn effective_upload_dir(&self) -> TgResult<PathBuf> {
        platform::dir_or_default(&self.upload_dir, AppDir::Cache, "uploads")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "https://api.telegram.org/bot");
        assert_eq!(config.api.timeout_ms, 30_000);
        assert_eq!(config.logging.level, "info");
        assert!(config.bots.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_bots() {
        let config = AppConfig::from_toml(
            r#"
            [bots.news]
            api_key = "111:AAA"
            webhook = true

            [bots.echo]
            api_key = "222:BBB"
            "#,
        )
        .unwrap();
        assert_eq!(config.bots.len(), 2);
        assert!(config.bots["news"].webhook);
        assert!(!config.bots["echo"].webhook, "webhook should default to false");
        assert_eq!(config.bots["echo"].api_key, "222:BBB");
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let err = AppConfig::from_toml("[bots.news]\nwebhook = true\n").unwrap_err();
        assert!(matches!(err, TgError::Config(_)));
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let err = AppConfig::from_toml("[bots.news]\napi_key = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("api_key cannot be empty"));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = AppConfig::from_toml("[api]\nbase_url = \"not a url\"\n").unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_effective_upload_dir_override() {
        let mut config = AppConfig::default();
        config.api.upload_dir = "/var/tmp/tg".into();
        assert_eq!(config.effective_upload_dir().unwrap(), PathBuf::from("/var/tmp/tg"));
    }

    #[test]
    fn test_roundtrip_toml() {
        let mut config = AppConfig::default();
        config.bots.insert("news".into(), BotEntry::new("111:AAA"));
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized = AppConfig::from_toml(&serialized).unwrap();
        assert_eq!(deserialized.bots["news"], BotEntry::new("111:AAA"));
        assert_eq!(deserialized.api.timeout_ms, config.api.timeout_ms);
    }
}
