//! Configuration for the tributary CLI.
//!
//! Configuration is read from `~/.config/tributary/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::{ItemQuery, ReaderService};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub http: HttpConfig,
    pub items: ItemsConfig,
}

/// The sync service to talk to.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub title: Option<String>,
    /// Token from the service's login flow, sent as `GoogleLogin auth=<token>`
    pub auth_token: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.inoreader.com".to_string(),
            title: None,
            auth_token: None,
        }
    }
}

impl ServiceConfig {
    pub fn reader_service(&self) -> ReaderService {
        let service = ReaderService::new(self.base_url.clone());
        match &self.title {
            Some(title) => service.with_title(title.clone()),
            None => service,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("tributary/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ItemsConfig {
    /// Items per page (default: 20)
    pub page_size: u32,
}

impl Default for ItemsConfig {
    fn default() -> Self {
        Self {
            page_size: ItemQuery::DEFAULT_LIMIT,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_config_path()?)
    }

    /// Load configuration from `path`, creating a commented default there if missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::create_default_config(path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/tributary/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("tributary").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> &'static str {
        r##"# Tributary Configuration

[service]
# Base URL of a Google Reader compatible service
base_url = "https://www.inoreader.com"

# Display name of the service
# title = "Inoreader"

# Token obtained from the service's ClientLogin endpoint
# auth_token = ""

[http]
# Request timeout in seconds
timeout_secs = 30

[items]
# Items fetched per page
page_size = 20
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let config: Config = toml::from_str(Config::default_config_content())
            .expect("Default config should be valid TOML");

        assert_eq!(config.service.base_url, "https://www.inoreader.com");
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.items.page_size, 20);
        assert!(config.service.auth_token.is_none());
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[service]
base_url = "https://rss.example.com/api/greader.php"
title = "Home"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        let service = config.service.reader_service();
        assert_eq!(service.base_url, "https://rss.example.com/api/greader.php");
        assert_eq!(service.display_title(), "Home");
        assert_eq!(config.items.page_size, 20);
        assert!(config.http.user_agent.starts_with("tributary/"));
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.items.page_size, 20);
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.service.base_url, config.service.base_url);
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[items]\npage_size = \"many\"\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
