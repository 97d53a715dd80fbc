//! Configuration structures and loading logic.

use crate::config::modes::{ContinuationMode, DownloadMode};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub targeted_user: UserConfig,

    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub network: NetworkConfig,
}

/// Profile targeting configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// Profile handles whose feeds are paged through, in order.
    #[serde(default)]
    pub usernames: Vec<String>,
}

/// Download options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Download mode (feed, single).
    #[serde(default)]
    pub download_mode: DownloadMode,

    /// Root directory; owner directories are created below it.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Post URL or shortcode for single mode.
    #[serde(default)]
    pub post_url: Option<String>,

    /// Whether feed mode downloads each item or only lists it.
    #[serde(default = "default_true")]
    pub download_feed_media: bool,

    /// Whether to show download progress.
    #[serde(default = "default_true")]
    pub show_downloads: bool,

    /// Endpoint used for pages after the first.
    #[serde(default)]
    pub continuation: ContinuationMode,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_mode: DownloadMode::default(),
            download_directory: None,
            post_url: None,
            download_feed_media: true,
            show_downloads: true,
            continuation: ContinuationMode::default(),
        }
    }
}

/// Endpoint and request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Browser user agent string; the upstream rejects obvious bots.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Base URL for profile feeds and post pages.
    #[serde(default = "default_profile_base")]
    pub profile_base: String,

    /// GraphQL continuation endpoint.
    #[serde(default = "default_graphql_endpoint")]
    pub graphql_endpoint: String,

    /// Saved query id for the owner timeline.
    #[serde(default = "default_query_id")]
    pub query_id: String,

    /// Items requested per GraphQL page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            profile_base: default_profile_base(),
            graphql_endpoint: default_graphql_endpoint(),
            query_id: default_query_id(),
            page_size: default_page_size(),
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/88.0.4324.182 Safari/537.36".to_string()
}

fn default_profile_base() -> String {
    "https://www.instagram.com".to_string()
}

fn default_graphql_endpoint() -> String {
    "https://www.instagram.com/graphql/query/".to_string()
}

fn default_query_id() -> String {
    "17888483320059182".to_string()
}

fn default_page_size() -> u32 {
    12
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the effective download root.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}
