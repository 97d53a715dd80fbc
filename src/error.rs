//! Error types for the insta-downloader application.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::api::transport::TransportError;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Feed errors
    #[error("HTTP {status} from {url}")]
    Fetch { url: String, status: StatusCode },

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to decode '{field_path}': {message}")]
    Decode { field_path: String, message: String },

    // Download errors
    #[error("Download failed: {0}")]
    Download(#[from] DownloadError),

    // File system errors
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Reasons a single media download can fail.
///
/// Every variant carries enough context to diagnose the failure without
/// retrying.
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("media url is empty")]
    MissingUrl,

    #[error("invalid media url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("invalid destination: {0}")]
    InvalidDestination(String),

    #[error("failed to reach {url}: {source}")]
    Transport { url: String, source: TransportError },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: StatusCode },

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create file {}: {source}", path.display())]
    CreateFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read body of {url}: {source}")]
    Stream { url: String, source: TransportError },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
    pub const SOME_USERS_FAILED: i32 = 6;
}
