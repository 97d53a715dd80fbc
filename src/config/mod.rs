//! Configuration module for the insta-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Download and continuation modes
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{Config, NetworkConfig, OptionsConfig, UserConfig};
pub use modes::{ContinuationMode, DownloadMode};
pub use validation::{parse_post_url, validate_config};
