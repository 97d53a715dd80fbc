//! Insta Downloader - profile feed pagination and media downloads.
//!
//! This library provides functionality for paging through Instagram profile
//! feeds and saving post media to disk.
//!
//! # Features
//!
//! - Typed decoding of feed pages, keeping unmodelled fields for re-encoding
//! - Cursor pagination over the profile or GraphQL endpoint
//! - Media URL and owner extraction from post page metadata
//! - Streaming downloads into one directory per owner
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use insta_downloader::{collect_feed, Config, InstaApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     let api = InstaApi::new(&config.network)?;
//!
//!     let nodes = collect_feed(&api, "someone", config.options.continuation).await?;
//!     for node in &nodes {
//!         println!("{} {}", node.shortcode, node.display_url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod feed;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::InstaApi;
pub use config::{Config, ContinuationMode, DownloadMode};
pub use download::{
    download_feed, download_single_post, download_target, DownloadState, GlobalState,
};
pub use error::{DownloadError, Error, Result};
pub use feed::{collect_feed, decode_feed, next_page, FeedPage, FeedPaginator};
pub use media::{extract, DownloadTarget, ExtractionMiss};
