//! Download module for content downloading.
//!
//! This module provides:
//! - Download state tracking
//! - Feed downloading
//! - Single post downloading
//! - Media file downloading

pub mod feed;
pub mod media;
pub mod single;
pub mod state;

pub use feed::download_feed;
pub use media::download_target;
pub use single::download_single_post;
pub use state::{DownloadState, GlobalState};
