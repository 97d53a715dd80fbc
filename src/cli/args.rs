//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, ContinuationMode, DownloadMode};

/// Instagram profile feed and post downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "insta-downloader",
    version,
    about = "Download media from Instagram profile feeds and posts",
    long_about = "A CLI tool that pages through public profile feeds and saves each item's image,\n\
                  or saves the image of a single post, into one directory per owner."
)]
pub struct Args {
    /// Profile handle(s) whose feed to download.
    /// Can specify multiple users separated by spaces.
    #[arg(short, long, value_delimiter = ' ', num_args = 1..)]
    pub user: Option<Vec<String>>,

    /// Root directory; one sub-directory per owner is created below it.
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Browser user agent string.
    #[arg(short = 'a', long = "user-agent", env = "INSTA_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Download mode.
    #[arg(long, value_enum)]
    pub mode: Option<DownloadModeArg>,

    /// Post URL or shortcode for single post download (requires --mode single).
    #[arg(long)]
    pub post: Option<String>,

    /// Endpoint used for feed pages after the first.
    #[arg(long, value_enum)]
    pub continuation: Option<ContinuationArg>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// List feed items instead of downloading them.
    #[arg(long)]
    pub list_only: bool,

    /// Hide download progress information.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI download mode argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DownloadModeArg {
    /// Page through each user's feed.
    Feed,
    /// Download a single post.
    Single,
}

impl From<DownloadModeArg> for DownloadMode {
    fn from(arg: DownloadModeArg) -> Self {
        match arg {
            DownloadModeArg::Feed => DownloadMode::Feed,
            DownloadModeArg::Single => DownloadMode::Single,
        }
    }
}

/// CLI continuation argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ContinuationArg {
    /// Re-query the profile endpoint with the cursor.
    Profile,
    /// Query the GraphQL endpoint with the owner id and cursor.
    Graphql,
}

impl From<ContinuationArg> for ContinuationMode {
    fn from(arg: ContinuationArg) -> Self {
        match arg {
            ContinuationArg::Profile => ContinuationMode::Profile,
            ContinuationArg::Graphql => ContinuationMode::GraphQl,
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(users) = self.user {
            config.targeted_user.usernames = users
                .into_iter()
                .filter(|user| !user.trim().is_empty())
                .collect();
        }

        if let Some(user_agent) = self.user_agent {
            config.network.user_agent = user_agent;
        }

        if let Some(dir) = self.download_directory {
            config.options.download_directory = Some(dir);
        }

        if let Some(mode) = self.mode {
            config.options.download_mode = mode.into();
        }

        if let Some(post) = self.post {
            config.options.post_url = Some(post);
        }

        if let Some(continuation) = self.continuation {
            config.options.continuation = continuation.into();
        }

        // Boolean flags (only override if set to non-default)
        if self.list_only {
            config.options.download_feed_media = false;
        }

        if self.quiet {
            config.options.show_downloads = false;
        }
    }
}
