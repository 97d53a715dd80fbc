//! Download and pagination mode definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available download modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadMode {
    /// Page through each user's feed (default).
    #[default]
    Feed,
    /// Download a single post by URL.
    Single,
}

impl fmt::Display for DownloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadMode::Feed => write!(f, "feed"),
            DownloadMode::Single => write!(f, "single"),
        }
    }
}

impl FromStr for DownloadMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feed" => Ok(DownloadMode::Feed),
            "single" => Ok(DownloadMode::Single),
            _ => Err(format!("Unknown download mode: {}", s)),
        }
    }
}

/// Which endpoint serves pages after the first one.
///
/// The first page always comes from the profile endpoint, since it is the only
/// one that takes a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContinuationMode {
    /// Re-query the profile endpoint with an `after` cursor.
    #[default]
    Profile,
    /// Query the GraphQL endpoint with the owner's id and cursor.
    GraphQl,
}

impl fmt::Display for ContinuationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContinuationMode::Profile => write!(f, "profile"),
            ContinuationMode::GraphQl => write!(f, "graphql"),
        }
    }
}
