//! Download target representation.

use crate::api::types::MediaNode;

/// Extension given to every saved file.
pub const FILE_EXTENSION: &str = "jpg";

/// Everything the downloader needs to save one media file.
///
/// Fields may be empty when the source lacked them; the downloader rejects
/// such targets instead of guessing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadTarget {
    /// Media URL to fetch.
    pub url: String,

    /// File name inside the owner directory.
    pub file_name: String,

    /// Owner id, used as the directory name.
    pub owner_id: String,
}

impl DownloadTarget {
    pub fn new(
        url: impl Into<String>,
        file_name: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            file_name: file_name.into(),
            owner_id: owner_id.into(),
        }
    }

    /// Build a target from a feed item: `display_url`, `<shortcode>.jpg` and
    /// the owner's id.
    pub fn from_node(node: &MediaNode) -> Self {
        Self {
            url: node.display_url.clone(),
            file_name: file_name_for(&node.shortcode),
            owner_id: node.owner.id.clone(),
        }
    }

    /// Whether any field is missing.
    pub fn is_incomplete(&self) -> bool {
        self.url.is_empty() || self.file_name.is_empty() || self.owner_id.is_empty()
    }
}

/// `<stem>.jpg`
pub fn file_name_for(stem: &str) -> String {
    format!("{}.{}", stem, FILE_EXTENSION)
}
