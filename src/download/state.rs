//! Download state tracking.

/// Per-profile download state.
#[derive(Debug, Default)]
pub struct DownloadState {
    pub username: String,

    /// Owner id, learned from the first feed page.
    pub user_id: Option<String>,

    // Statistics
    pub pages_fetched: usize,
    pub items_seen: u64,
    pub pic_count: u64,
    pub vid_count: u64,
    pub failed_count: u64,
}

impl DownloadState {
    /// Create a new download state for a profile.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    pub fn increment_pic(&mut self) {
        self.pic_count += 1;
    }

    pub fn increment_vid(&mut self) {
        self.vid_count += 1;
    }

    pub fn increment_failed(&mut self) {
        self.failed_count += 1;
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.pic_count + self.vid_count
    }
}

/// Global statistics across all profiles.
#[derive(Debug, Default)]
pub struct GlobalState {
    pub items_seen: u64,
    pub pic_count: u64,
    pub vid_count: u64,
    pub failed_count: u64,
    pub users_processed: u64,
    pub users_failed: u64,
}

impl GlobalState {
    /// Add statistics from a profile's download state.
    pub fn add_user_stats(&mut self, state: &DownloadState) {
        self.items_seen += state.items_seen;
        self.pic_count += state.pic_count;
        self.vid_count += state.vid_count;
        self.failed_count += state.failed_count;
        self.users_processed += 1;
    }

    /// Mark a profile as failed.
    pub fn mark_user_failed(&mut self) {
        self.users_failed += 1;
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.pic_count + self.vid_count
    }
}
