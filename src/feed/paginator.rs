//! Cursor-driven feed pagination.

use crate::api::types::{FeedResponse, MediaNode};
use crate::api::InstaApi;
use crate::config::ContinuationMode;
use crate::error::Result;
use crate::feed::decode::decode_feed;

/// One decoded page of a feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPage {
    /// Items in server order.
    pub nodes: Vec<MediaNode>,

    /// Cursor for the next page; `None` once the server reports no more pages.
    pub next_cursor: Option<String>,

    /// Total item count reported by the server.
    pub total_count: i64,

    /// Owner id, when the payload carries it.
    pub user_id: String,
}

impl From<FeedResponse> for FeedPage {
    fn from(response: FeedResponse) -> Self {
        let user_id = response.user().id.clone();
        let timeline = response.into_timeline();
        let next_cursor = timeline.page_info.next_cursor().map(str::to_string);

        Self {
            nodes: timeline.edges.into_iter().map(|edge| edge.node).collect(),
            next_cursor,
            total_count: timeline.count,
            user_id,
        }
    }
}

/// Fetch and decode one page of a profile's feed.
pub async fn next_page(api: &InstaApi, handle: &str, cursor: Option<&str>) -> Result<FeedPage> {
    let bytes = api.fetch_feed_page(handle, cursor).await?;
    Ok(decode_feed(&bytes)?.into())
}

/// Walks a feed page by page, carrying the cursor forward.
///
/// Stops when the server reports no further page, when the accumulated item
/// count reaches the reported total, or when the server hands back the cursor
/// it was just given. Any error ends the walk.
pub struct FeedPaginator<'a> {
    api: &'a InstaApi,
    handle: String,
    mode: ContinuationMode,
    cursor: Option<String>,
    user_id: Option<String>,
    pages_fetched: usize,
    nodes_fetched: usize,
    finished: bool,
}

impl<'a> FeedPaginator<'a> {
    pub fn new(api: &'a InstaApi, handle: &str, mode: ContinuationMode) -> Self {
        Self {
            api,
            handle: handle.to_string(),
            mode,
            cursor: None,
            user_id: None,
            pages_fetched: 0,
            nodes_fetched: 0,
            finished: false,
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn nodes_fetched(&self) -> usize {
        self.nodes_fetched
    }

    /// Owner id learned from the first page.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    async fn fetch(&self) -> Result<FeedPage> {
        let cursor = self.cursor.as_deref();

        match (self.mode, cursor, self.user_id.as_deref()) {
            (ContinuationMode::GraphQl, Some(cursor), Some(user_id)) => {
                tracing::debug!("Fetching continuation page for user id {}", user_id);
                let bytes = self.api.fetch_graphql_page(user_id, Some(cursor)).await?;
                Ok(decode_feed(&bytes)?.into())
            }
            _ => next_page(self.api, &self.handle, cursor).await,
        }
    }

    /// Fetch the next batch of items, or `None` when the feed is exhausted.
    pub async fn next_batch(&mut self) -> Result<Option<Vec<MediaNode>>> {
        if self.finished {
            return Ok(None);
        }

        let page = match self.fetch().await {
            Ok(page) => page,
            Err(e) => {
                self.finished = true;
                return Err(e);
            }
        };

        self.pages_fetched += 1;
        self.nodes_fetched += page.nodes.len();

        if self.user_id.is_none() && !page.user_id.is_empty() {
            self.user_id = Some(page.user_id.clone());
        }

        tracing::debug!(
            "Page {} of {}: {} items ({} of {} so far)",
            self.pages_fetched,
            self.handle,
            page.nodes.len(),
            self.nodes_fetched,
            page.total_count
        );

        match page.next_cursor {
            None => {
                self.finished = true;
            }
            // A missing or zero count says nothing about the feed's size.
            Some(_) if page.total_count > 0 && self.nodes_fetched as i64 >= page.total_count => {
                tracing::debug!(
                    "Reached reported count of {} for {}, stopping",
                    page.total_count,
                    self.handle
                );
                self.finished = true;
            }
            Some(next) if self.cursor.as_deref() == Some(next.as_str()) => {
                tracing::warn!(
                    "Server repeated cursor {} for {}, stopping pagination",
                    next,
                    self.handle
                );
                self.finished = true;
            }
            Some(next) => {
                self.cursor = Some(next);
            }
        }

        Ok(Some(page.nodes))
    }
}

/// Collect every item of a feed. Fails without a partial result if any page
/// fails.
pub async fn collect_feed(
    api: &InstaApi,
    handle: &str,
    mode: ContinuationMode,
) -> Result<Vec<MediaNode>> {
    let mut paginator = FeedPaginator::new(api, handle, mode);
    let mut nodes = Vec::new();

    while let Some(batch) = paginator.next_batch().await? {
        nodes.extend(batch);
    }

    Ok(nodes)
}
