//! Feed decoding and pagination.

pub mod decode;
pub mod paginator;

pub use decode::decode_feed;
pub use paginator::{collect_feed, next_page, FeedPage, FeedPaginator};
