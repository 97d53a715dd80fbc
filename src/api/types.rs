//! Feed response type definitions.
//!
//! The profile endpoint wraps everything in `{"graphql": {"user": ...}}`, the
//! GraphQL continuation endpoint in `{"data": {"user": ...}}`; both decode into
//! [`FeedResponse`].
//!
//! Only `graphql`, `user`, `edge_owner_to_timeline_media`, `page_info` and
//! `has_next_page` are required. Everything else falls back to its zero value
//! when missing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::api::opaque::OpaqueValue;

/// Decode `null` as the type's default.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Root of a feed page.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeedResponse {
    #[serde(alias = "data")]
    pub graphql: FeedGraph,

    #[serde(default, deserialize_with = "null_default")]
    pub logging_page_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub show_follow_dialog: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub show_suggested_profiles: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub show_view_shop: bool,
    #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
    pub profile_pic_edit_sync_props: OpaqueValue,
    #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
    pub toast_content_on_load: OpaqueValue,
}

impl FeedResponse {
    /// The profile this page belongs to.
    pub fn user(&self) -> &User {
        &self.graphql.user
    }

    /// The paginated timeline collection.
    pub fn timeline(&self) -> &TimelineMedia {
        &self.graphql.user.edge_owner_to_timeline_media
    }

    /// Consume the response, keeping only the timeline.
    pub fn into_timeline(self) -> TimelineMedia {
        self.graphql.user.edge_owner_to_timeline_media
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeedGraph {
    pub user: User,
}

/// Profile aggregate fields.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    #[serde(default, deserialize_with = "null_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub biography: String,
    #[serde(default, deserialize_with = "null_default")]
    pub fbid: String,
    #[serde(default, deserialize_with = "null_default")]
    pub profile_pic_url: String,
    #[serde(default, deserialize_with = "null_default")]
    pub profile_pic_url_hd: String,

    #[serde(default, deserialize_with = "null_default")]
    pub blocked_by_viewer: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub country_block: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub followed_by_viewer: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub follows_viewer: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub has_ar_effects: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub has_blocked_viewer: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub has_channel: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub has_clips: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub has_guides: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub has_requested_viewer: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub is_business_account: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub is_joined_recently: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub is_private: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub is_verified: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub requested_by_viewer: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub should_show_category: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub highlight_reel_count: i64,

    #[serde(default, deserialize_with = "null_default")]
    pub edge_follow: CountEdge,
    #[serde(default, deserialize_with = "null_default")]
    pub edge_followed_by: CountEdge,

    // Shape varies between accounts.
    #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
    pub business_category_name: OpaqueValue,
    #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
    pub category_enum: OpaqueValue,
    #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
    pub category_name: OpaqueValue,
    #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
    pub overall_category_name: OpaqueValue,
    #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
    pub connected_fb_page: OpaqueValue,
    #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
    pub external_url: OpaqueValue,
    #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
    pub external_url_linkshimmed: OpaqueValue,
    #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
    pub restricted_by_viewer: OpaqueValue,

    #[serde(default, deserialize_with = "null_default")]
    pub edge_felix_video_timeline: OpaqueConnection,
    #[serde(default, deserialize_with = "null_default")]
    pub edge_media_collections: OpaqueConnection,
    #[serde(default, deserialize_with = "null_default")]
    pub edge_saved_media: OpaqueConnection,
    #[serde(default, deserialize_with = "null_default")]
    pub edge_mutual_followed_by: OpaqueConnection,
    #[serde(default, deserialize_with = "null_default")]
    pub edge_related_profiles: OpaqueConnection,

    pub edge_owner_to_timeline_media: TimelineMedia,
}

/// A `{"count": n}` wrapper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CountEdge {
    #[serde(default, deserialize_with = "null_default")]
    pub count: i64,
}

/// A collection that is carried along but not modelled.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OpaqueConnection {
    #[serde(default, deserialize_with = "null_default")]
    pub count: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub edges: Vec<OpaqueValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_info: Option<OpaquePageInfo>,
}

/// Page info of an [`OpaqueConnection`]; its cursor may be `null` or a string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OpaquePageInfo {
    #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
    pub end_cursor: OpaqueValue,
    #[serde(default, deserialize_with = "null_default")]
    pub has_next_page: bool,
}

/// The paginated media timeline.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TimelineMedia {
    #[serde(default, deserialize_with = "null_default")]
    pub count: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub edges: Vec<Edge<MediaNode>>,
    pub page_info: PageInfo,
}

impl TimelineMedia {
    /// Iterate the nodes in server order.
    pub fn nodes(&self) -> impl Iterator<Item = &MediaNode> {
        self.edges.iter().map(|edge| &edge.node)
    }
}

/// Continuation state of a page.
///
/// `end_cursor` is meaningless when `has_next_page` is `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageInfo {
    #[serde(default, deserialize_with = "null_default")]
    pub end_cursor: String,
    pub has_next_page: bool,
}

impl PageInfo {
    /// The cursor for the next page, if there is one.
    pub fn next_cursor(&self) -> Option<&str> {
        self.has_next_page.then_some(self.end_cursor.as_str())
    }
}

/// An edge/node pair.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Edge<T> {
    pub node: T,
}

/// One feed item.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MediaNode {
    #[serde(rename = "__typename", default, deserialize_with = "null_default")]
    pub typename: String,
    #[serde(default, deserialize_with = "null_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub shortcode: String,

    #[serde(default, deserialize_with = "null_default")]
    pub is_video: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub display_url: String,
    #[serde(default, deserialize_with = "null_default")]
    pub dimensions: Dimensions,
    #[serde(default, deserialize_with = "null_default")]
    pub thumbnail_src: String,
    #[serde(default, deserialize_with = "null_default")]
    pub thumbnail_resources: Vec<ThumbnailResource>,
    #[serde(default, deserialize_with = "null_default")]
    pub media_preview: String,
    #[serde(default, deserialize_with = "null_default")]
    pub accessibility_caption: String,
    #[serde(default, deserialize_with = "null_default")]
    pub comments_disabled: bool,

    #[serde(default, deserialize_with = "null_default")]
    pub edge_liked_by: CountEdge,
    #[serde(default, deserialize_with = "null_default")]
    pub edge_media_preview_like: CountEdge,
    #[serde(default, deserialize_with = "null_default")]
    pub edge_media_to_comment: CountEdge,
    #[serde(default, deserialize_with = "null_default")]
    pub edge_media_to_caption: CaptionConnection,
    #[serde(default, deserialize_with = "null_default")]
    pub edge_media_to_tagged_user: OpaqueConnection,

    #[serde(default, deserialize_with = "null_default")]
    pub owner: Owner,
    #[serde(default, deserialize_with = "null_default")]
    pub location: Location,
    #[serde(default, deserialize_with = "null_default")]
    pub taken_at_timestamp: i64,

    #[serde(default, deserialize_with = "null_default")]
    pub sharing_friction_info: SharingFrictionInfo,
    #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
    pub fact_check_information: OpaqueValue,
    #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
    pub fact_check_overall_rating: OpaqueValue,
    #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
    pub gating_info: OpaqueValue,
    #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
    pub media_overlay_info: OpaqueValue,
}

impl MediaNode {
    /// Like count, preferring `edge_liked_by` over the preview counter.
    pub fn like_count(&self) -> i64 {
        if self.edge_liked_by.count != 0 {
            self.edge_liked_by.count
        } else {
            self.edge_media_preview_like.count
        }
    }

    pub fn comment_count(&self) -> i64 {
        self.edge_media_to_comment.count
    }

    /// Caption fragments in order.
    pub fn caption_texts(&self) -> impl Iterator<Item = &str> {
        self.edge_media_to_caption
            .edges
            .iter()
            .map(|edge| edge.node.text.as_str())
    }

    /// All caption fragments joined by newlines; empty without a caption.
    pub fn caption(&self) -> String {
        self.caption_texts().collect::<Vec<_>>().join("\n")
    }

    /// `taken_at_timestamp` as a UTC time, if it is in range.
    pub fn taken_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.taken_at_timestamp, 0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Dimensions {
    #[serde(default, deserialize_with = "null_default")]
    pub height: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub width: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThumbnailResource {
    #[serde(default, deserialize_with = "null_default")]
    pub config_height: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub config_width: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub src: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CaptionConnection {
    #[serde(default, deserialize_with = "null_default")]
    pub edges: Vec<Edge<CaptionNode>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CaptionNode {
    #[serde(default, deserialize_with = "null_default")]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Owner {
    #[serde(default, deserialize_with = "null_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub username: String,
}

/// Tagged location; all fields are zero when the post has none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Location {
    #[serde(default, deserialize_with = "null_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_default")]
    pub has_public_page: bool,
}

impl Location {
    pub fn is_empty(&self) -> bool {
        *self == Location::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SharingFrictionInfo {
    #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
    pub bloks_app_url: OpaqueValue,
    #[serde(default, deserialize_with = "null_default")]
    pub should_have_sharing_friction: bool,
}
