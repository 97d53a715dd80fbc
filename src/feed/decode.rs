//! Decoding raw feed pages.

use crate::api::types::FeedResponse;
use crate::error::{Error, Result};

/// Decode a raw feed page.
///
/// On failure the error names the path of the offending field, e.g.
/// `graphql.user.edge_owner_to_timeline_media.page_info` when `page_info` is
/// missing.
pub fn decode_feed(bytes: &[u8]) -> Result<FeedResponse> {
    let deserializer = &mut serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(deserializer).map_err(|err| {
        let path = err.path().to_string();
        let inner = err.into_inner();
        let message = inner.to_string();
        Error::Decode {
            field_path: field_path(&path, &message),
            message,
        }
    })
}

/// Join the failing path with the name of a missing field, if any.
///
/// serde reports a missing field at the path of the struct that lacks it, so
/// the field name is appended to point at the field itself.
fn field_path(path: &str, message: &str) -> String {
    let missing = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next());

    match (path, missing) {
        (".", Some(field)) => field.to_string(),
        (path, Some(field)) => format!("{}.{}", path, field),
        (path, None) => path.to_string(),
    }
}
