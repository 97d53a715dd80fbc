//! Post page metadata extraction.

use std::fmt;

use scraper::{Html, Selector};
use url::Url;

use crate::media::item::{file_name_for, DownloadTarget};

/// Meta properties read from a post page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaProperty {
    /// `og:image`, the media URL.
    Image,
    /// `og:url`; only its presence matters.
    Url,
    /// `instapp:owner_user_id`, the owner id.
    OwnerUserId,
}

impl MetaProperty {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetaProperty::Image => "og:image",
            MetaProperty::Url => "og:url",
            MetaProperty::OwnerUserId => "instapp:owner_user_id",
        }
    }
}

impl fmt::Display for MetaProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A meta element the page did not carry. The matching field is left empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No {property} meta element on {post_url}")]
pub struct ExtractionMiss {
    pub property: MetaProperty,
    pub post_url: String,
}

/// Content of the last `<meta property="{property}">` in the page.
///
/// A matching element without a `content` attribute yields an empty string.
fn lookup_meta(html: &Html, property: MetaProperty) -> Option<&str> {
    let selector = Selector::parse(&format!("meta[property=\"{}\"]", property)).ok()?;
    html.select(&selector)
        .last()
        .map(|element| element.value().attr("content").unwrap_or(""))
}

/// Last non-empty path segment of the post URL, plus `.jpg`.
///
/// A URL without any path segment yields `.jpg`.
pub fn file_name_from_post_url(post_url: &Url) -> String {
    let stem = post_url
        .path_segments()
        .and_then(|segments| segments.filter(|segment| !segment.is_empty()).last())
        .unwrap_or("");
    file_name_for(stem)
}

/// Extract a download target from post markup, returning the misses as well.
pub fn extract_with_misses(post_url: &Url, markup: &[u8]) -> (DownloadTarget, Vec<ExtractionMiss>) {
    let html = Html::parse_document(&String::from_utf8_lossy(markup));
    let mut target = DownloadTarget::default();
    let mut misses = Vec::new();

    let miss = |property: MetaProperty| ExtractionMiss {
        property,
        post_url: post_url.to_string(),
    };

    match lookup_meta(&html, MetaProperty::Image) {
        Some(content) => target.url = content.to_string(),
        None => misses.push(miss(MetaProperty::Image)),
    }

    match lookup_meta(&html, MetaProperty::Url) {
        Some(_) => target.file_name = file_name_from_post_url(post_url),
        None => misses.push(miss(MetaProperty::Url)),
    }

    match lookup_meta(&html, MetaProperty::OwnerUserId) {
        Some(content) => target.owner_id = content.to_string(),
        None => misses.push(miss(MetaProperty::OwnerUserId)),
    }

    (target, misses)
}

/// Extract the media URL, file name and owner id from a post page.
///
/// Missing meta elements leave their field empty and are logged; they are
/// never an error here.
pub fn extract(post_url: &Url, markup: &[u8]) -> DownloadTarget {
    let (target, misses) = extract_with_misses(post_url, markup);
    for miss in &misses {
        tracing::warn!("{}", miss);
    }

    tracing::debug!(
        "Extracted {} -> {} (owner {})",
        target.url,
        target.file_name,
        target.owner_id
    );
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST_PAGE: &str = include_str!("../../test_data/post_page.html");

    fn post_url() -> Url {
        Url::parse("https://site.example/p/ABC123/").unwrap()
    }

    fn page(metas: &str) -> String {
        format!(
            "<!DOCTYPE html><html><head>{}</head><body></body></html>",
            metas
        )
    }

    #[test]
    fn test_extract_all_fields() {
        let markup = page(
            r#"<meta property="og:image" content="https://cdn.example/x.jpg">
               <meta property="og:url" content="https://site.example/p/ABC123/">
               <meta property="instapp:owner_user_id" content="375193502">"#,
        );

        let (target, misses) = extract_with_misses(&post_url(), markup.as_bytes());
        assert_eq!(target.url, "https://cdn.example/x.jpg");
        assert_eq!(target.file_name, "ABC123.jpg");
        assert_eq!(target.owner_id, "375193502");
        assert!(misses.is_empty());
    }

    #[test]
    fn test_extract_fixture_page() {
        let url = Url::parse("https://www.instagram.com/p/CIlZpXKFfNt/").unwrap();
        let target = extract(&url, POST_PAGE.as_bytes());
        assert_eq!(
            target,
            DownloadTarget::new(
                "https://scontent.cdninstagram.com/v/t51.2885-15/e35/130000001_n.jpg?_nc_ht=scontent.cdninstagram.com&oh=abc",
                "CIlZpXKFfNt.jpg",
                "375193502",
            )
        );
    }

    #[test]
    fn test_missing_owner_is_a_miss() {
        let markup = page(
            r#"<meta property="og:image" content="https://cdn.example/x.jpg">
               <meta property="og:url" content="https://site.example/p/ABC123/">"#,
        );

        let (target, misses) = extract_with_misses(&post_url(), markup.as_bytes());
        assert_eq!(target.owner_id, "");
        assert_eq!(target.url, "https://cdn.example/x.jpg");
        assert_eq!(misses.len(), 1);
        assert_eq!(misses[0].property, MetaProperty::OwnerUserId);
    }

    #[test]
    fn test_empty_page_misses_everything() {
        let (target, misses) = extract_with_misses(&post_url(), b"");
        assert_eq!(target, DownloadTarget::default());
        let properties: Vec<_> = misses.iter().map(|miss| miss.property).collect();
        assert_eq!(
            properties,
            [
                MetaProperty::Image,
                MetaProperty::Url,
                MetaProperty::OwnerUserId
            ]
        );
    }

    #[test]
    fn test_og_url_value_is_ignored() {
        let markup = page(r#"<meta property="og:url" content="https://other.example/p/ZZZ/">"#);
        let target = extract(&post_url(), markup.as_bytes());
        assert_eq!(target.file_name, "ABC123.jpg");
    }

    #[test]
    fn test_last_occurrence_wins() {
        let markup = page(
            r#"<meta property="og:image" content="https://cdn.example/first.jpg">
               <meta property="og:image" content="https://cdn.example/second.jpg">
               <meta property="instapp:owner_user_id" content="1">
               <meta property="instapp:owner_user_id" content="2">"#,
        );

        let target = extract(&post_url(), markup.as_bytes());
        assert_eq!(target.url, "https://cdn.example/second.jpg");
        assert_eq!(target.owner_id, "2");
    }

    #[test]
    fn test_meta_without_content() {
        let markup = page(r#"<meta property="og:image">"#);
        let (target, misses) = extract_with_misses(&post_url(), markup.as_bytes());
        assert_eq!(target.url, "");
        assert!(!misses.iter().any(|miss| miss.property == MetaProperty::Image));
    }

    #[test]
    fn test_file_name_from_post_url() {
        let name = |url: &str| file_name_from_post_url(&Url::parse(url).unwrap());
        assert_eq!(name("https://site.example/p/ABC123/"), "ABC123.jpg");
        assert_eq!(name("https://site.example/p/ABC123"), "ABC123.jpg");
        assert_eq!(name("https://site.example/p/ABC123/?utm=x"), "ABC123.jpg");
        assert_eq!(name("https://site.example/"), ".jpg");
    }
}
