//! Instagram HTTP client.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::{self, HeaderMap, HeaderValue};
use url::Url;

use crate::api::transport::{HttpResponse, HttpTransport, ReqwestTransport, TransportError};
use crate::config::NetworkConfig;
use crate::error::{Error, Result};

/// Client for the profile feed, GraphQL continuation, post pages and media.
///
/// The transport is injected, so the client itself holds no global state.
pub struct InstaApi {
    transport: Arc<dyn HttpTransport>,
    user_agent: HeaderValue,
    profile_base: Url,
    graphql_endpoint: Url,
    query_id: String,
    page_size: u32,
}

impl InstaApi {
    /// Create a client backed by reqwest.
    pub fn new(network: &NetworkConfig) -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        Self::with_transport(Arc::new(transport), network)
    }

    /// Create a client on top of an existing transport.
    pub fn with_transport(
        transport: Arc<dyn HttpTransport>,
        network: &NetworkConfig,
    ) -> Result<Self> {
        let user_agent = HeaderValue::from_str(&network.user_agent).map_err(|e| {
            Error::ConfigValidation {
                field: "user_agent".to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            transport,
            user_agent,
            profile_base: Url::parse(&network.profile_base)?,
            graphql_endpoint: Url::parse(&network.graphql_endpoint)?,
            query_id: network.query_id.clone(),
            page_size: network.page_size,
        })
    }

    /// Base URL that profile and post paths hang off.
    pub fn profile_base(&self) -> &Url {
        &self.profile_base
    }

    /// Build `<profile_base>/<handle>/channel/?__a=1[&after=<cursor>]`.
    pub fn feed_url(&self, handle: &str, cursor: Option<&str>) -> Result<Url> {
        let mut url = self.profile_base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("Cannot use {} as a base", self.profile_base)))?
            .pop_if_empty()
            .extend([handle, "channel", ""]);

        {
            let mut query = url.query_pairs_mut();
            query.clear().append_pair("__a", "1");
            if let Some(cursor) = cursor {
                query.append_pair("after", cursor);
            }
        }

        Ok(url)
    }

    /// Build the GraphQL continuation URL for a user id.
    pub fn graphql_feed_url(&self, user_id: &str, cursor: Option<&str>) -> Result<Url> {
        let mut variables = serde_json::json!({
            "id": user_id,
            "first": self.page_size,
        });
        if let Some(cursor) = cursor {
            variables["after"] = cursor.into();
        }

        let mut url = self.graphql_endpoint.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("query_id", &self.query_id)
            .append_pair("variables", &serde_json::to_string(&variables)?);

        Ok(url)
    }

    /// Headers sent with every request.
    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, self.user_agent.clone());
        headers
    }

    /// Send a GET without looking at the status.
    async fn send(&self, url: &Url) -> std::result::Result<HttpResponse, TransportError> {
        tracing::debug!("GET {}", url);
        let response = self.transport.get(url, self.build_headers()).await?;
        tracing::debug!("Response status: {}", response.status());
        Ok(response)
    }

    /// Send a GET and read the body, failing on a non-2xx status.
    async fn get_bytes(&self, url: &Url) -> Result<Bytes> {
        let response = self.send(url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        tracing::debug!("Response length: {} bytes", body.len());
        Ok(body)
    }

    /// Fetch one raw page of a profile's feed.
    pub async fn fetch_feed_page(&self, handle: &str, cursor: Option<&str>) -> Result<Bytes> {
        let url = self.feed_url(handle, cursor)?;
        self.get_bytes(&url).await
    }

    /// Fetch one raw page through the GraphQL continuation endpoint.
    pub async fn fetch_graphql_page(&self, user_id: &str, cursor: Option<&str>) -> Result<Bytes> {
        let url = self.graphql_feed_url(user_id, cursor)?;
        self.get_bytes(&url).await
    }

    /// Fetch the markup of a single post page.
    pub async fn get_post_page(&self, post_url: &Url) -> Result<Bytes> {
        self.get_bytes(post_url).await
    }

    /// Open a media URL for streaming. The status is left to the caller.
    pub async fn get_media(&self, url: &Url) -> std::result::Result<HttpResponse, TransportError> {
        self.send(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::fake::FakeTransport;
    use reqwest::StatusCode;

    fn make_api(transport: Arc<FakeTransport>) -> InstaApi {
        InstaApi::with_transport(transport, &NetworkConfig::default()).unwrap()
    }

    #[test]
    fn test_feed_url_first_page() {
        let api = make_api(Arc::new(FakeTransport::new()));
        let url = api.feed_url("some.user", None).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.instagram.com/some.user/channel/?__a=1"
        );
    }

    #[test]
    fn test_feed_url_carries_cursor_encoded() {
        let api = make_api(Arc::new(FakeTransport::new()));
        let url = api.feed_url("some.user", Some("QVFD==&x")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.instagram.com/some.user/channel/?__a=1&after=QVFD%3D%3D%26x"
        );
    }

    #[test]
    fn test_graphql_feed_url() {
        let api = make_api(Arc::new(FakeTransport::new()));

        let first = api.graphql_feed_url("375193502", None).unwrap();
        let pairs: Vec<(String, String)> = first.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("query_id".into(), "17888483320059182".into()));
        assert_eq!(pairs[1].1, r#"{"id":"375193502","first":12}"#);

        let next = api.graphql_feed_url("375193502", Some("END")).unwrap();
        let pairs: Vec<(String, String)> = next.query_pairs().into_owned().collect();
        assert_eq!(pairs[1].1, r#"{"id":"375193502","first":12,"after":"END"}"#);
    }

    #[tokio::test]
    async fn test_fetch_sets_user_agent() {
        let transport = Arc::new(FakeTransport::new());
        transport.route("https://www.instagram.com/u/channel/?__a=1", 200, "{}");
        let api = make_api(transport.clone());

        let body = api.fetch_feed_page("u", None).await.unwrap();
        assert_eq!(body, Bytes::from("{}"));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let user_agent = requests[0].1.get(header::USER_AGENT).unwrap();
        assert_eq!(
            user_agent.to_str().unwrap(),
            NetworkConfig::default().user_agent
        );
    }

    #[tokio::test]
    async fn test_non_success_is_fetch_error() {
        let transport = Arc::new(FakeTransport::new());
        transport.route("https://www.instagram.com/u/channel/?__a=1", 429, "slow down");
        let api = make_api(transport);

        match api.fetch_feed_page("u", None).await {
            Err(Error::Fetch { status, url }) => {
                assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
                assert!(url.contains("/u/channel/"));
            }
            other => panic!("expected fetch error, got {:?}", other.map(|b| b.len())),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let transport = Arc::new(FakeTransport::new());
        transport.fail("https://www.instagram.com/u/channel/?__a=1", "refused");
        let api = make_api(transport);

        assert!(matches!(
            api.fetch_feed_page("u", None).await,
            Err(Error::Transport(_))
        ));
    }
}
