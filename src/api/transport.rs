//! HTTP transport seam.
//!
//! [`InstaApi`](crate::api::InstaApi) never talks to reqwest directly; it goes
//! through [`HttpTransport`] so tests can substitute a fake.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

/// Connection-level failure (DNS, TLS, reset, body read).
#[derive(Error, Debug)]
pub enum TransportError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

/// Most bytes reserved up front from a response's `Content-Length`.
const MAX_PREALLOCATION: u64 = 1 << 20;

/// Streamed response body.
pub type ByteStream = BoxStream<'static, std::result::Result<Bytes, TransportError>>;

/// A response whose body has not been read yet.
pub struct HttpResponse {
    status: StatusCode,
    content_length: Option<u64>,
    body: ByteStream,
}

impl HttpResponse {
    pub fn new(status: StatusCode, content_length: Option<u64>, body: ByteStream) -> Self {
        Self {
            status,
            content_length,
            body,
        }
    }

    /// Build a response from a fully buffered body.
    pub fn from_bytes(status: StatusCode, body: impl Into<Bytes>) -> Self {
        let body: Bytes = body.into();
        let len = body.len() as u64;
        let body = stream::once(async move { Ok::<_, TransportError>(body) }).boxed();
        Self::new(status, Some(len), body)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Take the body as a stream of chunks.
    pub fn into_stream(self) -> ByteStream {
        self.body
    }

    /// Read the whole body into memory.
    pub async fn bytes(self) -> std::result::Result<Bytes, TransportError> {
        // The header is only a hint; the body decides the final size.
        let reserve = self.content_length.unwrap_or(0).min(MAX_PREALLOCATION);
        let mut buf = BytesMut::with_capacity(reserve as usize);
        let mut body = self.body;
        while let Some(chunk) = body.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }
}

/// Something that can perform a GET request.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(
        &self,
        url: &Url,
        headers: HeaderMap,
    ) -> std::result::Result<HttpResponse, TransportError>;
}

/// The production transport backed by [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> std::result::Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &Url,
        headers: HeaderMap,
    ) -> std::result::Result<HttpResponse, TransportError> {
        let response = self.client.get(url.clone()).headers(headers).send().await?;

        let status = response.status();
        let content_length = response.content_length();
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(TransportError::from))
            .boxed();

        Ok(HttpResponse::new(status, content_length, body))
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory transport for tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// A canned reply.
    #[derive(Clone)]
    pub enum Reply {
        Body(StatusCode, Bytes),
        Fail(String),
    }

    /// Serves canned replies keyed by the full request URL and records every
    /// request it sees.
    #[derive(Default)]
    pub struct FakeTransport {
        routes: Mutex<HashMap<String, Reply>>,
        requests: Mutex<Vec<(String, HeaderMap)>>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn route(&self, url: impl Into<String>, status: u16, body: impl Into<Bytes>) {
            let status = StatusCode::from_u16(status).expect("invalid status");
            self.routes
                .lock()
                .unwrap()
                .insert(url.into(), Reply::Body(status, body.into()));
        }

        pub fn fail(&self, url: impl Into<String>, message: &str) {
            self.routes
                .lock()
                .unwrap()
                .insert(url.into(), Reply::Fail(message.to_string()));
        }

        /// URLs requested so far, in order.
        pub fn requested_urls(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|(url, _)| url.clone())
                .collect()
        }

        pub fn requests(&self) -> Vec<(String, HeaderMap)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for FakeTransport {
        async fn get(
            &self,
            url: &Url,
            headers: HeaderMap,
        ) -> std::result::Result<HttpResponse, TransportError> {
            self.requests
                .lock()
                .unwrap()
                .push((url.to_string(), headers));

            let reply = self.routes.lock().unwrap().get(url.as_str()).cloned();
            match reply {
                Some(Reply::Body(status, body)) => Ok(HttpResponse::from_bytes(status, body)),
                Some(Reply::Fail(message)) => Err(TransportError::Other(message)),
                None => Ok(HttpResponse::from_bytes(StatusCode::NOT_FOUND, Bytes::new())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_buffered_response_reads_back() {
        let response = HttpResponse::from_bytes(StatusCode::OK, "hello");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.content_length(), Some(5));
        assert_eq!(response.bytes().await.unwrap(), Bytes::from("hello"));
    }

    #[tokio::test]
    async fn test_chunked_response_is_concatenated() {
        let chunks: Vec<std::result::Result<Bytes, TransportError>> =
            vec![Ok(Bytes::from("ab")), Ok(Bytes::from("cd"))];
        let response = HttpResponse::new(StatusCode::OK, None, stream::iter(chunks).boxed());
        assert_eq!(response.bytes().await.unwrap(), Bytes::from("abcd"));
    }

    #[tokio::test]
    async fn test_oversized_content_length_is_not_trusted() {
        let chunks: Vec<std::result::Result<Bytes, TransportError>> = vec![Ok(Bytes::from("x"))];
        let response =
            HttpResponse::new(StatusCode::OK, Some(u64::MAX), stream::iter(chunks).boxed());
        assert_eq!(response.bytes().await.unwrap(), Bytes::from("x"));
    }

    #[tokio::test]
    async fn test_chunk_error_surfaces() {
        let chunks: Vec<std::result::Result<Bytes, TransportError>> = vec![
            Ok(Bytes::from("ab")),
            Err(TransportError::Other("reset".into())),
        ];
        let response = HttpResponse::new(StatusCode::OK, None, stream::iter(chunks).boxed());
        assert!(matches!(
            response.bytes().await,
            Err(TransportError::Other(m)) if m == "reset"
        ));
    }
}
