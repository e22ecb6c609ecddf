//! HTTP access to remote datasets
//!
//! The refresh controller only needs two calls: a cheap probe that returns
//! the current freshness token (ETag) and a streaming fetch of the body.
//! Both are behind [`HttpSource`] so the controller can be driven by an
//! in-memory source in tests.

use crate::config::HttpConfig;
use crate::constants::FRESHNESS_TOKEN_HEADER;
use crate::{Error, Result};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::debug;

/// A boxed, sendable stream
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Response body delivered chunk by chunk
pub type BodyStream = BoxStream<'static, Result<Bytes>>;

/// Outcome of a freshness probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    /// HTTP status code
    pub status: u16,

    /// Freshness token reported by the endpoint, if any
    pub freshness_token: Option<String>,
}

impl ProbeResponse {
    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        is_success(self.status)
    }
}

/// Outcome of a full fetch, with the body still unread
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,

    /// Freshness token reported with the body, if any
    pub freshness_token: Option<String>,

    /// Streaming body
    pub body: BodyStream,
}

impl FetchResponse {
    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        is_success(self.status)
    }
}

impl fmt::Debug for FetchResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchResponse")
            .field("status", &self.status)
            .field("freshness_token", &self.freshness_token)
            .finish_non_exhaustive()
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Asynchronous access to a remote dataset
///
/// Implementations report non-2xx statuses in the response rather than as
/// errors; only connection-level failures are `Err(Error::Transport)`.
///
/// # Implementations
/// - [`ReqwestSource`]: production implementation using `reqwest`
/// - In-memory sources in tests
pub trait HttpSource: Send + Sync {
    /// Ask for the current freshness token without transferring the body
    fn probe(&self, url: &str) -> impl Future<Output = Result<ProbeResponse>> + Send;

    /// Start a full transfer and hand back the body as a stream
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchResponse>> + Send;
}

/// Production [`HttpSource`] backed by a shared `reqwest` client
///
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestSource {
    client: reqwest::Client,
}

impl ReqwestSource {
    /// Build a client with the configured timeouts and user agent
    ///
    /// # Errors
    /// * Returns `Error::Configuration` if the client cannot be built
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::configuration(format!("Unable to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpSource for ReqwestSource {
    async fn probe(&self, url: &str) -> Result<ProbeResponse> {
        let response = self.client.head(url).send().await?;
        let status = response.status().as_u16();
        let freshness_token = freshness_token(response.headers());

        debug!("HEAD {} -> {} (token {:?})", url, status, freshness_token);

        Ok(ProbeResponse {
            status,
            freshness_token,
        })
    }

    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let freshness_token = freshness_token(response.headers());

        debug!("GET {} -> {} (token {:?})", url, status, freshness_token);

        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(Error::from));

        Ok(FetchResponse {
            status,
            freshness_token,
            body: Box::pin(body),
        })
    }
}

/// Non-blank freshness token header, if present
fn freshness_token(headers: &reqwest::header::HeaderMap) -> Option<String> {
    headers
        .get(FRESHNESS_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
