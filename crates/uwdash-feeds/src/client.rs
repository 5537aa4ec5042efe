//! Remote Client: authenticated GET requests against the source APIs.
//!
//! Status codes other than 2xx and transport failures are surfaced as errors;
//! nothing is retried.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::FeedError;

/// HTTP client shared by every adapter in a process.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
}

/// Connect timeout used by [`RemoteClient::new`].
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

impl RemoteClient {
    /// Creates a client with the given per-request timeout and `User-Agent`,
    /// connecting within [`DEFAULT_CONNECT_TIMEOUT_SECS`].
    ///
    /// # Errors
    ///
    /// See [`RemoteClient::with_connect_timeout`].
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FeedError> {
        Self::with_connect_timeout(timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS, user_agent)
    }

    /// Creates a client with explicit request and connect timeouts.
    ///
    /// A `timeout_secs` of `0` leaves the request timeout unset; a
    /// `connect_timeout_secs` of `0` leaves the connect timeout unset.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_connect_timeout(
        timeout_secs: u64,
        connect_timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, FeedError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if connect_timeout_secs > 0 {
            builder = builder.connect_timeout(Duration::from_secs(connect_timeout_secs));
        }
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Fetches `url` with `headers` and returns the unparsed body.
    ///
    /// # Errors
    ///
    /// - [`FeedError::UnexpectedStatus`] for any non-2xx response.
    /// - [`FeedError::Http`] on network or TLS failure.
    pub async fn fetch(&self, url: &str, headers: &HeaderMap) -> Result<String, FeedError> {
        tracing::debug!(url = %url, "fetching");
        let response = self
            .client
            .get(url)
            .headers(headers.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "remote returned error status");
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    /// Fetches `url` and decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Everything [`RemoteClient::fetch`] returns, plus
    /// [`FeedError::Deserialize`] when the body does not match `T`.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: &HeaderMap,
    ) -> Result<T, FeedError> {
        let body = self.fetch(url, headers).await?;
        decode(url, &body)
    }
}

/// Decodes a JSON body, naming `context` in the error.
///
/// # Errors
///
/// Returns [`FeedError::Deserialize`] when `body` does not match `T`.
pub fn decode<T: DeserializeOwned>(context: &str, body: &str) -> Result<T, FeedError> {
    serde_json::from_str(body).map_err(|e| FeedError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}
