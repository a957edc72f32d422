//! Realtime feed retrieval.
//!
//! [`RealtimeClient`] issues one authenticated GET per call against the feed
//! endpoint. No retries; the transport's default timeouts apply.

pub mod auth;
mod basic;
mod client;
#[cfg(test)]
pub(crate) mod mock;

pub use basic::BasicClient;
pub use client::HttpClient;

use bytes::Bytes;
use reqwest::{Method, Request, Url};
use tracing::debug;

use crate::error::LatenessError;
use auth::ApiKey;

/// Transport for NSW realtime trip updates for Sydney Trains and NSW TrainLink.
pub const DEFAULT_FEED_URL: &str = "https://api.transport.nsw.gov.au/v1/gtfs/realtime/nswtrains";

/// Fetches the raw realtime feed from a fixed endpoint.
pub struct RealtimeClient<C> {
    http: C,
    url: Url,
}

impl<C: HttpClient> RealtimeClient<C> {
    pub fn new(http: C, url: Url) -> Self {
        Self { http, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetches the feed body, sending `credential` as `Authorization: apikey <credential>`.
    ///
    /// # Errors
    ///
    /// [`LatenessError::AuthMissing`] when `credential` is absent or empty, raised
    /// before any request is made. Otherwise the errors of [`fetch_bytes`].
    #[tracing::instrument(skip(self, credential), fields(url = %self.url))]
    pub async fn fetch_feed(&self, credential: Option<&str>) -> Result<Bytes, LatenessError> {
        let key = credential
            .filter(|key| !key.is_empty())
            .ok_or(LatenessError::AuthMissing)?;
        let client = ApiKey::apikey(&self.http, key)?;
        fetch_bytes(&client, self.url.clone()).await
    }
}

/// Issues a GET for `url` and returns the body of a 2xx response.
///
/// # Errors
///
/// [`LatenessError::Network`] on transport failure and
/// [`LatenessError::UpstreamStatus`] on any non-success status.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: Url) -> Result<Bytes, LatenessError> {
    let req = Request::new(Method::GET, url);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(LatenessError::UpstreamStatus {
            status: status.as_u16(),
        });
    }

    let body = resp.bytes().await?;
    debug!(bytes = body.len(), "Feed bytes received");
    Ok(body)
}
