use crate::error::LatenessError;
use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};

/// An [`HttpClient`] wrapper that injects an API key as an HTTP header.
///
/// The header value is validated when the wrapper is built, so a bad key is
/// rejected before any request leaves the process.
pub struct ApiKey<C> {
    pub inner: C,
    header_name: HeaderName,
    value: HeaderValue,
}

impl<C> ApiKey<C> {
    /// Uses `Authorization: apikey <key>`, the scheme of the Transport for
    /// NSW open data API.
    pub fn apikey(inner: C, key: &str) -> Result<Self, LatenessError> {
        Self::with_header(inner, AUTHORIZATION, &format!("apikey {key}"))
    }

    /// Sends `value` verbatim in `header_name`.
    pub fn with_header(
        inner: C,
        header_name: HeaderName,
        value: &str,
    ) -> Result<Self, LatenessError> {
        let mut value =
            HeaderValue::from_str(value).map_err(|_| LatenessError::InvalidCredential)?;
        value.set_sensitive(true);
        Ok(Self {
            inner,
            header_name,
            value,
        })
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut()
            .insert(self.header_name.clone(), self.value.clone());
        self.inner.execute(req).await
    }
}
