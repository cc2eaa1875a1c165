//! reqwest-backed streaming transport.

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;

use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// Production [`HttpClient`] built on a reusable `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a transport with a default `reqwest::Client`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing `reqwest::Client` (custom TLS, proxies, timeouts).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// Map a reqwest failure, from sending or from reading the body, to an
/// [`HttpError`].
fn classify(err: reqwest::Error) -> HttpError {
    if err.is_connect() {
        HttpError::ConnectionFailed(err.to_string())
    } else if err.is_timeout() {
        HttpError::Timeout(err.to_string())
    } else if err.is_builder() {
        HttpError::InvalidUrl(err.to_string())
    } else if err.is_body() || err.is_decode() {
        HttpError::Io(err.to_string())
    } else {
        HttpError::Other(err.to_string())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        let mut request = self.client.post(url).body(body.to_string());
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(classify)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(HttpError::ServerError { status, message });
        }

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(classify));

        Ok(Box::pin(stream))
    }
}
