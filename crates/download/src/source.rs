//! Remote source trait and the HTTP implementation.

use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use tracing::instrument;

/// Unified interface for fetching remote resources.
///
/// One method, one GET: fetch a URL, check the status, hand back the body.
/// Failure statuses are raised immediately, before the body is consumed, so
/// no caller ever processes an error page as payload.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch `url` and return the full response body.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Network`] if the request could not be completed
    /// - [`ErrorKind::Status`] if the response carries a non-success status
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP(S) source backed by a shared [`reqwest::Client`].
///
/// Redirect chains are followed transparently by the client, which matters
/// for download endpoints that bounce through a mirror resolver before
/// serving bytes. Timeouts are whatever the client defaults to; there is no
/// retry and no partial-download resumption.
#[derive(Clone, Debug, Default)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }
}

#[async_trait]
impl RemoteSource for HttpSource {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| ErrorKind::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::Status { status: status.as_u16(), url: url.to_string() });
        }

        let body = response.bytes().await.map_err(|err| ErrorKind::Network(err.to_string()))?;
        tracing::debug!(bytes = body.len(), "response body received");
        Ok(body.to_vec())
    }
}
