//! Canned-response source for testing.

use crate::error::{ErrorKind, Result};
use crate::source::RemoteSource;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

enum Response {
    Body(Vec<u8>),
    Status(u16),
}

/// Canned-response source for testing.
///
/// URLs map to fixed responses; anything unregistered answers HTTP 404, like
/// a real server would. Every requested URL is recorded so tests can assert
/// that a failed step short-circuits the rest of the pipeline.
///
/// # Examples
///
/// ```
/// use capfetch_download::{MockSource, RemoteSource};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = MockSource::with_responses([
///     ("https://example.test/releases/", "<a href=\"2.1/\">2.1/</a>"),
/// ]);
/// let body = source.fetch("https://example.test/releases/").await?;
/// assert!(body.starts_with(b"<a"));
/// assert!(source.fetch("https://example.test/other").await.is_err());
/// assert_eq!(source.requests().len(), 2);
/// # Ok(())
/// # }
/// ```
pub struct MockSource {
    responses: HashMap<String, Response>,
    requests: Mutex<Vec<String>>,
}

impl MockSource {
    /// Create a mock source pre-populated with successful responses.
    pub fn with_responses(
        responses: impl IntoIterator<Item = (impl Into<String>, impl Into<Vec<u8>>)>,
    ) -> Self {
        let responses = responses
            .into_iter()
            .map(|(url, body)| (url.into(), Response::Body(body.into())))
            .collect();
        Self { responses, requests: Mutex::new(Vec::new()) }
    }

    /// Register a failure status for a URL.
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses.insert(url.into(), Response::Status(status));
        self
    }

    /// Every URL fetched so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockSource {
    fn default() -> Self {
        let responses: [(&str, &[u8]); 0] = [];
        Self::with_responses(responses)
    }
}

#[async_trait]
impl RemoteSource for MockSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.responses.get(url) {
            Some(Response::Body(body)) => Ok(body.clone()),
            Some(Response::Status(status)) => {
                exn::bail!(ErrorKind::Status { status: *status, url: url.to_string() })
            }
            None => exn::bail!(ErrorKind::Status { status: 404, url: url.to_string() }),
        }
    }
}
