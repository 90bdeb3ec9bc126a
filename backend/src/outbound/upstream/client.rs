//! Shared HTTP plumbing for upstream adapters.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::domain::Retrier;

/// Errors raised while constructing an upstream adapter.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamClientError {
    /// The reqwest client could not be built.
    #[error("failed to build upstream HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The base URL cannot have path segments appended (e.g. `mailto:`).
    #[error("upstream base URL cannot carry a path: {url}")]
    InvalidBaseUrl { url: String },
}

/// Client, base URL, timeout and retrier shared by one upstream adapter.
#[derive(Clone)]
pub struct UpstreamHttp {
    client: Client,
    base: Url,
    timeout: Duration,
    retrier: Retrier,
}

impl UpstreamHttp {
    /// Build plumbing for the upstream rooted at `base`.
    ///
    /// `timeout` bounds connecting and every single-shot request; streaming
    /// bodies are only bounded by the connect timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when `base` cannot carry path segments or the reqwest
    /// client cannot be constructed.
    pub fn new(base: Url, timeout: Duration, retrier: Retrier) -> Result<Self, UpstreamClientError> {
        if base.cannot_be_a_base() {
            return Err(UpstreamClientError::InvalidBaseUrl {
                url: base.to_string(),
            });
        }
        let client = Client::builder().connect_timeout(timeout).build()?;
        Ok(Self {
            client,
            base,
            timeout,
            retrier,
        })
    }

    pub(super) fn client(&self) -> &Client {
        &self.client
    }

    pub(super) fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(super) fn retrier(&self) -> &Retrier {
        &self.retrier
    }

    /// Base URL with `segments` appended as escaped path segments.
    pub(super) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
