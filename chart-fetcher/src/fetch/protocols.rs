//! Protocol traits for fetching.
//!
//! The crawler only ever talks to a [`Fetcher`], which keeps network access
//! pluggable: the binary uses [`ReqwestFetcher`](super::ReqwestFetcher) while
//! tests substitute in-memory pages.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::ChartError;

/// Result of a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// HTTP status code.
    pub status_code: u16,
    /// Response body as text.
    pub text: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// Time taken to fetch in milliseconds.
    pub duration_ms: f64,
}

impl FetchResult {
    /// Whether the fetch was successful (2xx status).
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Converts a non-2xx response into [`ChartError::Status`].
    pub fn error_for_status(self) -> Result<Self, ChartError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ChartError::Status {
                url: self.final_url,
                status: self.status_code,
            })
        }
    }
}

/// Protocol for HTTP fetching.
///
/// Implementations return `Ok` for every response that arrived, whatever its
/// status; `Err` is reserved for requests that produced no response.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches a URL and returns the result.
    async fn fetch(&self, url: &str) -> Result<FetchResult, ChartError>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Arc<F> {
    async fn fetch(&self, url: &str) -> Result<FetchResult, ChartError> {
        (**self).fetch(url).await
    }
}
