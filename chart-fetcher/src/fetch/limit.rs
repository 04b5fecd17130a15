//! Concurrency gate for fetchers.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Semaphore;

use super::protocols::{FetchResult, Fetcher};
use crate::errors::ChartError;

/// Wraps a [`Fetcher`] so that at most `limit` requests are in flight.
///
/// Requests beyond the limit wait for a permit; none are rejected.
#[derive(Debug)]
pub struct LimitedFetcher<F> {
    inner: F,
    semaphore: Arc<Semaphore>,
    limit: usize,
}

impl<F: Fetcher> LimitedFetcher<F> {
    /// Wraps `inner` with a limit of `limit` concurrent requests (at least 1).
    #[must_use]
    pub fn new(inner: F, limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            inner,
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    /// Returns the configured limit.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of permits currently free.
    #[must_use]
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

#[async_trait]
impl<F: Fetcher> Fetcher for LimitedFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<FetchResult, ChartError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| ChartError::transport(url, format!("Semaphore error: {e}")))?;
        self.inner.fetch(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;
    use std::time::Duration;

    #[test]
    fn test_limit_is_at_least_one() {
        let fetcher = LimitedFetcher::new(MockFetcher::new(), 0);
        assert_eq!(fetcher.limit(), 1);
        assert_eq!(fetcher.available(), 1);
    }

    #[tokio::test]
    async fn test_limited_fetcher_caps_in_flight_requests() {
        let mock = Arc::new(MockFetcher::new());
        for i in 0..6 {
            mock.add_page_with_delay(
                format!("https://example.com/{i}"),
                "<html></html>",
                Duration::from_millis(20),
            );
        }
        let fetcher = Arc::new(LimitedFetcher::new(Arc::clone(&mock), 2));

        let handles: Vec<_> = (0..6)
            .map(|i| {
                let fetcher = Arc::clone(&fetcher);
                tokio::spawn(async move { fetcher.fetch(&format!("https://example.com/{i}")).await })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        assert_eq!(mock.call_count(), 6);
        assert!(mock.max_in_flight() <= 2);
        assert_eq!(fetcher.available(), 2);
    }
}
