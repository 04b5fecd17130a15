//! In-memory fetcher for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::errors::ChartError;
use crate::fetch::{FetchResult, Fetcher};

#[derive(Debug, Clone)]
struct MockPage {
    status_code: u16,
    body: String,
    delay: Option<Duration>,
}

/// A [`Fetcher`] serving canned pages.
///
/// Unknown URLs answer `404` with an empty body. URLs registered with
/// [`MockFetcher::fail`] produce a transport error, whether or not a page
/// was also registered.
#[derive(Debug, Default)]
pub struct MockFetcher {
    pages: Mutex<HashMap<String, MockPage>>,
    failures: Mutex<HashSet<String>>,
    requested: Mutex<Vec<String>>,
    call_count: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockFetcher {
    /// Creates an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` with status 200 for `url`.
    pub fn add_page(&self, url: impl Into<String>, body: impl Into<String>) {
        self.insert(url.into(), 200, body.into(), None);
    }

    /// Serves `body` with status 200 for `url` after `delay`.
    pub fn add_page_with_delay(
        &self,
        url: impl Into<String>,
        body: impl Into<String>,
        delay: Duration,
    ) {
        self.insert(url.into(), 200, body.into(), Some(delay));
    }

    /// Serves `body` with `status` for `url`.
    pub fn add_status(&self, url: impl Into<String>, status: u16, body: impl Into<String>) {
        self.insert(url.into(), status, body.into(), None);
    }

    /// Makes every request to `url` fail without a response.
    pub fn fail(&self, url: impl Into<String>) {
        self.failures.lock().insert(url.into());
    }

    /// Returns the number of fetches performed.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Returns the highest number of fetches that overlapped.
    #[must_use]
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Returns the requested URLs in request order.
    #[must_use]
    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().clone()
    }

    fn insert(&self, url: String, status_code: u16, body: String, delay: Option<Duration>) {
        self.pages.lock().insert(
            url,
            MockPage {
                status_code,
                body,
                delay,
            },
        );
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResult, ChartError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().push(url.to_string());
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let failing = self.failures.lock().contains(url);
        let page = self.pages.lock().get(url).cloned();

        // at least one yield so concurrent callers overlap
        match page.as_ref().and_then(|p| p.delay) {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if failing {
            return Err(ChartError::transport(url, "connection refused"));
        }

        let page = page.unwrap_or(MockPage {
            status_code: 404,
            body: String::new(),
            delay: None,
        });
        Ok(FetchResult {
            status_code: page.status_code,
            text: page.body,
            final_url: url.to_string(),
            duration_ms: page.delay.map_or(0.0, |d| d.as_secs_f64() * 1000.0),
        })
    }
}
