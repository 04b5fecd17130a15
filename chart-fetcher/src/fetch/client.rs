//! `reqwest`-backed [`Fetcher`].

use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;
use tracing::debug;

use super::config::FetchConfig;
use super::protocols::{FetchResult, Fetcher};
use crate::errors::ChartError;

/// HTTP fetcher built on a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Builds a fetcher from the configuration.
    ///
    /// No request deadline is applied unless [`FetchConfig::timeout`] is set.
    pub fn new(config: &FetchConfig) -> Result<Self, ChartError> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ChartError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResult, ChartError> {
        let start = Instant::now();
        debug!(url = %url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ChartError::transport(url, e.to_string()))?;
        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();
        let text = response
            .text()
            .await
            .map_err(|e| ChartError::transport(url, e.to_string()))?;

        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(url = %url, status = status_code, bytes = text.len(), duration_ms, "GET complete");

        Ok(FetchResult {
            status_code,
            text,
            final_url,
            duration_ms,
        })
    }
}
