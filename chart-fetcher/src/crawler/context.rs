//! Shared handles passed to every crawl task.

use std::fmt;
use std::sync::Arc;

use crate::errors::ChartError;
use crate::extract::{ImdbMarkup, MarkupStrategy};
use crate::fetch::{FetchConfig, Fetcher, LimitedFetcher, ReqwestFetcher};

/// Fetcher, markup strategy and configuration shared by all tasks of a batch.
///
/// Cloning is cheap; every task owns its own clone.
#[derive(Clone)]
pub struct CrawlContext {
    fetcher: Arc<dyn Fetcher>,
    markup: Arc<dyn MarkupStrategy>,
    config: Arc<FetchConfig>,
}

impl CrawlContext {
    /// Creates a context around `fetcher` using the IMDb markup.
    ///
    /// When [`FetchConfig::max_concurrency`] is set, the fetcher is wrapped in a
    /// [`LimitedFetcher`].
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>, config: FetchConfig) -> Self {
        let fetcher: Arc<dyn Fetcher> = match config.max_concurrency {
            Some(limit) => Arc::new(LimitedFetcher::new(fetcher, limit)),
            None => fetcher,
        };
        Self {
            fetcher,
            markup: Arc::new(ImdbMarkup::new()),
            config: Arc::new(config),
        }
    }

    /// Creates a context backed by a real HTTP client.
    pub fn from_config(config: FetchConfig) -> Result<Self, ChartError> {
        let fetcher = ReqwestFetcher::new(&config)?;
        Ok(Self::new(Arc::new(fetcher), config))
    }

    /// Replaces the markup strategy.
    #[must_use]
    pub fn with_markup(mut self, markup: Arc<dyn MarkupStrategy>) -> Self {
        self.markup = markup;
        self
    }

    /// The fetcher.
    #[must_use]
    pub fn fetcher(&self) -> &dyn Fetcher {
        self.fetcher.as_ref()
    }

    /// The markup strategy.
    #[must_use]
    pub fn markup(&self) -> &dyn MarkupStrategy {
        self.markup.as_ref()
    }

    /// The fetch configuration.
    #[must_use]
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

impl fmt::Debug for CrawlContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrawlContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
