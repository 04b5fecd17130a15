//! Configuration types for chart fetching.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ChartError;

/// Site root used to resolve relative links found in chart markup.
pub const IMDB_BASE_URL: &str = "https://www.imdb.com";

/// The chart pages this tool is allowed to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartCategory {
    /// Top rated Indian movies.
    Indian,
    /// Top rated Tamil movies.
    Tamil,
    /// Top rated Telugu movies.
    Telugu,
}

impl ChartCategory {
    /// All supported categories.
    pub const ALL: [Self; 3] = [Self::Indian, Self::Tamil, Self::Telugu];

    /// The chart page URL for this category.
    #[must_use]
    pub const fn url(self) -> &'static str {
        match self {
            Self::Indian => "https://www.imdb.com/india/top-rated-indian-movies",
            Self::Tamil => "https://www.imdb.com/india/top-rated-tamil-movies",
            Self::Telugu => "https://www.imdb.com/india/top-rated-telugu-movies",
        }
    }

    /// Looks up the category whose URL is exactly `url`.
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.url() == url)
    }
}

impl fmt::Display for ChartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url())
    }
}

impl FromStr for ChartCategory {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_url(s).ok_or_else(|| ChartError::UnlistedUrl(s.to_string()))
    }
}

/// Configuration for HTTP fetching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Site root for resolving relative links.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout in seconds. `None` waits indefinitely.
    #[serde(default)]
    pub timeout_seconds: Option<f64>,
    /// Maximum number of requests in flight. `None` is unbounded.
    #[serde(default)]
    pub max_concurrency: Option<usize>,
    /// Maximum number of redirects to follow.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

fn default_base_url() -> String {
    IMDB_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    concat!("chart-fetcher/", env!("CARGO_PKG_VERSION")).to_string()
}

const fn default_max_redirects() -> usize {
    10
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: None,
            max_concurrency: None,
            max_redirects: default_max_redirects(),
        }
    }
}

impl FetchConfig {
    /// Creates a new fetch configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL used for relative links.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets a per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Caps the number of concurrent requests.
    #[must_use]
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = Some(limit);
        self
    }

    /// Gets the timeout as a Duration, if one is set, positive and representable.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|secs| *secs > 0.0)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    /// Resolves a site-relative link against [`FetchConfig::base_url`].
    pub fn resolve(&self, href: &str) -> Result<String, ChartError> {
        let base = url::Url::parse(&self.base_url).map_err(|e| ChartError::UrlResolution {
            base: self.base_url.clone(),
            path: href.to_string(),
            message: e.to_string(),
        })?;
        base.join(href)
            .map(String::from)
            .map_err(|e| ChartError::UrlResolution {
                base: self.base_url.clone(),
                path: href.to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_category_round_trip_through_url() {
        for category in ChartCategory::ALL {
            assert_eq!(ChartCategory::from_url(category.url()), Some(category));
        }
    }

    #[test]
    fn test_unlisted_url_rejected() {
        assert_eq!(ChartCategory::from_url("https://www.imdb.com/chart/top"), None);
        assert_eq!(
            ChartCategory::from_url("https://www.imdb.com/india/top-rated-indian-movies/"),
            None
        );
        let err = "https://example.com".parse::<ChartCategory>().unwrap_err();
        assert!(matches!(err, ChartError::UnlistedUrl(url) if url == "https://example.com"));
    }

    #[test]
    fn test_fetch_config_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.base_url, IMDB_BASE_URL);
        assert!(config.user_agent.starts_with("chart-fetcher/"));
        assert_eq!(config.timeout(), None);
        assert_eq!(config.max_concurrency, None);
    }

    #[test]
    fn test_fetch_config_builders() {
        let config = FetchConfig::new()
            .with_timeout(2.5)
            .with_max_concurrency(4)
            .with_user_agent("test-agent");
        assert_eq!(config.timeout(), Some(Duration::from_millis(2500)));
        assert_eq!(config.max_concurrency, Some(4));
        assert_eq!(config.user_agent, "test-agent");

        assert_eq!(FetchConfig::new().with_timeout(0.0).timeout(), None);
    }

    #[test]
    fn test_unrepresentable_timeout_is_ignored() {
        assert_eq!(FetchConfig::new().with_timeout(1e20).timeout(), None);
        assert_eq!(FetchConfig::new().with_timeout(f64::NAN).timeout(), None);
        assert_eq!(FetchConfig::new().with_timeout(f64::INFINITY).timeout(), None);
        assert_eq!(FetchConfig::new().with_timeout(-1.0).timeout(), None);
    }

    #[test]
    fn test_fetch_config_deserialize_partial() {
        let config: FetchConfig = serde_json::from_str(r#"{"max_concurrency": 8}"#).unwrap();
        assert_eq!(config.max_concurrency, Some(8));
        assert_eq!(config.base_url, IMDB_BASE_URL);
        assert_eq!(config.max_redirects, 10);
    }

    #[test]
    fn test_resolve_relative_link() {
        let config = FetchConfig::default();
        assert_eq!(
            config.resolve("/title/tt0066763/").unwrap(),
            "https://www.imdb.com/title/tt0066763/"
        );
        assert_eq!(
            config.resolve("https://other.example/x").unwrap(),
            "https://other.example/x"
        );
    }

    #[test]
    fn test_resolve_bad_base() {
        let config = FetchConfig::default().with_base_url("not a url");
        assert!(matches!(
            config.resolve("/x"),
            Err(ChartError::UrlResolution { .. })
        ));
    }
}
