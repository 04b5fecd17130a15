//! Prints a JSON array of movies from one of the supported IMDb charts.
//!
//! Usage: `imdb_chart_fetcher <chart_url> <items_count>`

use anyhow::{Context, Result};
use chart_fetcher::crawler::{BatchOrchestrator, CrawlContext};
use chart_fetcher::errors::ChartError;
use chart_fetcher::fetch::{ChartCategory, FetchConfig};
use chart_fetcher::observability::init_logging;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;

/// Fetch a ranked IMDb chart with summary, duration and genre for each movie.
#[derive(Debug, Parser)]
#[command(name = "imdb_chart_fetcher", version)]
struct Cli {
    /// Chart URL; must be one of the supported top-rated Indian charts.
    chart_url: String,

    /// Number of movies to fetch.
    #[arg(allow_negative_numbers = true)]
    items_count: i64,

    /// Per-request timeout in seconds (no timeout by default).
    #[arg(long)]
    timeout_secs: Option<f64>,

    /// Maximum number of requests in flight (unbounded by default).
    #[arg(long)]
    max_concurrency: Option<usize>,

    /// User agent sent with every request.
    #[arg(long)]
    user_agent: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn category(&self) -> Result<ChartCategory, ChartError> {
        self.chart_url.parse()
    }

    fn requested(&self) -> Result<usize, ChartError> {
        usize::try_from(self.items_count)
            .map_err(|_| ChartError::InvalidCount(self.items_count.to_string()))
    }

    fn fetch_config(&self) -> Result<FetchConfig, ChartError> {
        let mut config = FetchConfig::default();
        if let Some(seconds) = self.timeout_secs {
            config = config.with_timeout(seconds);
            if config.timeout().is_none() {
                return Err(ChartError::InvalidArgument(format!(
                    "--timeout-secs {seconds} is not a usable duration"
                )));
            }
        }
        if let Some(limit) = self.max_concurrency {
            config = config.with_max_concurrency(limit);
        }
        if let Some(ref user_agent) = self.user_agent {
            config = config.with_user_agent(user_agent.clone());
        }
        Ok(config)
    }
}

async fn run(cli: &Cli) -> Result<String> {
    let category = cli.category()?;
    let requested = cli.requested()?;

    let ctx = CrawlContext::from_config(cli.fetch_config()?)?;
    let orchestrator = Arc::new(BatchOrchestrator::new(ctx));
    let json = orchestrator
        .spawn_json(category.url().to_string(), requested)
        .await
        .map_err(|_| ChartError::ChannelClosed)?
        .with_context(|| format!("Unable to fetch chart {category}"))?;
    Ok(json)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    match run(&cli).await {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("ERROR: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAMIL: &str = "https://www.imdb.com/india/top-rated-tamil-movies";

    #[test]
    fn test_parse_positional_arguments() {
        let cli = Cli::try_parse_from(["imdb_chart_fetcher", TAMIL, "5"]).unwrap();
        assert_eq!(cli.category().unwrap(), ChartCategory::Tamil);
        assert_eq!(cli.requested().unwrap(), 5);
        assert_eq!(cli.fetch_config().unwrap(), FetchConfig::default());
    }

    #[test]
    fn test_missing_count_rejected() {
        assert!(Cli::try_parse_from(["imdb_chart_fetcher", TAMIL]).is_err());
        assert!(Cli::try_parse_from(["imdb_chart_fetcher"]).is_err());
    }

    #[test]
    fn test_non_integer_count_rejected() {
        assert!(Cli::try_parse_from(["imdb_chart_fetcher", TAMIL, "ten"]).is_err());
    }

    #[test]
    fn test_negative_count_rejected() {
        let cli = Cli::try_parse_from(["imdb_chart_fetcher", TAMIL, "-3"]).unwrap();
        assert!(matches!(cli.requested(), Err(ChartError::InvalidCount(_))));
    }

    #[test]
    fn test_unlisted_url_rejected() {
        let cli =
            Cli::try_parse_from(["imdb_chart_fetcher", "https://www.imdb.com/chart/top", "5"])
                .unwrap();
        assert!(matches!(cli.category(), Err(ChartError::UnlistedUrl(_))));
    }

    #[tokio::test]
    async fn test_unlisted_url_fails_before_any_request() {
        let cli = Cli::try_parse_from(["imdb_chart_fetcher", "https://example.com/", "5"]).unwrap();
        let err = run(&cli).await.unwrap_err();
        assert!(err.to_string().contains("not a supported chart"));
    }

    #[test]
    fn test_optional_flags() {
        let cli = Cli::try_parse_from([
            "imdb_chart_fetcher",
            TAMIL,
            "3",
            "--timeout-secs",
            "7.5",
            "--max-concurrency",
            "4",
            "--user-agent",
            "tester",
        ])
        .unwrap();
        let config = cli.fetch_config().unwrap();
        assert_eq!(config.timeout_seconds, Some(7.5));
        assert_eq!(config.max_concurrency, Some(4));
        assert_eq!(config.user_agent, "tester");
    }

    #[test]
    fn test_unusable_timeout_rejected() {
        for value in ["1e20", "0", "NaN"] {
            let cli = Cli::try_parse_from([
                "imdb_chart_fetcher",
                TAMIL,
                "3",
                "--timeout-secs",
                value,
            ])
            .unwrap();
            assert!(
                matches!(cli.fetch_config(), Err(ChartError::InvalidArgument(_))),
                "{value} accepted"
            );
        }
    }

    #[tokio::test]
    async fn test_huge_timeout_fails_cleanly() {
        let cli = Cli::try_parse_from([
            "imdb_chart_fetcher",
            TAMIL,
            "5",
            "--timeout-secs",
            "1e20",
        ])
        .unwrap();
        let err = run(&cli).await.unwrap_err();
        assert!(err.to_string().contains("--timeout-secs"));
    }
}
