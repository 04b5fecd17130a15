//! Detail page crawler.
//!
//! Fetches a title's detail page and extracts summary, duration and genre.
//! When the summary on that page is truncated and links to the full text, a
//! second fetch runs as its own task and is joined before the detail is
//! reported. Fetch failures never escape: they become a [`Warning`] and the
//! fields that depended on the failed page stay empty.

use tokio::sync::oneshot;
use tracing::debug;

use super::context::CrawlContext;
use super::task_group::ScopedTask;
use crate::models::MovieDetail;
use crate::observability::{Warning, WarningKind};

/// The crawled detail together with the soft failures met on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailOutcome {
    /// The assembled detail, zero-valued where fetches failed.
    pub detail: MovieDetail,
    /// Soft failures.
    pub warnings: Vec<Warning>,
}

/// Outcome of the optional full-summary fetch.
struct FullSummary {
    summary: String,
    warning: Option<Warning>,
}

/// Crawls detail pages.
#[derive(Debug, Clone)]
pub struct DetailCrawler {
    ctx: CrawlContext,
}

impl DetailCrawler {
    /// Creates a crawler.
    #[must_use]
    pub const fn new(ctx: CrawlContext) -> Self {
        Self { ctx }
    }

    /// Starts crawling `url` on its own task.
    ///
    /// The outcome is sent through `reply` exactly once. If the receiver is
    /// gone the outcome is discarded. Dropping the returned handle aborts the
    /// crawl, including its full-summary fetch.
    pub fn spawn(
        &self,
        row: usize,
        url: String,
        reply: oneshot::Sender<DetailOutcome>,
    ) -> ScopedTask<()> {
        let crawler = self.clone();
        ScopedTask::spawn(async move {
            let outcome = crawler.crawl(row, &url).await;
            if reply.send(outcome).is_err() {
                debug!(row, url = %url, "Detail receiver dropped");
            }
        })
    }

    /// Crawls `url` and returns the detail for chart row `row`.
    pub async fn crawl(&self, row: usize, url: &str) -> DetailOutcome {
        let mut warnings = Vec::new();

        let page = match self.ctx.fetcher().fetch(url).await {
            Ok(result) => {
                if !result.is_success() {
                    warnings.push(Warning::row(
                        row,
                        WarningKind::DetailFetch,
                        format!(
                            "Cannot process response from {url}. Response code: {}",
                            result.status_code
                        ),
                    ));
                }
                result.text
            }
            Err(e) => {
                warnings.push(Warning::row(
                    row,
                    WarningKind::DetailFetch,
                    format!("Failed to fetch more info: {e}"),
                ));
                return DetailOutcome {
                    detail: MovieDetail::default(),
                    warnings,
                };
            }
        };

        let markup = self.ctx.markup().detail_fields(&page);
        let full_summary = markup
            .more_href
            .as_deref()
            .map(|href| self.spawn_full_summary(row, href));

        let mut detail = MovieDetail {
            summary: markup.summary,
            duration: markup.duration,
            genre: markup.genre,
        };

        if let Some(handle) = full_summary {
            match handle.await {
                Ok(full) => {
                    detail.summary = full.summary;
                    warnings.extend(full.warning);
                }
                Err(e) => {
                    detail.summary.clear();
                    warnings.push(Warning::row(
                        row,
                        WarningKind::TaskJoin,
                        format!("Full summary task failed: {e}"),
                    ));
                }
            }
        }

        debug!(row, url = %url, "Detail crawled");
        DetailOutcome { detail, warnings }
    }

    fn spawn_full_summary(&self, row: usize, href: &str) -> ScopedTask<FullSummary> {
        let ctx = self.ctx.clone();
        let href = href.to_string();
        ScopedTask::spawn(async move {
            let url = match ctx.config().resolve(&href) {
                Ok(url) => url,
                Err(e) => {
                    return FullSummary {
                        summary: String::new(),
                        warning: Some(Warning::row(row, WarningKind::SummaryFetch, e.to_string())),
                    };
                }
            };

            match ctx.fetcher().fetch(&url).await {
                Ok(result) => {
                    let warning = (!result.is_success()).then(|| {
                        Warning::row(
                            row,
                            WarningKind::SummaryFetch,
                            format!(
                                "Cannot process response from {url}. Response code: {}",
                                result.status_code
                            ),
                        )
                    });
                    FullSummary {
                        summary: ctx.markup().full_summary(&result.text).unwrap_or_default(),
                        warning,
                    }
                }
                Err(e) => FullSummary {
                    summary: String::new(),
                    warning: Some(Warning::row(
                        row,
                        WarningKind::SummaryFetch,
                        format!("Failed to fetch full summary: {e}"),
                    )),
                },
            }
        })
    }
}
