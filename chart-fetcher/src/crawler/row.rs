//! Per-row processors.
//!
//! Every chart row is handled by two independent units: a [`RowProcessor`]
//! for title, year and the crawled detail, and a [`RatingProcessor`] for the
//! rating. Neither can fail; problems are reported as warnings next to
//! zero-valued fields.

use tokio::sync::oneshot;

use super::context::CrawlContext;
use super::detail::{DetailCrawler, DetailOutcome};
use crate::extract::{parse_rating, parse_year};
use crate::models::{MovieDetail, TitleFields};
use crate::observability::{Warning, WarningKind};

/// Everything the row processor produced for one row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowOutcome {
    /// Title cell fields.
    pub title: TitleFields,
    /// Crawled detail.
    pub detail: MovieDetail,
    /// Soft failures, title cell first, then detail crawl.
    pub warnings: Vec<Warning>,
}

/// The rating of one row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingOutcome {
    /// Parsed rating, zero when unparsable.
    pub rating: f64,
    /// Set when the rating could not be read.
    pub warning: Option<Warning>,
}

/// Extracts title fields from a row and waits for the row's detail crawl.
#[derive(Debug, Clone)]
pub struct RowProcessor {
    ctx: CrawlContext,
    crawler: DetailCrawler,
}

impl RowProcessor {
    /// Creates a row processor.
    #[must_use]
    pub fn new(ctx: CrawlContext) -> Self {
        Self {
            crawler: DetailCrawler::new(ctx.clone()),
            ctx,
        }
    }

    /// Processes row `row`.
    ///
    /// The detail crawl starts as soon as the link is known and runs while the
    /// rest of the title cell is parsed. This call returns once the crawl has
    /// reported, or immediately with an empty detail when the row has no link.
    pub async fn process(&self, row: usize, fragment: &str) -> RowOutcome {
        let markup = self.ctx.markup().title_fields(fragment);
        let mut warnings = Vec::new();

        let detail_url = match markup.detail_href.as_deref() {
            Some(href) => match self.ctx.config().resolve(href) {
                Ok(url) => Some(url),
                Err(e) => {
                    warnings.push(Warning::row(row, WarningKind::TitleCell, e.to_string()));
                    None
                }
            },
            None => {
                warnings.push(Warning::row(
                    row,
                    WarningKind::TitleCell,
                    "No detail link in title cell",
                ));
                None
            }
        };

        // the crawl handle lives until this row finishes or is dropped
        let pending = detail_url.as_ref().map(|url| {
            let (tx, rx) = oneshot::channel();
            let crawl = self.crawler.spawn(row, url.clone(), tx);
            (rx, crawl)
        });

        let title = markup.title.unwrap_or_default();
        let release_year = match parse_year(markup.year_text.as_deref().unwrap_or_default()) {
            Ok(year) => year,
            Err(e) => {
                warnings.push(Warning::row(
                    row,
                    WarningKind::ReleaseYear,
                    format!("Could not obtain release year for {title:?}: {e}"),
                ));
                0
            }
        };

        let detail = match pending {
            Some((rx, _crawl)) => match rx.await {
                Ok(DetailOutcome {
                    detail,
                    warnings: crawl_warnings,
                }) => {
                    warnings.extend(crawl_warnings);
                    detail
                }
                Err(_) => {
                    warnings.push(Warning::row(
                        row,
                        WarningKind::TaskJoin,
                        "Detail crawler stopped without reporting",
                    ));
                    MovieDetail::default()
                }
            },
            None => MovieDetail::default(),
        };

        RowOutcome {
            title: TitleFields {
                title,
                release_year,
                detail_url,
            },
            detail,
            warnings,
        }
    }
}

/// Extracts the rating from a row.
#[derive(Debug, Clone)]
pub struct RatingProcessor {
    ctx: CrawlContext,
}

impl RatingProcessor {
    /// Creates a rating processor.
    #[must_use]
    pub const fn new(ctx: CrawlContext) -> Self {
        Self { ctx }
    }

    /// Processes row `row`.
    #[must_use]
    pub fn process(&self, row: usize, fragment: &str) -> RatingOutcome {
        let text = self.ctx.markup().rating_text(fragment).unwrap_or_default();
        match parse_rating(text) {
            Ok(rating) => RatingOutcome {
                rating,
                warning: None,
            },
            Err(e) => RatingOutcome {
                rating: 0.0,
                warning: Some(Warning::row(
                    row,
                    WarningKind::Rating,
                    format!("Could not obtain rating: {e}"),
                )),
            },
        }
    }
}
