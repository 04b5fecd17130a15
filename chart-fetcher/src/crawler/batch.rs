//! Batch orchestration.
//!
//! The orchestrator fetches the chart page, splits its table into rows and
//! runs one [`RowProcessor`] task and one [`RatingProcessor`] task per row.
//! Results are collected through [`OrderedTaskGroup`]s, so record `i` always
//! belongs to row `i` no matter which task finishes first.

use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, info};

use super::context::CrawlContext;
use super::row::{RatingOutcome, RatingProcessor, RowOutcome, RowProcessor};
use super::task_group::OrderedTaskGroup;
use crate::errors::{ChartError, Result};
use crate::fetch::ChartCategory;
use crate::models::{BatchReport, ChartBatch, ChartRecord};
use crate::observability::{count_by_kind, SpanTimer, Warning, WarningKind};

/// Runs a whole chart batch.
#[derive(Debug, Clone)]
pub struct BatchOrchestrator {
    ctx: CrawlContext,
    rows: RowProcessor,
    ratings: RatingProcessor,
}

impl BatchOrchestrator {
    /// Creates an orchestrator.
    #[must_use]
    pub fn new(ctx: CrawlContext) -> Self {
        Self {
            rows: RowProcessor::new(ctx.clone()),
            ratings: RatingProcessor::new(ctx.clone()),
            ctx,
        }
    }

    /// Fetches the chart page and returns its data row fragments.
    ///
    /// Any failure here is fatal: transport errors, error statuses and pages
    /// without a chart table.
    pub async fn fetch_rows(&self, chart_url: &str) -> Result<Vec<String>> {
        let page = self.ctx.fetcher().fetch(chart_url).await?.error_for_status()?;
        let table = self
            .ctx
            .markup()
            .chart_table(&page.text)
            .ok_or_else(|| ChartError::TableNotFound {
                url: chart_url.to_string(),
            })?;
        Ok(self
            .ctx
            .markup()
            .split_rows(table)
            .into_iter()
            .map(ToString::to_string)
            .collect())
    }

    /// Runs the batch for `chart_url`, keeping at most `requested` rows.
    pub async fn run(&self, chart_url: &str, requested: usize) -> Result<BatchReport> {
        let timer = SpanTimer::start("chart_batch");
        let fragments = self.fetch_rows(chart_url).await?;
        let available = fragments.len();

        let mut warnings = Vec::new();
        let count = if requested > available {
            warnings.push(Warning::batch(
                WarningKind::Clamped,
                format!("ALARM: Only {available} records available"),
            ));
            available
        } else {
            requested
        };
        info!(url = %chart_url, requested, available, count, "Processing chart rows");

        let (row_group, rating_group) = self.spawn_rows(fragments.into_iter().take(count));
        let (row_results, rating_results) =
            futures::join!(row_group.join_all(), rating_group.join_all());

        let mut records: ChartBatch = vec![ChartRecord::default(); count];
        let mut row_warnings: Vec<Vec<Warning>> = vec![Vec::new(); count];

        for (row, result) in row_results.into_iter().enumerate() {
            match result {
                Ok(outcome) => {
                    records[row] = ChartRecord::from_parts(outcome.title, outcome.detail, 0.0);
                    row_warnings[row].extend(outcome.warnings);
                }
                Err(e) => row_warnings[row].push(Warning::row(
                    row,
                    WarningKind::TaskJoin,
                    format!("Row task failed: {e}"),
                )),
            }
        }

        for (row, result) in rating_results.into_iter().enumerate() {
            match result {
                Ok(outcome) => {
                    records[row].rating = outcome.rating;
                    row_warnings[row].extend(outcome.warning);
                }
                Err(e) => row_warnings[row].push(Warning::row(
                    row,
                    WarningKind::TaskJoin,
                    format!("Rating task failed: {e}"),
                )),
            }
        }

        warnings.extend(row_warnings.into_iter().flatten());
        for (kind, count) in count_by_kind(&warnings) {
            info!(kind = %kind, count, "Batch warnings");
        }
        let duration_ms = timer.finish();
        debug!(records = records.len(), warnings = warnings.len(), duration_ms, "Batch complete");

        Ok(BatchReport {
            records,
            warnings,
            requested,
            available,
            duration_ms,
        })
    }

    /// Runs the batch for an allow-listed chart.
    pub async fn run_category(
        &self,
        category: ChartCategory,
        requested: usize,
    ) -> Result<BatchReport> {
        self.run(category.url(), requested).await
    }

    /// Runs the batch and serializes the records to a JSON array.
    pub async fn run_json(&self, chart_url: &str, requested: usize) -> Result<String> {
        let report = self.run(chart_url, requested).await?;
        Ok(report.to_json()?)
    }

    /// Runs [`BatchOrchestrator::run_json`] on its own task.
    ///
    /// The JSON text, or the fatal error, is delivered once through the
    /// returned receiver.
    pub fn spawn_json(
        self: Arc<Self>,
        chart_url: String,
        requested: usize,
    ) -> oneshot::Receiver<Result<String>> {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let result = self.run_json(&chart_url, requested).await;
            if tx.send(result).is_err() {
                debug!(url = %chart_url, "Batch receiver dropped");
            }
        });
        rx
    }

    fn spawn_rows(
        &self,
        fragments: impl ExactSizeIterator<Item = String>,
    ) -> (OrderedTaskGroup<RowOutcome>, OrderedTaskGroup<RatingOutcome>) {
        let mut row_group = OrderedTaskGroup::with_capacity(fragments.len());
        let mut rating_group = OrderedTaskGroup::with_capacity(fragments.len());

        for (row, fragment) in fragments.enumerate() {
            let fragment: Arc<str> = Arc::from(fragment);

            let rows = self.rows.clone();
            let row_fragment = Arc::clone(&fragment);
            row_group.spawn(async move { rows.process(row, &row_fragment).await });

            let ratings = self.ratings.clone();
            rating_group.spawn(async move { ratings.process(row, &fragment) });
        }

        (row_group, rating_group)
    }
}
