//! # chart-fetcher
//!
//! Fetches a ranked movie chart and enriches every entry concurrently.
//!
//! For each chart row the crate runs:
//!
//! - **Row processing**: title, release year and detail link from the row
//! - **Rating processing**: the row's rating, side by side with the above
//! - **Detail crawling**: summary, duration and genre from the linked page,
//!   following a "full summary" link when the summary is truncated
//!
//! Records come back in chart order regardless of which request finishes
//! first, and a failed row only degrades its own fields.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chart_fetcher::prelude::*;
//!
//! let ctx = CrawlContext::from_config(FetchConfig::default())?;
//! let report = BatchOrchestrator::new(ctx)
//!     .run_category(ChartCategory::Tamil, 10)
//!     .await?;
//! println!("{}", report.to_json()?);
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod crawler;
pub mod errors;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod observability;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::crawler::{BatchOrchestrator, CrawlContext, DetailCrawler};
    pub use crate::errors::{ChartError, FieldError};
    pub use crate::extract::{ImdbMarkup, MarkupStrategy};
    pub use crate::fetch::{ChartCategory, FetchConfig, Fetcher, ReqwestFetcher};
    pub use crate::models::{BatchReport, ChartBatch, ChartRecord, MovieDetail};
    pub use crate::observability::{Warning, WarningKind};
}
