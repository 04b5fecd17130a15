//! The concurrent enrichment pipeline.
//!
//! Control flow, root first:
//! - [`BatchOrchestrator`] splits the chart into rows and fans out per row
//! - [`RowProcessor`] and [`RatingProcessor`] run side by side for each row
//! - [`DetailCrawler`] runs under each row processor, with an optional second
//!   fetch for the full summary

mod batch;
mod context;
mod detail;
mod row;
mod task_group;

pub use batch::BatchOrchestrator;
pub use context::CrawlContext;
pub use detail::{DetailCrawler, DetailOutcome};
pub use row::{RatingOutcome, RatingProcessor, RowOutcome, RowProcessor};
pub use task_group::{OrderedTaskGroup, ScopedTask};
