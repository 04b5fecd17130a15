//! Testing utilities for chart crawls.
//!
//! This module provides:
//! - An in-memory [`Fetcher`](crate::fetch::Fetcher) with delays and failures
//! - HTML fixtures in the shape of the chart and title pages

pub mod fixtures;
mod mocks;

pub use mocks::MockFetcher;
