//! HTTP fetching.
//!
//! This module provides:
//! - Fetch configuration and the allow-listed chart categories
//! - The [`Fetcher`] protocol and its `reqwest` implementation
//! - An optional concurrency gate

mod client;
mod config;
mod limit;
mod protocols;

pub use client::ReqwestFetcher;
pub use config::{ChartCategory, FetchConfig, IMDB_BASE_URL};
pub use limit::LimitedFetcher;
pub use protocols::{FetchResult, Fetcher};
