//! Observability utilities.

mod logging;
mod warnings;

pub use logging::{init_logging, SpanTimer, DEFAULT_LOG_FILTER};
pub use warnings::{count_by_kind, Warning, WarningKind};
