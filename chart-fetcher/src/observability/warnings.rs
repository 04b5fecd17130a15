//! Soft failures recorded while a batch runs.
//!
//! Nothing in a row can abort the batch. Instead every degraded field leaves a
//! [`Warning`] behind, which is logged when it is recorded and returned with
//! the batch so callers can inspect what went wrong.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// What kind of soft failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The detail page could not be fetched or returned an error status.
    DetailFetch,
    /// The full summary page could not be fetched.
    SummaryFetch,
    /// The row's title cell or detail link was missing.
    TitleCell,
    /// The release year could not be parsed.
    ReleaseYear,
    /// The rating could not be parsed.
    Rating,
    /// Fewer rows were available than requested.
    Clamped,
    /// A row task died before reporting.
    TaskJoin,
}

impl WarningKind {
    /// Stable name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DetailFetch => "detail_fetch",
            Self::SummaryFetch => "summary_fetch",
            Self::TitleCell => "title_cell",
            Self::ReleaseYear => "release_year",
            Self::Rating => "rating",
            Self::Clamped => "clamped",
            Self::TaskJoin => "task_join",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of one soft failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Row index, or `None` for batch-level warnings.
    pub row: Option<usize>,
    /// Failure category.
    pub kind: WarningKind,
    /// Human readable description.
    pub message: String,
}

impl Warning {
    /// Creates a row-level warning and logs it.
    #[must_use]
    pub fn row(row: usize, kind: WarningKind, message: impl Into<String>) -> Self {
        let warning = Self {
            row: Some(row),
            kind,
            message: message.into(),
        };
        warning.log();
        warning
    }

    /// Creates a batch-level warning and logs it.
    #[must_use]
    pub fn batch(kind: WarningKind, message: impl Into<String>) -> Self {
        let warning = Self {
            row: None,
            kind,
            message: message.into(),
        };
        warning.log();
        warning
    }

    fn log(&self) {
        match self.row {
            Some(row) => tracing::warn!(row, kind = %self.kind, "{}", self.message),
            None => tracing::warn!(kind = %self.kind, "{}", self.message),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(f, "row {row}: {}: {}", self.kind, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

/// Counts warnings per kind.
#[must_use]
pub fn count_by_kind(warnings: &[Warning]) -> HashMap<WarningKind, usize> {
    let mut counts = HashMap::new();
    for warning in warnings {
        *counts.entry(warning.kind).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_warning_display() {
        let warning = Warning::row(3, WarningKind::ReleaseYear, "release year \"x\" is not valid");
        assert_eq!(warning.row, Some(3));
        assert_eq!(
            warning.to_string(),
            "row 3: release_year: release year \"x\" is not valid"
        );
    }

    #[test]
    fn test_batch_warning_display() {
        let warning = Warning::batch(WarningKind::Clamped, "Only 5 records available");
        assert_eq!(warning.row, None);
        assert_eq!(warning.to_string(), "clamped: Only 5 records available");
    }

    #[test]
    fn test_warning_serializes_kind_snake_case() {
        let warning = Warning::row(0, WarningKind::DetailFetch, "boom");
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "detail_fetch");
        assert_eq!(json["row"], 0);
    }

    #[test]
    fn test_count_by_kind() {
        let warnings = vec![
            Warning::row(0, WarningKind::Rating, "a"),
            Warning::row(1, WarningKind::Rating, "b"),
            Warning::batch(WarningKind::Clamped, "c"),
        ];
        let counts = count_by_kind(&warnings);
        assert_eq!(counts.get(&WarningKind::Rating), Some(&2));
        assert_eq!(counts.get(&WarningKind::Clamped), Some(&1));
        assert_eq!(counts.get(&WarningKind::TaskJoin), None);
    }
}
