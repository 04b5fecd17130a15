//! Data models for chart entries.
//!
//! A [`ChartRecord`] is assembled from three independently produced parts:
//! - [`TitleFields`] from the row's title cell
//! - [`MovieDetail`] from the row's detail page
//! - the rating from the row's rating cell
//!
//! The record itself is flat; the grouping above exists only in how it is built.

use serde::{Deserialize, Serialize};

use crate::observability::Warning;

/// Summary, duration and genre crawled from a detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetail {
    /// Plot summary, possibly empty.
    pub summary: String,
    /// Running time as displayed, e.g. `2h 10min`.
    pub duration: String,
    /// Genres joined with `", "`.
    pub genre: String,
}

/// Fields read from a chart row's title cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleFields {
    /// Display title.
    pub title: String,
    /// Release year, zero when unparsable.
    pub release_year: u64,
    /// Absolute URL of the detail page, if the row links one.
    pub detail_url: Option<String>,
}

/// One movie entry of the chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartRecord {
    /// Display title.
    pub title: String,
    /// Release year, zero when unparsable.
    #[serde(rename = "movie_release_year")]
    pub release_year: u64,
    /// Plot summary.
    pub summary: String,
    /// Running time.
    pub duration: String,
    /// Comma-joined genres.
    pub genre: String,
    /// Rating, zero when unparsable.
    #[serde(rename = "imdb_rating")]
    pub rating: f64,
}

impl ChartRecord {
    /// Assembles a record from its parts.
    #[must_use]
    pub fn from_parts(title: TitleFields, detail: MovieDetail, rating: f64) -> Self {
        Self {
            title: title.title,
            release_year: title.release_year,
            summary: detail.summary,
            duration: detail.duration,
            genre: detail.genre,
            rating,
        }
    }
}

/// Ordered records of one chart; `batch[i]` belongs to the i-th chart row.
pub type ChartBatch = Vec<ChartRecord>;

/// A finished batch together with the soft failures it accumulated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Records in chart order.
    pub records: ChartBatch,
    /// Soft failures, batch-level first, then per row in row order.
    pub warnings: Vec<Warning>,
    /// Number of rows requested by the caller.
    pub requested: usize,
    /// Number of data rows present on the chart page.
    pub available: usize,
    /// Wall time of the whole batch in milliseconds.
    pub duration_ms: f64,
}

impl BatchReport {
    /// Whether the requested count exceeded the available rows.
    #[must_use]
    pub const fn was_clamped(&self) -> bool {
        self.requested > self.available
    }

    /// Serializes the records as a single-line JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.records)
    }
}
