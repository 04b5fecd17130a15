//! Markup strategies for chart and detail pages.
//!
//! A [`MarkupStrategy`] owns every marker sequence the crawler relies on. The
//! crawler never touches raw offsets itself, so a page layout change only
//! requires a new strategy.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

use super::fields::{
    extract_field, extract_field_raw, inner_text, join_labels, split_labels, text_before,
};

/// Splits a chart table into row fragments. Matches `<tr` plus any `>`.
static ROW_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<tr>*").expect("ROW_BOUNDARY regex"));

/// Fields found in a chart row's title cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleMarkup {
    /// Display title.
    pub title: Option<String>,
    /// Raw release year text, e.g. `(2010)`.
    pub year_text: Option<String>,
    /// Detail page link as written in the markup (usually site-relative).
    pub detail_href: Option<String>,
}

/// Fields found on a detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailMarkup {
    /// Summary text, possibly truncated.
    pub summary: String,
    /// Link to the full summary when the summary is truncated.
    pub more_href: Option<String>,
    /// Running time text.
    pub duration: String,
    /// Comma-joined genre names.
    pub genre: String,
}

/// Locates fields in chart and detail page markup.
pub trait MarkupStrategy: Send + Sync {
    /// Returns the chart table, including its opening and closing tags.
    fn chart_table<'a>(&self, page: &'a str) -> Option<&'a str>;

    /// Splits the chart table into data rows, header rows excluded.
    fn split_rows<'a>(&self, table: &'a str) -> Vec<&'a str>;

    /// Extracts title, year text and detail link from a row.
    fn title_fields(&self, row: &str) -> TitleMarkup;

    /// Extracts the raw rating text from a row.
    fn rating_text<'a>(&self, row: &'a str) -> Option<&'a str>;

    /// Extracts summary, duration and genre from a detail page.
    fn detail_fields(&self, page: &str) -> DetailMarkup;

    /// Extracts the untruncated summary from a full-summary page.
    fn full_summary(&self, page: &str) -> Option<String>;
}

/// Markup of the IMDb chart and title pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImdbMarkup;

impl ImdbMarkup {
    const TABLE_OPEN: &'static str = "<table";
    const TABLE_CLOSE: &'static str = "</table>";
    const HEADER_ROWS: usize = 2;

    const TITLE_CELL: &'static str = r#"<td class="titleColumn">"#;
    const RATING_CELL: &'static str = r#"<td class="ratingColumn imdbRating">"#;
    const CELL_CLOSE: &'static str = "</td>";
    const YEAR_OPEN: &'static str = r#"<span class="secondaryInfo">"#;
    const SPAN_CLOSE: &'static str = "</span>";
    const LINK_OPEN: &'static str = r#"<a href=""#;
    const LINK_CLOSE: &'static str = "</a>";
    const STRONG_CLOSE: &'static str = "</strong>";

    const SUMMARY_OPEN: &'static str = r#"<div class="summary_text">"#;
    const DIV_CLOSE: &'static str = "</div>";
    const TIME_CLOSE: &'static str = "</time>";
    const FIELD_SEPARATOR: &'static str = r#"<span class="ghost">|</span>"#;
    const PARAGRAPH_OPEN: &'static str = "<p>";
    const PARAGRAPH_CLOSE: &'static str = "</p>";

    /// Creates the strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn href(fragment: &str) -> Option<String> {
        extract_field_raw(fragment, Self::LINK_OPEN, "\"")
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(ToString::to_string)
    }

    fn genre(page: &str) -> String {
        let Some(time_end) = page.find(Self::TIME_CLOSE) else {
            return String::new();
        };
        let Some(region) =
            extract_field_raw(&page[time_end..], Self::FIELD_SEPARATOR, Self::FIELD_SEPARATOR)
        else {
            return String::new();
        };
        join_labels(&split_labels(region, Self::LINK_CLOSE))
    }
}

impl MarkupStrategy for ImdbMarkup {
    fn chart_table<'a>(&self, page: &'a str) -> Option<&'a str> {
        let start = page.find(Self::TABLE_OPEN)?;
        let end = page[start..].find(Self::TABLE_CLOSE)? + start + Self::TABLE_CLOSE.len();
        Some(&page[start..end])
    }

    fn split_rows<'a>(&self, table: &'a str) -> Vec<&'a str> {
        ROW_BOUNDARY
            .split(table)
            .skip(Self::HEADER_ROWS)
            .collect()
    }

    fn title_fields(&self, row: &str) -> TitleMarkup {
        let Some(cell) = extract_field_raw(row, Self::TITLE_CELL, Self::CELL_CLOSE) else {
            return TitleMarkup::default();
        };

        TitleMarkup {
            title: inner_text(cell, Self::LINK_CLOSE).map(ToString::to_string),
            year_text: extract_field(cell, Self::YEAR_OPEN, Self::SPAN_CLOSE)
                .map(ToString::to_string),
            detail_href: Self::href(cell),
        }
    }

    fn rating_text<'a>(&self, row: &'a str) -> Option<&'a str> {
        let cell = extract_field_raw(row, Self::RATING_CELL, Self::CELL_CLOSE)?;
        inner_text(cell, Self::STRONG_CLOSE)
    }

    fn detail_fields(&self, page: &str) -> DetailMarkup {
        let summary = extract_field(page, Self::SUMMARY_OPEN, Self::DIV_CLOSE).unwrap_or_default();

        DetailMarkup {
            summary: summary.to_string(),
            more_href: Self::href(summary),
            duration: text_before(page, Self::TIME_CLOSE)
                .unwrap_or_default()
                .to_string(),
            genre: Self::genre(page),
        }
    }

    fn full_summary(&self, page: &str) -> Option<String> {
        extract_field(page, Self::PARAGRAPH_OPEN, Self::PARAGRAPH_CLOSE).map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::{chart_page, detail_page, ChartRow};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_chart_table_bounds() {
        let page = "<html><table class=\"chart\"><tr></tr></table><p>after</p></html>";
        assert_eq!(
            ImdbMarkup.chart_table(page),
            Some("<table class=\"chart\"><tr></tr></table>")
        );
        assert_eq!(ImdbMarkup.chart_table("<html></html>"), None);
        assert_eq!(ImdbMarkup.chart_table("<table> never closed"), None);
    }

    #[test]
    fn test_split_rows_skips_headers() {
        let page = chart_page(&[
            ChartRow::new("Movie A", "(2010)", "8.5", "/title/tt01/"),
            ChartRow::new("Movie B", "(1999)", "9.1", "/title/tt02/"),
        ]);
        let table = ImdbMarkup.chart_table(&page).unwrap();
        let rows = ImdbMarkup.split_rows(table);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("Movie A"));
        assert!(rows[1].contains("Movie B"));
    }

    #[test]
    fn test_split_rows_empty_table() {
        assert!(ImdbMarkup.split_rows("<table></table>").is_empty());
    }

    #[test]
    fn test_title_fields() {
        let row = r#">
            <td class="posterColumn"><a href="/title/tt01/"><img/></a></td>
            <td class="titleColumn">
                1.
                <a href="/title/tt01/" title="Director (dir.)">Movie A</a>
                <span class="secondaryInfo">(2010)</span>
            </td>
            <td class="ratingColumn imdbRating"><strong title="8.5 based on 10 votes">8.5</strong></td>
        "#;
        assert_eq!(
            ImdbMarkup.title_fields(row),
            TitleMarkup {
                title: Some("Movie A".to_string()),
                year_text: Some("(2010)".to_string()),
                detail_href: Some("/title/tt01/".to_string()),
            }
        );
        assert_eq!(ImdbMarkup.rating_text(row), Some("8.5"));
    }

    #[test]
    fn test_title_fields_missing_cell() {
        assert_eq!(ImdbMarkup.title_fields("<td>nothing</td>"), TitleMarkup::default());
        assert_eq!(ImdbMarkup.rating_text("<td>nothing</td>"), None);
    }

    #[test]
    fn test_detail_fields() {
        let page = detail_page("A quiet drama.", "2h 10min", &["Drama", "Romance"]);
        assert_eq!(
            ImdbMarkup.detail_fields(&page),
            DetailMarkup {
                summary: "A quiet drama.".to_string(),
                more_href: None,
                duration: "2h 10min".to_string(),
                genre: "Drama, Romance".to_string(),
            }
        );
    }

    #[test]
    fn test_detail_fields_truncated_summary() {
        let page = detail_page(
            r#"A long story... <a href="/title/tt01/plotsummary">See full summary</a>&nbsp;&raquo;"#,
            "95min",
            &["Comedy"],
        );
        let detail = ImdbMarkup.detail_fields(&page);
        assert_eq!(detail.more_href.as_deref(), Some("/title/tt01/plotsummary"));
        assert_eq!(detail.duration, "95min");
        assert_eq!(detail.genre, "Comedy");
    }

    #[test]
    fn test_detail_fields_empty_page() {
        assert_eq!(ImdbMarkup.detail_fields(""), DetailMarkup::default());
    }

    #[test]
    fn test_full_summary() {
        let page = "<html><ul><li><p>\n  The whole plot.\n</p></li></ul></html>";
        assert_eq!(ImdbMarkup.full_summary(page), Some("The whole plot.".to_string()));
        assert_eq!(ImdbMarkup.full_summary("<html></html>"), None);
    }
}
