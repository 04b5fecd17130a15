//! HTML fixtures shaped like the IMDb chart and title pages.

use std::fmt::Write;

/// One row of a generated chart page.
#[derive(Debug, Clone)]
pub struct ChartRow {
    /// Display title.
    pub title: String,
    /// Year text as it appears in the markup, e.g. `(2010)`.
    pub year: String,
    /// Rating text.
    pub rating: String,
    /// Site-relative detail link.
    pub href: String,
}

impl ChartRow {
    /// Creates a row.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        year: impl Into<String>,
        rating: impl Into<String>,
        href: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
            rating: rating.into(),
            href: href.into(),
        }
    }
}

/// Renders the markup of a single data row, starting right after `<tr`.
#[must_use]
pub fn chart_row(rank: usize, row: &ChartRow) -> String {
    format!(
        r#">
      <td class="posterColumn">
        <span name="rk" data-value="{rank}"></span>
        <a href="{href}"><img src="poster.jpg" width="45" height="67"/></a>
      </td>
      <td class="titleColumn">
        {rank}.
        <a href="{href}" title="Director (dir.), Lead, Support">{title}</a>
        <span class="secondaryInfo">{year}</span>
      </td>
      <td class="ratingColumn imdbRating">
        <strong title="{rating} based on 1,000 user ratings">{rating}</strong>
      </td>
      <td class="watchlistColumn"></td>
    </tr>
"#,
        href = row.href,
        title = row.title,
        year = row.year,
        rating = row.rating,
    )
}

/// Renders a chart page whose table has one header row and one row per entry.
#[must_use]
pub fn chart_page(rows: &[ChartRow]) -> String {
    let mut body = String::from(
        r#"<html><head><title>Top Rated Indian Movies</title></head><body>
<div class="lister">
  <table class="chart full-width" data-caller-name="chart-top250movie">
    <thead>
      <tr>
        <th></th>
        <th>Rank &amp; Title</th>
        <th>IMDb Rating</th>
        <th>Your Rating</th>
      </tr>
    </thead>
    <tbody class="lister-list">
"#,
    );
    for (i, row) in rows.iter().enumerate() {
        body.push_str("    <tr");
        body.push_str(&chart_row(i + 1, row));
    }
    body.push_str("    </tbody>\n  </table>\n</div>\n</body></html>\n");
    body
}

/// Renders a title page with the given summary, duration and genres.
#[must_use]
pub fn detail_page(summary: &str, duration: &str, genres: &[&str]) -> String {
    let mut genre_links = String::new();
    for (i, genre) in genres.iter().enumerate() {
        if i > 0 {
            genre_links.push_str(",\n");
        }
        let _ = write!(
            genre_links,
            r#"<a href="/search/title?genres={}&explore=title_type,genres">{genre}</a>"#,
            genre.to_lowercase()
        );
    }

    format!(
        r#"<html><body>
<div class="title_wrapper">
  <h1>Some Title</h1>
  <div class="subtext">
    U/A
    <span class="ghost">|</span>
    <time datetime="PT130M">
      {duration}
    </time>
    <span class="ghost">|</span>
    {genre_links}
    <span class="ghost">|</span>
    <a href="/title/tt01/releaseinfo" title="See more release dates">10 March 2010 (India)</a>
  </div>
</div>
<div class="plot_summary">
  <div class="summary_text">
    {summary}
  </div>
</div>
</body></html>
"#
    )
}

/// Renders a plot summary page whose first paragraph holds `summary`.
#[must_use]
pub fn full_summary_page(summary: &str) -> String {
    format!(
        r#"<html><body>
<ul class="ipl-zebra-list" id="plot-summaries-content">
  <li class="ipl-zebra-list__item"><p>{summary}</p>
    <div class="author-container"><em>&mdash;Anonymous</em></div>
  </li>
</ul>
</body></html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_page_contains_rows() {
        let page = chart_page(&[ChartRow::new("Movie A", "(2010)", "8.5", "/title/tt01/")]);
        assert!(page.contains("<table"));
        assert!(page.contains("</table>"));
        assert!(page.contains(r#"<a href="/title/tt01/" title="Director (dir.), Lead, Support">Movie A</a>"#));
    }

    #[test]
    fn test_detail_page_joins_genres() {
        let page = detail_page("Plot.", "2h", &["Action", "Drama"]);
        assert!(page.contains(">Action</a>,\n<a"));
        assert!(page.contains("Plot."));
    }
}
