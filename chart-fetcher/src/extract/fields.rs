//! Marker-based field extraction primitives.
//!
//! Every function here is pure: no I/O, no shared state, and the same input
//! always yields the same output. Absence is reported as `None`, never as a
//! panic, so callers can degrade a single field and keep going.

use crate::errors::FieldError;

/// Separator used when joining multiple labels into one field.
pub const LABEL_SEPARATOR: &str = ", ";

/// Returns the text between the first `start` and the next `end`, untrimmed.
#[must_use]
pub fn extract_field_raw<'a>(doc: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = doc.find(start)? + start.len();
    let len = doc[from..].find(end)?;
    Some(&doc[from..from + len])
}

/// Returns the trimmed text between the first `start` and the next `end`.
///
/// Returns `None` when either marker is missing.
///
/// # Examples
///
/// ```
/// use chart_fetcher::extract::extract_field;
///
/// let doc = r#"<div class="x"> hello </div>"#;
/// assert_eq!(extract_field(doc, r#"<div class="x">"#, "</div>"), Some("hello"));
/// assert_eq!(extract_field(doc, "<span>", "</span>"), None);
/// ```
#[must_use]
pub fn extract_field<'a>(doc: &'a str, start: &str, end: &str) -> Option<&'a str> {
    extract_field_raw(doc, start, end).map(str::trim)
}

/// Returns the trimmed text closed by the first `end`, starting after the
/// nearest `>` before it.
///
/// Used for elements like `<time datetime="PT2H">2h 10min</time>` where the
/// opening tag's attributes are unknown.
#[must_use]
pub fn text_before<'a>(doc: &'a str, end: &str) -> Option<&'a str> {
    let stop = doc.find(end)?;
    let head = &doc[..stop];
    let from = head.rfind('>').map_or(0, |i| i + 1);
    Some(head[from..].trim())
}

/// Returns the trimmed text between the first `>` and the last `close`.
///
/// Works on a cell fragment whose inner element is known but whose attributes
/// are not, e.g. `1. <a href="/x">Title</a>` with `close = "</a>"`.
#[must_use]
pub fn inner_text<'a>(fragment: &'a str, close: &str) -> Option<&'a str> {
    let from = fragment.find('>')? + 1;
    let to = fragment.rfind(close)?;
    if to < from {
        return None;
    }
    Some(fragment[from..to].trim())
}

/// Splits `region` on `delimiter` and keeps the trailing label of each segment.
///
/// The label is the text after the last `>` in the segment. Segments without a
/// `>` and labels that are empty after trimming are discarded.
#[must_use]
pub fn split_labels<'a>(region: &'a str, delimiter: &str) -> Vec<&'a str> {
    region
        .split(delimiter)
        .filter_map(|segment| segment.rfind('>').map(|i| segment[i + 1..].trim()))
        .filter(|label| !label.is_empty())
        .collect()
}

/// Joins labels with [`LABEL_SEPARATOR`].
#[must_use]
pub fn join_labels(labels: &[&str]) -> String {
    labels.join(LABEL_SEPARATOR)
}

/// Parses a release year such as `(2010)` or `2010`.
pub fn parse_year(text: &str) -> Result<u64, FieldError> {
    let trimmed = text
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .trim();
    if trimmed.is_empty() {
        return Err(FieldError::Missing {
            field: "release year",
        });
    }
    trimmed.parse::<u64>().map_err(|e| FieldError::Malformed {
        field: "release year",
        value: text.to_string(),
        reason: e.to_string(),
    })
}

/// Parses a rating such as `8.5`.
///
/// Non-finite values are rejected since they have no JSON representation.
pub fn parse_rating(text: &str) -> Result<f64, FieldError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Missing { field: "rating" });
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(FieldError::Malformed {
            field: "rating",
            value: text.to_string(),
            reason: "not a finite number".to_string(),
        }),
        Err(e) => Err(FieldError::Malformed {
            field: "rating",
            value: text.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_field_trims() {
        let doc = "<b>  bold text \n</b>";
        assert_eq!(extract_field(doc, "<b>", "</b>"), Some("bold text"));
        assert_eq!(extract_field_raw(doc, "<b>", "</b>"), Some("  bold text \n"));
    }

    #[test]
    fn test_extract_field_uses_first_end_after_start() {
        let doc = "</p><p>one</p><p>two</p>";
        assert_eq!(extract_field(doc, "<p>", "</p>"), Some("one"));
    }

    #[test]
    fn test_extract_field_missing_markers() {
        assert_eq!(extract_field("abc", "<p>", "</p>"), None);
        assert_eq!(extract_field("<p>open only", "<p>", "</p>"), None);
        assert_eq!(extract_field("", "<p>", "</p>"), None);
    }

    #[test]
    fn test_extract_field_is_idempotent() {
        let doc = r#"<td class="a"> x </td><td class="a"> y </td>"#;
        let first = extract_field(doc, r#"<td class="a">"#, "</td>");
        let second = extract_field(doc, r#"<td class="a">"#, "</td>");
        assert_eq!(first, second);
        assert_eq!(first, Some("x"));
    }

    #[test]
    fn test_text_before() {
        let doc = r#"<div><time datetime="PT2H10M">
            2h 10min
        </time></div>"#;
        assert_eq!(text_before(doc, "</time>"), Some("2h 10min"));
        assert_eq!(text_before("no markers", "</time>"), None);
        assert_eq!(text_before(" 90 min</time>", "</time>"), Some("90 min"));
    }

    #[test]
    fn test_inner_text() {
        let cell = r#" 1. <a href="/title/tt1/" title="Someone">Movie A</a> <span>(2010)</span>"#;
        assert_eq!(inner_text(cell, "</a>"), Some("Movie A"));
        assert_eq!(inner_text("plain", "</a>"), None);
        assert_eq!(inner_text("</a> late >", "</a>"), None);
    }

    #[test]
    fn test_split_labels() {
        let region = r#"
            <a href="/g/drama">Drama</a>,
            <a href="/g/romance">Romance</a>
        "#;
        assert_eq!(split_labels(region, "</a>"), vec!["Drama", "Romance"]);
        assert_eq!(split_labels("no tags here", "</a>"), Vec::<&str>::new());
    }

    #[test]
    fn test_join_labels() {
        assert_eq!(join_labels(&["Action", "Crime", "Drama"]), "Action, Crime, Drama");
        assert_eq!(join_labels(&[]), "");
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("(2010)"), Ok(2010));
        assert_eq!(parse_year(" 1999 "), Ok(1999));
        assert_eq!(parse_year(""), Err(FieldError::Missing { field: "release year" }));
        assert!(matches!(
            parse_year("(20x0)"),
            Err(FieldError::Malformed { field: "release year", .. })
        ));
        assert!(parse_year("-5").is_err());
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("8.5"), Ok(8.5));
        assert_eq!(parse_rating(" 9 "), Ok(9.0));
        assert!(matches!(
            parse_rating("NaN"),
            Err(FieldError::Malformed { field: "rating", .. })
        ));
        assert!(parse_rating("n/a").is_err());
        assert_eq!(parse_rating(""), Err(FieldError::Missing { field: "rating" }));
    }
}
