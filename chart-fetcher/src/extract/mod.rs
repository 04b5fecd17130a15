//! Field extraction from chart and detail markup.
//!
//! This module provides:
//! - Pure marker-based extraction primitives
//! - Year and rating parsers that report field-local errors
//! - The [`MarkupStrategy`] trait and its IMDb implementation

mod fields;
mod markup;

pub use fields::{
    extract_field, extract_field_raw, inner_text, join_labels, parse_rating, parse_year,
    split_labels, text_before, LABEL_SEPARATOR,
};
pub use markup::{DetailMarkup, ImdbMarkup, MarkupStrategy, TitleMarkup};
