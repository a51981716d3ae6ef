// file: src/extractor/dates.rs
// description: header date negotiation across the accepted formats
// reference: https://docs.rs/chrono

use crate::models::{DatePrecision, PostDate};
use chrono::{NaiveDate, NaiveDateTime};

/// Tried in order; the first format that consumes the whole value wins.
pub const DATE_FORMATS: [(&str, DatePrecision); 3] = [
    ("%Y-%m-%d %H:%M:%S", DatePrecision::Second),
    ("%Y-%m-%d %H:%M", DatePrecision::Minute),
    ("%Y-%m-%d", DatePrecision::Day),
];

pub fn parse_header_date(value: &str) -> Option<PostDate> {
    let value = value.trim().trim_matches(|c| c == '"' || c == '\'');

    DATE_FORMATS
        .iter()
        .find_map(|(format, precision)| match precision {
            DatePrecision::Day => NaiveDate::parse_from_str(value, format)
                .ok()
                .map(PostDate::Day),
            DatePrecision::Minute => NaiveDateTime::parse_from_str(value, format)
                .ok()
                .map(PostDate::Minute),
            DatePrecision::Second => NaiveDateTime::parse_from_str(value, format)
                .ok()
                .map(PostDate::Second),
        })
}
