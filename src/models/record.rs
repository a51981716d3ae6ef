// file: src/models/record.rs
// description: normalized note record and its variable-precision date
// reference: internal data structures

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePrecision {
    Day,
    Minute,
    Second,
}

impl DatePrecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatePrecision::Day => "day",
            DatePrecision::Minute => "minute",
            DatePrecision::Second => "second",
        }
    }
}

/// A note's date as precise as its source allowed.
///
/// Ordering and equality compare the instant, with day-only dates placed at
/// midnight, so `2024-03-05` and `2024-03-05 00:00:00` are equal for sorting.
#[derive(Debug, Clone, Copy)]
pub enum PostDate {
    Day(NaiveDate),
    Minute(NaiveDateTime),
    Second(NaiveDateTime),
}

impl PostDate {
    pub fn precision(&self) -> DatePrecision {
        match self {
            PostDate::Day(_) => DatePrecision::Day,
            PostDate::Minute(_) => DatePrecision::Minute,
            PostDate::Second(_) => DatePrecision::Second,
        }
    }

    pub fn as_datetime(&self) -> NaiveDateTime {
        match self {
            PostDate::Day(date) => date.and_time(NaiveTime::MIN),
            PostDate::Minute(dt) | PostDate::Second(dt) => *dt,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.as_datetime().date()
    }
}

impl PartialEq for PostDate {
    fn eq(&self, other: &Self) -> bool {
        self.as_datetime() == other.as_datetime()
    }
}

impl Eq for PostDate {}

impl PartialOrd for PostDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PostDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_datetime().cmp(&other.as_datetime())
    }
}

impl fmt::Display for PostDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostDate::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            PostDate::Minute(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
            PostDate::Second(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl Serialize for PostDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub title: String,
    pub slug: String,
    pub date: PostDate,
    pub category: String,
    pub tags: Vec<String>,
    pub preview: String,
    pub url: String,
    pub path: String,
}

impl Record {
    /// Tags with duplicates removed, first occurrence wins. Storage keeps
    /// the raw list; only listings use this.
    pub fn display_tags(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            if !seen.contains(&tag.as_str()) {
                seen.push(tag);
            }
        }
        seen
    }
}
