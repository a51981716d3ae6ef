// file: src/exporter/json.rs
// description: machine-readable index of all records, grouped and summarized
// reference: https://docs.rs/serde_json

use crate::error::Result;
use crate::models::Record;
use crate::pipeline::{Aggregate, TagCount};
use chrono::{DateTime, Local};
use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Field order is fixed by declaration order so successive runs diff cleanly.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StructuredIndex {
    pub posts: Vec<Record>,
    pub categories: BTreeMap<String, Vec<Record>>,
    pub stats: IndexStats,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct IndexStats {
    pub total_posts: usize,
    pub total_categories: usize,
    pub last_updated: String,
    pub category_counts: BTreeMap<String, usize>,
    pub popular_tags: PopularTags,
}

/// Serialized as a JSON object whose keys stay in popularity order.
#[derive(Debug, Clone, Default)]
pub struct PopularTags(pub Vec<TagCount>);

impl Serialize for PopularTags {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|t| (&t.tag, t.count)))
    }
}

impl StructuredIndex {
    pub fn from_aggregate(
        aggregate: &Aggregate,
        generated_at: DateTime<Local>,
        popular_limit: usize,
    ) -> Self {
        Self {
            posts: aggregate.records.clone(),
            categories: aggregate.by_category.clone(),
            stats: IndexStats {
                total_posts: aggregate.total_records(),
                total_categories: aggregate.total_categories(),
                last_updated: generated_at.to_rfc3339(),
                category_counts: aggregate.category_counts.clone(),
                popular_tags: PopularTags(aggregate.popular_tags(popular_limit)),
            },
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let mut json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        json.push('\n');
        Ok(json)
    }
}
