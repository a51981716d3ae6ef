// file: src/pipeline/aggregator.rs
// description: groups records by category and orders them newest first
// reference: stable sorting and grouping over extracted records

use crate::models::Record;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Everything the renderer needs, rebuilt from scratch on every run.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    /// Newest first; equal dates keep input order.
    pub records: Vec<Record>,
    /// Keyed alphabetically, each partition sorted like `records`.
    pub by_category: BTreeMap<String, Vec<Record>>,
    pub category_counts: BTreeMap<String, usize>,
    /// Raw occurrence counts, in first-seen order.
    pub tag_frequency: Vec<TagCount>,
}

impl Aggregate {
    pub fn build(records: Vec<Record>) -> Self {
        let mut records = records;
        sort_newest_first(&mut records);

        // Partitioning a sorted sequence keeps each partition sorted.
        let mut by_category: BTreeMap<String, Vec<Record>> = BTreeMap::new();
        for record in &records {
            by_category
                .entry(record.category.clone())
                .or_default()
                .push(record.clone());
        }

        let category_counts = by_category
            .iter()
            .map(|(category, items)| (category.clone(), items.len()))
            .collect();

        let mut tag_frequency: Vec<TagCount> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for tag in records.iter().flat_map(|r| r.tags.iter()) {
            match positions.get(tag.as_str()) {
                Some(&idx) => tag_frequency[idx].count += 1,
                None => {
                    positions.insert(tag.as_str(), tag_frequency.len());
                    tag_frequency.push(TagCount {
                        tag: tag.clone(),
                        count: 1,
                    });
                }
            }
        }

        Self {
            records,
            by_category,
            category_counts,
            tag_frequency,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_records(&self) -> usize {
        self.records.len()
    }

    pub fn total_categories(&self) -> usize {
        self.by_category.len()
    }

    /// Top `limit` tags by count; ties keep first-seen order.
    pub fn popular_tags(&self, limit: usize) -> Vec<TagCount> {
        let mut tags = self.tag_frequency.clone();
        tags.sort_by(|a, b| b.count.cmp(&a.count));
        tags.truncate(limit);
        tags
    }
}

fn sort_newest_first(records: &mut [Record]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}
