// file: src/exporter/listing.rs
// description: human-readable markdown listing of recent and per-category notes
// reference: generated README layout

use crate::config::{ListingConfig, SiteConfig};
use crate::models::Record;
use crate::pipeline::Aggregate;
use chrono::{DateTime, Local};

const FOOTER: &str =
    "_This README is automatically generated from the markdown files in this repository._";

pub struct ListingPage<'a> {
    site: &'a SiteConfig,
    listing: &'a ListingConfig,
}

impl<'a> ListingPage<'a> {
    pub fn new(site: &'a SiteConfig, listing: &'a ListingConfig) -> Self {
        Self { site, listing }
    }

    pub fn render(&self, aggregate: &Aggregate, generated_at: DateTime<Local>) -> String {
        let mut page = String::new();

        self.title_block(&mut page);
        self.stats_block(&mut page, aggregate, generated_at);
        self.recent_block(&mut page, aggregate);
        self.category_block(&mut page, aggregate);

        page.push_str(FOOTER);
        page.push('\n');
        page
    }

    fn title_block(&self, page: &mut String) {
        page.push_str(&format!("# {}\n\n", self.site.title));
        if !self.site.tagline.is_empty() {
            page.push_str(&format!("> {}\n\n", self.site.tagline));
        }
    }

    fn stats_block(&self, page: &mut String, aggregate: &Aggregate, generated_at: DateTime<Local>) {
        page.push_str("## Stats\n\n");
        page.push_str(&format!(
            "- **Total entries:** {}\n",
            aggregate.total_records()
        ));
        page.push_str(&format!(
            "- **Categories:** {}\n",
            aggregate.total_categories()
        ));

        let popular = aggregate.popular_tags(self.listing.popular_tags);
        if !popular.is_empty() {
            let tags: Vec<String> = popular
                .iter()
                .map(|t| format!("`{}` ({})", t.tag, t.count))
                .collect();
            page.push_str(&format!("- **Popular tags:** {}\n", tags.join(", ")));
        }

        page.push_str(&format!(
            "- **Last updated:** {}\n\n",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
    }

    fn recent_block(&self, page: &mut String, aggregate: &Aggregate) {
        page.push_str("## Recent Entries\n\n");

        if aggregate.is_empty() {
            page.push_str("_No entries yet (0 notes found)._\n\n");
            return;
        }

        for record in aggregate.records.iter().take(self.listing.recent_limit) {
            page.push_str(&format!("### {} - {}\n\n", record.date, record.title));

            let mut meta = format!("**Category:** {}", record.category);
            let tags = record.display_tags();
            if !tags.is_empty() {
                let tags: Vec<String> = tags.iter().map(|t| format!("`{}`", t)).collect();
                meta.push_str(&format!(" | **Tags:** {}", tags.join(", ")));
            }
            page.push_str(&meta);
            page.push_str("\n\n");

            if !record.preview.is_empty() {
                page.push_str(&format!("{}\n\n", record.preview));
            }
            page.push_str(&format!("[**See more...**]({})\n\n", record.url));
            page.push_str("---\n\n");
        }
    }

    fn category_block(&self, page: &mut String, aggregate: &Aggregate) {
        page.push_str("## By Category\n\n");

        if aggregate.by_category.is_empty() {
            page.push_str("_No categories yet._\n\n");
            return;
        }

        for (category, records) in &aggregate.by_category {
            page.push_str(&format!("### {} ({})\n\n", category, records.len()));

            for record in records.iter().take(self.listing.category_limit) {
                page.push_str(&entry_line(record));
            }

            let omitted = records.len().saturating_sub(self.listing.category_limit);
            if omitted > 0 {
                page.push_str(&format!("- _...and {} more_\n", omitted));
            }
            page.push('\n');
        }
    }
}

fn entry_line(record: &Record) -> String {
    format!("- [{}]({}) - {}\n", record.title, record.url, record.date)
}
