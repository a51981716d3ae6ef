// file: src/exporter/renderer.rs
// description: pure transformation of an aggregate into both output artifacts
// reference: exporter composition

use crate::config::{Config, ListingConfig, SiteConfig};
use crate::exporter::json::StructuredIndex;
use crate::exporter::listing::ListingPage;
use crate::pipeline::Aggregate;
use chrono::{DateTime, Local};

#[derive(Debug, Clone)]
pub struct Artifacts {
    pub index: StructuredIndex,
    pub page: String,
}

/// Turns an aggregate into artifacts. Touches neither disk nor network.
pub struct ArtifactRenderer {
    site: SiteConfig,
    listing: ListingConfig,
}

impl ArtifactRenderer {
    pub fn new(config: &Config) -> Self {
        Self {
            site: config.site.clone(),
            listing: config.listing.clone(),
        }
    }

    pub fn render(&self, aggregate: &Aggregate, generated_at: DateTime<Local>) -> Artifacts {
        Artifacts {
            index: StructuredIndex::from_aggregate(
                aggregate,
                generated_at,
                self.listing.popular_tags,
            ),
            page: ListingPage::new(&self.site, &self.listing).render(aggregate, generated_at),
        }
    }
}
