// file: src/exporter/mod.rs
// description: artifact rendering and persistence module exports
// reference: internal module structure

pub mod json;
pub mod listing;
pub mod renderer;
pub mod writer;

pub use json::{IndexStats, PopularTags, StructuredIndex};
pub use listing::ListingPage;
pub use renderer::{ArtifactRenderer, Artifacts};
pub use writer::ArtifactWriter;
