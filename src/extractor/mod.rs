// file: src/extractor/mod.rs
// description: metadata extraction module exports
// reference: internal module structure

pub mod dates;
pub mod metadata;
pub mod naming;
pub mod patterns;

pub use dates::{DATE_FORMATS, parse_header_date};
pub use metadata::{Extraction, MetadataExtractor};
