// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod record;
pub mod report;

pub use document::SourceDocument;
pub use record::{DatePrecision, PostDate, Record};
pub use report::{
    DateParseWarning, DiscoveryWarning, ExtractionFailure, FailureCause, RunReport,
};
