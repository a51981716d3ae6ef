// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod repository;
pub mod utils;

pub use config::{
    Config, ListingConfig, OutputConfig, PipelineConfig, SiteConfig, SourceConfig,
};
pub use error::{PipelineError, Result};
pub use exporter::{ArtifactRenderer, ArtifactWriter, Artifacts, ListingPage, StructuredIndex};
pub use extractor::{Extraction, MetadataExtractor};
pub use models::{
    DatePrecision, ExtractionFailure, FailureCause, PostDate, Record, RunReport, SourceDocument,
};
pub use parser::{Frontmatter, FrontmatterParser, MarkdownNormalizer, MarkdownParser};
pub use pipeline::{Aggregate, PipelineOrchestrator, ProgressTracker, TagCount};
pub use repository::{Discovery, FileClassifier, FileScanner};
pub use utils::Validator;
