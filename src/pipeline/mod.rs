// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

pub mod aggregator;
mod orchestrator;
mod progress;

pub use aggregator::{Aggregate, TagCount};
pub use orchestrator::PipelineOrchestrator;
pub use progress::ProgressTracker;
