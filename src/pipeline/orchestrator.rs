// file: src/pipeline/orchestrator.rs
// description: coordinates discovery, parallel extraction, aggregation, rendering, and persistence
// reference: orchestrates one asynchronous digest run

use crate::config::Config;
use crate::error::Result;
use crate::exporter::{ArtifactRenderer, Artifacts, ArtifactWriter};
use crate::extractor::{Extraction, MetadataExtractor};
use crate::models::{ExtractionFailure, FailureCause, RunReport, SourceDocument};
use crate::pipeline::aggregator::Aggregate;
use crate::pipeline::progress::ProgressTracker;
use crate::repository::{Discovery, FileScanner};
use crate::utils::Validator;
use chrono::Local;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

type Outcome = std::result::Result<Extraction, ExtractionFailure>;

pub struct PipelineOrchestrator {
    config: Config,
    max_concurrent_tasks: usize,
}

impl PipelineOrchestrator {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let max_concurrent_tasks = config.pipeline.parallel_workers.max(1);

        Ok(Self {
            config,
            max_concurrent_tasks,
        })
    }

    /// Runs the whole digest over `root` and writes both artifacts.
    ///
    /// Per-document problems land in the returned report. Only an unusable
    /// root or a failed write is an `Err`.
    pub async fn run(&self, root: &Path) -> Result<RunReport> {
        let start = Instant::now();
        info!("Starting notes digest for {}", root.display());

        Validator::validate_directory(root)?;
        let generated_at = Local::now();

        info!("Scanning for notes...");
        let discovered = self.discover(root).await?;

        let mut report = RunReport::new();
        let mut documents = Vec::new();
        let mut outcomes: Vec<(usize, Outcome)> = Vec::new();

        for (index, item) in discovered.into_iter().enumerate() {
            match item {
                Discovery::Document(doc) => documents.push((index, doc)),
                Discovery::Unreadable(failure) => outcomes.push((index, Err(failure))),
                Discovery::Warning(warning) => report.discovery_warnings.push(warning),
            }
        }

        report.documents_discovered = documents.len() + outcomes.len();
        info!("Found {} notes", report.documents_discovered);

        if report.documents_discovered == 0 {
            warn!("No notes found under {}", root.display());
        }

        let extractor = Arc::new(MetadataExtractor::new(
            &self.config,
            generated_at.naive_local(),
        ));
        let progress = Arc::new(if self.config.pipeline.show_progress {
            ProgressTracker::new(documents.len())
        } else {
            ProgressTracker::hidden(documents.len())
        });

        info!(
            "Extracting metadata with {} concurrent tasks...",
            self.max_concurrent_tasks
        );
        outcomes.extend(self.extract_documents(documents, extractor, progress.clone()).await);
        progress.finish();

        // Completion order is arbitrary; discovery order is not.
        outcomes.sort_by_key(|(index, _)| *index);

        let mut records = Vec::with_capacity(outcomes.len());
        for (_, outcome) in outcomes {
            match outcome {
                Ok(extraction) => {
                    report.date_warnings.extend(extraction.warnings);
                    records.push(extraction.record);
                }
                Err(failure) => {
                    warn!("Skipping {}", failure);
                    report.failures.push(failure);
                }
            }
        }

        let aggregate = Aggregate::build(records);
        report.records_extracted = aggregate.total_records();
        report.categories = aggregate.by_category.keys().cloned().collect();

        info!("Rendering artifacts...");
        let artifacts = ArtifactRenderer::new(&self.config).render(&aggregate, generated_at);

        let (index_path, page_path) = self.persist(&artifacts, root)?;
        report.index_path = index_path;
        report.page_path = page_path;
        report.duration_ms = start.elapsed().as_millis() as u64;

        self.log_final_report(&report);

        Ok(report)
    }

    async fn discover(&self, root: &Path) -> Result<Vec<Discovery>> {
        let root = root.to_path_buf();
        let source_config = self.config.source.clone();

        let found = tokio::task::spawn_blocking(move || {
            let scanner = FileScanner::new(source_config);
            scanner.scan_directory(&root)
        })
        .await?;

        Ok(found)
    }

    async fn extract_documents(
        &self,
        documents: Vec<(usize, SourceDocument)>,
        extractor: Arc<MetadataExtractor>,
        progress: Arc<ProgressTracker>,
    ) -> Vec<(usize, Outcome)> {
        let tasks = documents.into_iter().map(|(index, doc)| {
            let extractor = extractor.clone();
            let progress = progress.clone();

            async move {
                let path = doc.relative_path.clone();
                progress.set_message(format!("Extracting {}", path));

                let extracted = tokio::task::spawn_blocking(move || extractor.extract(&doc)).await;

                let outcome = match extracted {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        error!("Extraction task for {} failed: {}", path, e);
                        Err(ExtractionFailure {
                            path,
                            cause: FailureCause::Aborted {
                                message: e.to_string(),
                            },
                        })
                    }
                };

                match &outcome {
                    Ok(_) => progress.inc_extracted(),
                    Err(_) => progress.inc_failed(),
                }

                (index, outcome)
            }
        });

        stream::iter(tasks)
            .buffer_unordered(self.max_concurrent_tasks)
            .collect()
            .await
    }

    fn persist(&self, artifacts: &Artifacts, root: &Path) -> Result<(PathBuf, PathBuf)> {
        let writer = ArtifactWriter::new(self.config.output_dir(root))?;

        let json = artifacts.index.to_json(self.config.output.pretty)?;
        let index_path = writer.write(&self.config.output.index_file, &json)?;
        let page_path = writer.write(&self.config.output.page_file, &artifacts.page)?;

        Ok((index_path, page_path))
    }

    fn log_final_report(&self, report: &RunReport) {
        info!("=== Digest Summary ===");
        info!("Duration: {} ms", report.duration_ms);
        info!("Notes discovered: {}", report.documents_discovered);
        info!("Records extracted: {}", report.records_extracted);
        info!("Failures: {}", report.failures.len());
        info!("Success rate: {:.2}%", report.success_rate());
        info!("Categories: {}", report.categories.len());
        if !report.date_warnings.is_empty() {
            info!("Unparseable dates: {}", report.date_warnings.len());
        }
        if !report.discovery_warnings.is_empty() {
            info!("Discovery warnings: {}", report.discovery_warnings.len());
        }
        info!("Index: {}", report.index_path.display());
        info!("Page: {}", report.page_path.display());
        info!("======================");
    }
}
