// file: src/repository/scanner.rs
// description: Directory walking and note discovery with filtering
// reference: https://docs.rs/walkdir

use crate::config::SourceConfig;
use crate::models::{DiscoveryWarning, ExtractionFailure, FailureCause, SourceDocument};
use crate::repository::FileClassifier;
use crate::utils::Validator;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// One item produced while walking the notes tree.
#[derive(Debug)]
pub enum Discovery {
    Document(SourceDocument),
    /// A candidate note that could not be read. Still counted, never silently dropped.
    Unreadable(ExtractionFailure),
    Warning(DiscoveryWarning),
}

pub struct FileScanner {
    config: SourceConfig,
}

impl FileScanner {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    /// Lazily walks `root` in file-name order.
    pub fn walk(&self, root: &Path) -> DocumentWalk {
        info!("Scanning directory: {}", root.display());

        let skip_dirs = self.config.skip_dirs.clone();
        let entries = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !is_skipped_dir(entry, &skip_dirs));

        DocumentWalk {
            root: root.to_path_buf(),
            config: self.config.clone(),
            classifier: FileClassifier::new(self.config.readme_name.clone()),
            entries: Box::new(entries),
        }
    }

    pub fn scan_directory(&self, root: &Path) -> Vec<Discovery> {
        let found: Vec<Discovery> = self.walk(root).collect();
        let documents = found
            .iter()
            .filter(|d| !matches!(d, Discovery::Warning(_)))
            .count();
        info!("Found {} candidate notes", documents);
        found
    }
}

fn is_skipped_dir(entry: &DirEntry, skip_dirs: &[String]) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    let skipped = name.starts_with('.') || skip_dirs.iter().any(|dir| dir == name.as_ref());
    if skipped {
        debug!("Skipping directory: {}", entry.path().display());
    }
    skipped
}

pub struct DocumentWalk {
    root: PathBuf,
    config: SourceConfig,
    classifier: FileClassifier,
    entries: Box<dyn Iterator<Item = walkdir::Result<DirEntry>> + Send>,
}

impl DocumentWalk {
    fn is_candidate(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_file() {
            return false;
        }

        let path = entry.path();

        // Notes directly under the root have no category directory.
        if entry.depth() < 2 {
            debug!("Skipping root-level file: {}", path.display());
            return false;
        }

        if !Validator::has_extension(path, &self.config.extension) {
            return false;
        }

        if self.classifier.is_summary_file(path) {
            debug!("Skipping summary document: {}", path.display());
            return false;
        }

        true
    }

    fn read(&self, entry: &DirEntry) -> Discovery {
        let path = entry.path();
        let relative_path = Validator::sanitize_file_path(
            &path
                .strip_prefix(&self.root)
                .unwrap_or(path)
                .to_string_lossy(),
        );

        let unreadable = |cause: FailureCause| {
            warn!("Cannot read {}: {}", relative_path, cause);
            Discovery::Unreadable(ExtractionFailure {
                path: relative_path.clone(),
                cause,
            })
        };

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                return unreadable(FailureCause::Unreadable {
                    message: e.to_string(),
                });
            }
        };

        let limit = (self.config.max_file_size_mb as u64) * 1_048_576;
        if limit > 0 && metadata.len() > limit {
            return unreadable(FailureCause::TooLarge {
                bytes: metadata.len(),
                limit,
            });
        }

        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) => {
                return unreadable(FailureCause::Unreadable {
                    message: e.to_string(),
                });
            }
        };

        let modified = metadata.modified().unwrap_or_else(|_| SystemTime::now());

        debug!("Discovered note: {}", relative_path);
        Discovery::Document(SourceDocument::new(
            path.to_path_buf(),
            relative_path,
            content,
            modified,
        ))
    }
}

impl Iterator for DocumentWalk {
    type Item = Discovery;

    fn next(&mut self) -> Option<Discovery> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    warn!("Skipping unreadable entry {}: {}", path.display(), err);
                    return Some(Discovery::Warning(DiscoveryWarning {
                        path,
                        message: err.to_string(),
                    }));
                }
            };

            if self.is_candidate(&entry) {
                return Some(self.read(&entry));
            }
        }
    }
}
