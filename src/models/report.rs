// file: src/models/report.rs
// description: per-document issues and the summary returned by a pipeline run
// reference: internal data structures

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A directory (or walk entry) that could not be listed.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryWarning {
    pub path: PathBuf,
    pub message: String,
}

/// A header date that matched none of the accepted formats.
#[derive(Debug, Clone, Serialize)]
pub struct DateParseWarning {
    pub path: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureCause {
    Unreadable { message: String },
    NotUtf8,
    TooLarge { bytes: u64, limit: u64 },
    EmptyTitle,
    /// The extraction task itself died (e.g. panicked).
    Aborted { message: String },
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::Unreadable { message } => write!(f, "unreadable: {}", message),
            FailureCause::NotUtf8 => write!(f, "content is not valid UTF-8"),
            FailureCause::TooLarge { bytes, limit } => {
                write!(f, "file too large ({} bytes, limit {})", bytes, limit)
            }
            FailureCause::EmptyTitle => write!(f, "no usable title"),
            FailureCause::Aborted { message } => write!(f, "extraction aborted: {}", message),
        }
    }
}

/// A document that produced no record. Excluded from the aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionFailure {
    pub path: String,
    pub cause: FailureCause,
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.cause)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub documents_discovered: usize,
    pub records_extracted: usize,
    pub failures: Vec<ExtractionFailure>,
    pub discovery_warnings: Vec<DiscoveryWarning>,
    pub date_warnings: Vec<DateParseWarning>,
    pub categories: Vec<String>,
    pub index_path: PathBuf,
    pub page_path: PathBuf,
    pub duration_ms: u64,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_issues(&self) -> bool {
        !self.failures.is_empty()
            || !self.discovery_warnings.is_empty()
            || !self.date_warnings.is_empty()
    }

    pub fn success_rate(&self) -> f64 {
        if self.documents_discovered == 0 {
            return 0.0;
        }
        (self.records_extracted as f64 / self.documents_discovered as f64) * 100.0
    }
}
