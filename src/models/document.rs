// file: src/models/document.rs
// description: raw note as read from disk, before metadata extraction
// reference: internal data structures

use chrono::{DateTime, Local, NaiveDate};
use std::path::PathBuf;
use std::time::SystemTime;

/// One discovered note. Built by the locator, consumed once by the extractor.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    /// Path relative to the root, always with `/` separators.
    pub relative_path: String,
    pub content: Vec<u8>,
    pub modified: SystemTime,
}

impl SourceDocument {
    pub fn new(
        path: PathBuf,
        relative_path: String,
        content: Vec<u8>,
        modified: SystemTime,
    ) -> Self {
        Self {
            path,
            relative_path,
            content,
            modified,
        }
    }

    /// Modification time truncated to a calendar date in local time.
    pub fn modified_date(&self) -> NaiveDate {
        DateTime::<Local>::from(self.modified).date_naive()
    }

    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path)
    }

    pub fn file_stem(&self) -> &str {
        let name = self.file_name();
        match name.rfind('.') {
            Some(idx) if idx > 0 => &name[..idx],
            _ => name,
        }
    }
}
