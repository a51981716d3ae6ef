// file: src/repository/classifier.rs
// description: category derivation and summary-file detection from note paths
// reference: path-based classification

use crate::extractor::naming::capitalize_words;
use std::path::Path;

pub struct FileClassifier {
    readme_name: String,
}

impl FileClassifier {
    pub fn new(readme_name: String) -> Self {
        Self { readme_name }
    }

    /// Category of a note: its top-level directory, title-cased.
    /// Returns `None` for paths with no directory component.
    pub fn extract_category(&self, relative_path: &str) -> Option<String> {
        let mut parts = relative_path.split('/').filter(|p| !p.is_empty());
        let first = parts.next()?;
        parts.next()?;
        let category = capitalize_words(first);
        if category.is_empty() {
            None
        } else {
            Some(category)
        }
    }

    /// The generated summary document must never be read back as a note.
    pub fn is_summary_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.eq_ignore_ascii_case(&self.readme_name))
    }
}

impl Default for FileClassifier {
    fn default() -> Self {
        Self::new("README.md".to_string())
    }
}
