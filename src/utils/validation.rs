// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(PipelineError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(PipelineError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn has_extension(path: &Path, extension: &str) -> bool {
        let wanted = extension.trim_start_matches('.');
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PipelineError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    /// Normalizes separators only. Surrounding whitespace is part of a
    /// file name and is kept.
    pub fn sanitize_file_path(path: &str) -> String {
        let mut cleaned = path.replace('\\', "/");
        while cleaned.contains("//") {
            cleaned = cleaned.replace("//", "/");
        }
        cleaned.trim_start_matches("./").to_string()
    }

    /// Truncates on character boundaries; the ellipsis counts toward `max_length`.
    pub fn truncate_text(text: &str, max_length: usize) -> String {
        if text.chars().count() <= max_length {
            return text.to_string();
        }
        let keep = max_length.saturating_sub(3);
        let mut truncated: String = text.chars().take(keep).collect();
        truncated.push_str("...");
        truncated
    }
}
