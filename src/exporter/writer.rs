// file: src/exporter/writer.rs
// description: atomic artifact persistence via temp file and rename
// reference: https://docs.rs/tempfile

use crate::error::{PipelineError, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| PipelineError::Persistence {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    /// Replaces `file_name` in the output directory. Readers see either the
    /// old or the new contents, never a partial write.
    pub fn write(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
        let target = self.output_dir.join(file_name);
        let persistence = |source: std::io::Error| PipelineError::Persistence {
            path: target.clone(),
            source,
        };

        let mut temp = NamedTempFile::new_in(&self.output_dir).map_err(persistence)?;
        temp.write_all(contents.as_bytes()).map_err(persistence)?;
        temp.as_file().sync_all().map_err(persistence)?;
        temp.persist(&target).map_err(|e| persistence(e.error))?;

        info!("Wrote {} ({} bytes)", target.display(), contents.len());
        Ok(target)
    }
}
