// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub site: SiteConfig,
    pub listing: ListingConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    pub root: PathBuf,
    /// Note extension without the leading dot.
    pub extension: String,
    /// Generated summary document, never treated as a note (case-insensitive).
    pub readme_name: String,
    /// Infrastructure directories skipped in addition to hidden ones.
    pub skip_dirs: Vec<String>,
    pub max_file_size_mb: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Defaults to the source root when unset.
    pub dir: Option<PathBuf>,
    pub index_file: String,
    pub page_file: String,
    pub pretty: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub tagline: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListingConfig {
    pub recent_limit: usize,
    pub category_limit: usize,
    pub popular_tags: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub parallel_workers: usize,
    pub show_progress: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extension: "md".to_string(),
            readme_name: "README.md".to_string(),
            skip_dirs: vec![
                "node_modules".to_string(),
                "target".to_string(),
                "assets".to_string(),
            ],
            max_file_size_mb: 10,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            index_file: "posts.json".to_string(),
            page_file: "README.md".to_string(),
            pretty: true,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Today I Learned (TIL)".to_string(),
            tagline: "A collection of things I learn every day across a variety of languages and technologies.".to_string(),
            base_url: "https://github.com/user/til/blob/main".to_string(),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            recent_limit: 5,
            category_limit: 3,
            popular_tags: 10,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parallel_workers: 4,
            show_progress: true,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("NOTES_DIGEST")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self::default()
    }

    /// Directory the two artifacts are written to for a run over `root`.
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        self.output
            .dir
            .clone()
            .unwrap_or_else(|| root.to_path_buf())
    }

    pub fn validate(&self) -> Result<()> {
        if self.pipeline.parallel_workers == 0 {
            return Err(PipelineError::Config(
                "parallel_workers must be greater than 0".to_string(),
            ));
        }

        if self.source.extension.trim_start_matches('.').is_empty() {
            return Err(PipelineError::Config(
                "source extension must not be empty".to_string(),
            ));
        }

        if self.listing.recent_limit == 0 || self.listing.category_limit == 0 {
            return Err(PipelineError::Config(
                "listing limits must be greater than 0".to_string(),
            ));
        }

        if self.output.index_file.is_empty() || self.output.page_file.is_empty() {
            return Err(PipelineError::Config(
                "output file names must not be empty".to_string(),
            ));
        }

        Validator::validate_url(&self.site.base_url)
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        Ok(())
    }
}
