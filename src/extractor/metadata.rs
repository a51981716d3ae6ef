// file: src/extractor/metadata.rs
// description: turns one source note into a normalized record via layered fallbacks
// reference: header -> heading -> filename title chain, header -> mtime date chain

use crate::config::Config;
use crate::extractor::dates::parse_header_date;
use crate::extractor::naming::{reference_url, slugify, title_from_filename};
use crate::models::{
    DateParseWarning, ExtractionFailure, FailureCause, PostDate, Record, SourceDocument,
};
use crate::parser::{
    Frontmatter, FrontmatterParser, HeaderSyntax, MarkdownNormalizer, MarkdownParser,
};
use crate::repository::FileClassifier;
use chrono::NaiveDateTime;
use tracing::{debug, warn};

const DEFAULT_CATEGORY: &str = "General";

/// A record plus any data-quality notes raised while building it.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub record: Record,
    pub warnings: Vec<DateParseWarning>,
}

pub struct MetadataExtractor {
    base_url: String,
    processed_at: NaiveDateTime,
    frontmatter: FrontmatterParser,
    parser: MarkdownParser,
    normalizer: MarkdownNormalizer,
    classifier: FileClassifier,
}

impl MetadataExtractor {
    /// `processed_at` stands in for header dates that cannot be parsed.
    pub fn new(config: &Config, processed_at: NaiveDateTime) -> Self {
        Self {
            base_url: config.site.base_url.clone(),
            processed_at,
            frontmatter: FrontmatterParser::new(),
            parser: MarkdownParser::new(),
            normalizer: MarkdownNormalizer::new(),
            classifier: FileClassifier::new(config.source.readme_name.clone()),
        }
    }

    pub fn extract(&self, doc: &SourceDocument) -> Result<Extraction, ExtractionFailure> {
        let failure = |cause: FailureCause| ExtractionFailure {
            path: doc.relative_path.clone(),
            cause,
        };

        let text = std::str::from_utf8(&doc.content).map_err(|_| failure(FailureCause::NotUtf8))?;

        let (header, body) = self
            .frontmatter
            .extract(text)
            .unwrap_or_else(|| (Frontmatter::default(), text.to_string()));

        if header.syntax == HeaderSyntax::Lines {
            warn!(
                "Header of {} is not valid YAML, read as key: value lines",
                doc.relative_path
            );
        }

        let title = self
            .resolve_title(&header, &body, doc)
            .ok_or_else(|| failure(FailureCause::EmptyTitle))?;

        let mut warnings = Vec::new();
        let date = self.resolve_date(&header, doc, &mut warnings);

        let category = self
            .classifier
            .extract_category(&doc.relative_path)
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        let slug = Some(slugify(&title))
            .filter(|s| !s.is_empty())
            .or_else(|| Some(slugify(doc.file_stem())).filter(|s| !s.is_empty()))
            .unwrap_or_else(|| slugify(&doc.relative_path));

        let record = Record {
            slug,
            date,
            category,
            tags: header.tags.clone(),
            preview: self.normalizer.preview(&body),
            url: reference_url(&self.base_url, &doc.relative_path),
            path: doc.relative_path.clone(),
            title,
        };

        debug!(
            "Extracted '{}' from {} ({} precision date)",
            record.title,
            doc.relative_path,
            record.date.precision().as_str()
        );
        Ok(Extraction { record, warnings })
    }

    fn resolve_title(
        &self,
        header: &Frontmatter,
        body: &str,
        doc: &SourceDocument,
    ) -> Option<String> {
        if let Some(title) = header.get("title") {
            return Some(title.to_string());
        }

        let from_heading = self.parser.first_heading(body).map(|heading| {
            let plain = self.normalizer.links_to_text(&heading);
            self.normalizer.strip_inline_markup(&plain).trim().to_string()
        });
        if let Some(title) = from_heading.filter(|t| !t.is_empty()) {
            return Some(title);
        }

        Some(title_from_filename(doc.file_stem())).filter(|t| !t.is_empty())
    }

    fn resolve_date(
        &self,
        header: &Frontmatter,
        doc: &SourceDocument,
        warnings: &mut Vec<DateParseWarning>,
    ) -> PostDate {
        let Some(raw) = header.get("date") else {
            return PostDate::Day(doc.modified_date());
        };

        match parse_header_date(raw) {
            Some(date) => date,
            None => {
                warn!(
                    "Unrecognized date '{}' in {}, using processing time",
                    raw, doc.relative_path
                );
                warnings.push(DateParseWarning {
                    path: doc.relative_path.clone(),
                    value: raw.to_string(),
                });
                PostDate::Second(self.processed_at)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DatePrecision;
    use chrono::{Local, NaiveDate, Timelike};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};

    fn processed_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn extractor() -> MetadataExtractor {
        let mut config = Config::default_config();
        config.site.base_url = "https://github.com/u/til/blob/main".to_string();
        MetadataExtractor::new(&config, processed_at())
    }

    fn doc(relative_path: &str, content: &str) -> SourceDocument {
        SourceDocument::new(
            PathBuf::from(relative_path),
            relative_path.to_string(),
            content.as_bytes().to_vec(),
            SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000),
        )
    }

    #[test]
    fn test_filename_fallback_chain() {
        let source = doc("Linux/my-first-post.md", "Plain text without any heading.\n");
        let record = extractor().extract(&source).unwrap().record;

        assert_eq!(record.title, "My First Post");
        assert_eq!(record.category, "Linux");
        assert_eq!(record.date, PostDate::Day(source.modified_date()));
        assert_eq!(record.date.precision(), DatePrecision::Day);
        assert_eq!(record.slug, "my-first-post");
        assert_eq!(
            record.url,
            "https://github.com/u/til/blob/main/Linux/my-first-post.md"
        );
        assert_eq!(record.preview, "Plain text without any heading.");
    }

    #[test]
    fn test_header_fields_win() {
        let source = doc(
            "rust/ownership.md",
            "---\ntitle: Borrowing Rules\ndate: 2024-03-05 14:30:00\ntags: [rust, memory]\n---\n# Ignored Heading\n\nOne owner at a time.\n",
        );
        let record = extractor().extract(&source).unwrap().record;

        assert_eq!(record.title, "Borrowing Rules");
        assert_eq!(record.category, "Rust");
        assert_eq!(record.tags, vec!["rust", "memory"]);
        assert_eq!(record.date.to_string(), "2024-03-05 14:30:00");
        assert_eq!(record.preview, "One owner at a time.");
        assert_eq!(record.slug, "borrowing-rules");
    }

    #[test]
    fn test_heading_title_fallback() {
        let source = doc(
            "Git/rebase.md",
            "---\ndate: 2024-03-05\n---\n# Interactive **Rebase**\n\nSquash commits.",
        );
        let record = extractor().extract(&source).unwrap().record;

        assert_eq!(record.title, "Interactive Rebase");
        assert_eq!(
            record.date,
            PostDate::Day(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
        );
        assert_eq!(record.preview, "Squash commits.");
    }

    #[test]
    fn test_bad_date_falls_back_to_processing_time() {
        let source = doc("Go/maps.md", "---\ndate: not-a-date\n---\n# Maps\n");
        let extraction = extractor().extract(&source).unwrap();

        assert_eq!(extraction.record.date, PostDate::Second(processed_at()));
        assert_eq!(extraction.record.date.as_datetime().hour(), 12);
        assert_eq!(extraction.warnings.len(), 1);
        assert_eq!(extraction.warnings[0].value, "not-a-date");
        assert_eq!(extraction.warnings[0].path, "Go/maps.md");
    }

    #[test]
    fn test_malformed_header_is_not_fatal() {
        let source = doc(
            "Docker/volumes.md",
            "---\ntitle: Volumes: bind vs named\n  - broken: [\n---\nBody text.",
        );
        let record = extractor().extract(&source).unwrap().record;

        assert_eq!(record.title, "Volumes: bind vs named");
        assert_eq!(record.preview, "Body text.");
    }

    #[test]
    fn test_invalid_utf8_is_a_failure() {
        let mut source = doc("Misc/binary.md", "");
        source.content = vec![0xff, 0xfe, 0x00, 0x80];

        let failure = extractor().extract(&source).unwrap_err();
        assert_eq!(failure.path, "Misc/binary.md");
        assert_eq!(failure.cause, FailureCause::NotUtf8);
    }

    #[test]
    fn test_empty_title_is_a_failure() {
        let source = doc("Misc/___.md", "no heading here");
        let failure = extractor().extract(&source).unwrap_err();
        assert_eq!(failure.cause, FailureCause::EmptyTitle);
    }

    #[test]
    fn test_non_ascii_title_keeps_its_slug() {
        let source = doc("Notes/kana-notes.md", "# ひらがな\n");
        let record = extractor().extract(&source).unwrap().record;
        assert_eq!(record.title, "ひらがな");
        assert_eq!(record.slug, "%E3%81%B2%E3%82%89%E3%81%8C%E3%81%AA");
    }

    #[test]
    fn test_symbol_title_gets_stem_slug() {
        let source = doc("Cpp/operators.md", "# ++ --\n");
        let record = extractor().extract(&source).unwrap().record;
        assert_eq!(record.title, "++ --");
        assert_eq!(record.slug, "operators");
    }

    #[test]
    fn test_root_level_note_gets_default_category() {
        let source = doc("loose.md", "# Loose");
        let record = extractor().extract(&source).unwrap().record;
        assert_eq!(record.category, "General");
    }

    #[test]
    fn test_modified_date_is_local_calendar_day() {
        let source = doc("Linux/a.md", "text");
        let expected = chrono::DateTime::<Local>::from(source.modified).date_naive();
        let record = extractor().extract(&source).unwrap().record;
        assert_eq!(record.date.date(), expected);
    }
}
