// file: src/parser/normalizer.rs
// description: total text transforms that turn a note body into preview text
// reference: commonmark inline syntax

use crate::extractor::patterns::{
    ANY_HEADING, BOLD_STAR, BOLD_UNDERSCORE, INLINE_CODE, ITALIC_STAR, ITALIC_UNDERSCORE, LINK,
    STRIKETHROUGH,
};
use crate::parser::MarkdownParser;
use crate::utils::Validator;

pub const PREVIEW_LINES: usize = 3;
pub const PREVIEW_MAX_CHARS: usize = 200;

pub struct MarkdownNormalizer {
    parser: MarkdownParser,
}

impl MarkdownNormalizer {
    pub fn new() -> Self {
        Self {
            parser: MarkdownParser::new(),
        }
    }

    /// Builds the bounded preview excerpt for a note body.
    pub fn preview(&self, body: &str) -> String {
        let without_title = self.strip_title_heading(body);
        let without_code = self.strip_fenced_code(&without_title);

        let lines: Vec<String> = without_code
            .lines()
            .map(|line| self.strip_inline_markup(&self.links_to_text(line)))
            .collect();

        let joined = self.leading_lines(&lines, PREVIEW_LINES).join(" ");
        Validator::truncate_text(&joined, PREVIEW_MAX_CHARS)
    }

    /// Removes the first top-level heading line, which is the title.
    pub fn strip_title_heading(&self, content: &str) -> String {
        let lines = self.parser.lines(content);
        let skip = self.parser.first_heading_index(&lines);

        lines
            .iter()
            .enumerate()
            .filter(|(idx, _)| Some(*idx) != skip)
            .map(|(_, line)| line.text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Drops fenced code blocks, fence lines included. An unclosed fence
    /// swallows the rest of the text.
    pub fn strip_fenced_code(&self, content: &str) -> String {
        self.parser
            .lines(content)
            .iter()
            .filter(|line| !line.in_code)
            .map(|line| line.text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `[text](url)` and `![alt](src)` become their visible text.
    pub fn links_to_text(&self, content: &str) -> String {
        LINK.replace_all(content, "$1").into_owned()
    }

    pub fn strip_inline_markup(&self, content: &str) -> String {
        let mut text = INLINE_CODE.replace_all(content, "$1").into_owned();
        for pattern in [
            &*BOLD_STAR,
            &*BOLD_UNDERSCORE,
            &*STRIKETHROUGH,
            &*ITALIC_STAR,
            &*ITALIC_UNDERSCORE,
        ] {
            text = pattern.replace_all(&text, "$1").into_owned();
        }
        text.replace('`', "")
    }

    /// First `count` non-empty lines, skipping sub-headings.
    pub fn leading_lines(&self, lines: &[String], count: usize) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty() && !ANY_HEADING.is_match(line))
            .take(count)
            .map(str::to_string)
            .collect()
    }
}

impl Default for MarkdownNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preview_skips_title_and_code() {
        let normalizer = MarkdownNormalizer::new();
        let body = "# Title\n\nFirst line.\n\n```rust\nfn main() {}\n```\n\nSecond **bold** line.\n## Section\nThird [link](https://x.y) line.\nFourth line.";

        assert_eq!(
            normalizer.preview(body),
            "First line. Second bold line. Third link line."
        );
    }

    #[test]
    fn test_preview_bound() {
        let normalizer = MarkdownNormalizer::new();
        let body = "word ".repeat(100);
        let preview = normalizer.preview(&body);

        assert_eq!(preview.chars().count(), 200);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_preview_exactly_at_limit_is_kept() {
        let normalizer = MarkdownNormalizer::new();
        let body = "x".repeat(200);
        assert_eq!(normalizer.preview(&body), body);
    }

    #[test]
    fn test_preview_of_empty_body() {
        let normalizer = MarkdownNormalizer::new();
        assert_eq!(normalizer.preview(""), "");
        assert_eq!(normalizer.preview("# Only a title\n\n"), "");
    }

    #[test]
    fn test_strip_title_heading_only_first() {
        let normalizer = MarkdownNormalizer::new();
        assert_eq!(
            normalizer.strip_title_heading("# One\ntext\n# Two"),
            "text\n# Two"
        );
    }

    #[test]
    fn test_strip_fenced_code() {
        let normalizer = MarkdownNormalizer::new();
        assert_eq!(
            normalizer.strip_fenced_code("a\n```\ncode\n```\nb\n~~~\nunclosed"),
            "a\nb"
        );
    }

    #[test]
    fn test_links_to_text() {
        let normalizer = MarkdownNormalizer::new();
        assert_eq!(
            normalizer.links_to_text("See [the docs](https://d.io) and ![logo](l.png)."),
            "See the docs and logo."
        );
    }

    #[test]
    fn test_strip_inline_markup() {
        let normalizer = MarkdownNormalizer::new();
        assert_eq!(
            normalizer.strip_inline_markup("Use `git rebase -i`, **never** _force_ ~~push~~ *blindly*."),
            "Use git rebase -i, never force push blindly."
        );
        assert_eq!(
            normalizer.strip_inline_markup("keep snake_case_names and 2 * 3 * 4"),
            "keep snake_case_names and 2 * 3 * 4"
        );
    }
}
