// file: src/parser/markdown.rs
// description: line-oriented markdown scanning that respects fenced code
// reference: CommonMark fenced code blocks and ATX headings

use crate::extractor::patterns::{CODE_FENCE, TOP_HEADING};

pub struct MarkdownParser;

/// A body line tagged with whether it belongs to a fenced code block
/// (fence lines included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub text: &'a str,
    pub in_code: bool,
}

impl MarkdownParser {
    pub fn new() -> Self {
        Self
    }

    pub fn lines<'a>(&self, content: &'a str) -> Vec<Line<'a>> {
        let mut in_fence = false;
        content
            .lines()
            .map(|text| {
                if CODE_FENCE.is_match(text.trim_start()) {
                    in_fence = !in_fence;
                    Line {
                        text,
                        in_code: true,
                    }
                } else {
                    Line {
                        text,
                        in_code: in_fence,
                    }
                }
            })
            .collect()
    }

    /// Index of the first `# ` heading outside code blocks.
    pub fn first_heading_index(&self, lines: &[Line<'_>]) -> Option<usize> {
        lines
            .iter()
            .position(|line| !line.in_code && TOP_HEADING.is_match(line.text.trim()))
    }

    /// Text of the first top-level heading, with closing hashes removed.
    pub fn first_heading(&self, content: &str) -> Option<String> {
        let lines = self.lines(content);
        let index = self.first_heading_index(&lines)?;
        let caps = TOP_HEADING.captures(lines[index].text.trim())?;
        let text = caps[1].trim().trim_end_matches('#').trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}
