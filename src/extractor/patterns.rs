// file: src/extractor/patterns.rs
// description: compiled regex patterns for note metadata and preview text
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Headings and blocks
    pub static ref TOP_HEADING: Regex = Regex::new(
        r"^#[ \t]+(.+)$"
    ).expect("TOP_HEADING regex is valid");

    pub static ref ANY_HEADING: Regex = Regex::new(
        r"^#{1,6}(?:[ \t]|$)"
    ).expect("ANY_HEADING regex is valid");

    pub static ref CODE_FENCE: Regex = Regex::new(
        r"^(?:```|~~~)"
    ).expect("CODE_FENCE regex is valid");

    // Inline markup
    pub static ref LINK: Regex = Regex::new(
        r"!?\[([^\]]*)\]\([^)]*\)"
    ).expect("LINK regex is valid");

    pub static ref INLINE_CODE: Regex = Regex::new(
        r"`+([^`]*)`+"
    ).expect("INLINE_CODE regex is valid");

    pub static ref BOLD_STAR: Regex = Regex::new(
        r"\*\*([^*]+)\*\*"
    ).expect("BOLD_STAR regex is valid");

    pub static ref BOLD_UNDERSCORE: Regex = Regex::new(
        r"__([^_]+)__"
    ).expect("BOLD_UNDERSCORE regex is valid");

    pub static ref ITALIC_STAR: Regex = Regex::new(
        r"\*([^*\s][^*]*)\*"
    ).expect("ITALIC_STAR regex is valid");

    pub static ref ITALIC_UNDERSCORE: Regex = Regex::new(
        r"\b_([^_]+)_\b"
    ).expect("ITALIC_UNDERSCORE regex is valid");

    pub static ref STRIKETHROUGH: Regex = Regex::new(
        r"~~([^~]+)~~"
    ).expect("STRIKETHROUGH regex is valid");

    // Header lines and identifiers
    pub static ref HEADER_FIELD: Regex = Regex::new(
        r"^\s*([A-Za-z0-9_-]+)\s*:\s*(.*?)\s*$"
    ).expect("HEADER_FIELD regex is valid");

    pub static ref SLUG_SEPARATOR: Regex = Regex::new(
        r"[^\p{L}\p{N}]+"
    ).expect("SLUG_SEPARATOR regex is valid");
}
