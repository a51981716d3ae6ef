// file: src/parser/frontmatter.rs
// description: delimited metadata header extraction from notes
// reference: https://docs.rs/yaml-rust

use crate::extractor::patterns::HEADER_FIELD;
use std::collections::HashMap;
use tracing::debug;
use yaml_rust::{Yaml, YamlLoader};

const MARKER: &str = "---";

pub struct FrontmatterParser;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderSyntax {
    #[default]
    Yaml,
    /// YAML failed; fields were read one `key: value` line at a time.
    Lines,
}

#[derive(Debug, Clone, Default)]
pub struct Frontmatter {
    pub fields: HashMap<String, String>,
    pub tags: Vec<String>,
    pub syntax: HeaderSyntax,
}

impl Frontmatter {
    /// Non-empty, trimmed value of a scalar field. Keys are case-insensitive.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(&key.to_ascii_lowercase())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

impl FrontmatterParser {
    pub fn new() -> Self {
        Self
    }

    /// Splits a leading header block from the body.
    ///
    /// Returns `None` when the note does not open with the marker line or the
    /// block is never closed; the caller then treats the whole text as body.
    pub fn extract(&self, content: &str) -> Option<(Frontmatter, String)> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut lines = content.split_inclusive('\n');

        let first = lines.next()?;
        if first.trim_end() != MARKER {
            return None;
        }

        let header_start = first.len();
        let mut offset = header_start;

        for line in lines {
            if line.trim_end() == MARKER {
                let header = &content[header_start..offset];
                let body = &content[offset + line.len()..];
                return Some((self.parse_fields(header), body.to_string()));
            }
            offset += line.len();
        }

        debug!("Header block opened but never closed");
        None
    }

    pub fn parse_fields(&self, header: &str) -> Frontmatter {
        match YamlLoader::load_from_str(header) {
            Ok(docs) => match docs.into_iter().next() {
                None => Frontmatter::default(),
                Some(Yaml::Hash(hash)) => Self::from_yaml(hash),
                Some(_) => Self::from_lines(header),
            },
            Err(e) => {
                debug!("Header is not valid YAML ({}), reading lines", e);
                Self::from_lines(header)
            }
        }
    }

    fn from_yaml(hash: yaml_rust::yaml::Hash) -> Frontmatter {
        let mut frontmatter = Frontmatter::default();

        for (key, value) in hash {
            let Some(key) = yaml_scalar(&key) else {
                continue;
            };
            let key = key.to_ascii_lowercase();

            if key == "tags" {
                frontmatter.tags = match &value {
                    Yaml::Array(items) => items.iter().filter_map(yaml_scalar).collect(),
                    other => yaml_scalar(other)
                        .map(|raw| split_tag_list(&raw))
                        .unwrap_or_default(),
                };
                frontmatter.tags.retain(|t| !t.trim().is_empty());
                continue;
            }

            let value = match &value {
                Yaml::Array(items) => Some(
                    items
                        .iter()
                        .filter_map(yaml_scalar)
                        .collect::<Vec<_>>()
                        .join(", "),
                ),
                other => yaml_scalar(other),
            };

            if let Some(value) = value {
                frontmatter.fields.insert(key, value);
            }
        }

        frontmatter
    }

    fn from_lines(header: &str) -> Frontmatter {
        let mut frontmatter = Frontmatter {
            syntax: HeaderSyntax::Lines,
            ..Frontmatter::default()
        };

        for line in header.lines() {
            let Some(caps) = HEADER_FIELD.captures(line) else {
                continue;
            };
            let key = caps[1].to_ascii_lowercase();
            let value = unquote(&caps[2]);

            if key == "tags" {
                frontmatter.tags = split_tag_list(value);
            } else {
                frontmatter.fields.insert(key, value.to_string());
            }
        }

        frontmatter
    }
}

impl Default for FrontmatterParser {
    fn default() -> Self {
        Self::new()
    }
}

fn yaml_scalar(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) | Yaml::Real(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

fn unquote(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// `[a, "b", c]` or `a, b, c` -> `["a", "b", "c"]`
fn split_tag_list(raw: &str) -> Vec<String> {
    let inner = raw.trim().trim_start_matches('[').trim_end_matches(']');

    inner
        .split(',')
        .map(|tag| unquote(tag).to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}
