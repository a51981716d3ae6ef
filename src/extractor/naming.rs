// file: src/extractor/naming.rs
// description: title casing, slugs and source links derived from names
// reference: https://docs.rs/urlencoding

use crate::extractor::patterns::SLUG_SEPARATOR;

/// Title-cases every whitespace-separated word: first letter upper, rest lower.
pub fn capitalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `my-first_post` -> `My First Post`
pub fn title_from_filename(stem: &str) -> String {
    capitalize_words(&stem.replace(['-', '_'], " "))
}

/// Lower-cased words joined by `-`. Letters outside ASCII are kept and
/// percent-encoded, so `Über Café` becomes `%C3%BCber-caf%C3%A9`.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let joined = SLUG_SEPARATOR.replace_all(&lowered, "-");
    urlencoding::encode(joined.trim_matches('-')).into_owned()
}

/// Joins the external base locator with a note's relative path, encoding
/// each segment so `#`, `?` and non-ASCII names stay part of the path.
pub fn reference_url(base_url: &str, relative_path: &str) -> String {
    let encoded: Vec<String> = relative_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("{}/{}", base_url.trim_end_matches('/'), encoded.join("/"))
}
