//! Text normalization shared by the matchers.

/// Lowercases and trims a value before it is queried.
pub fn normalize_text(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Reduces a normalized value to the characters that take part in gram
/// extraction: ASCII alphanumerics, Latin-1 and Latin Extended-A letters,
/// commas and spaces.
pub(crate) fn gram_alphabet(normalized: &str) -> String {
    normalized
        .chars()
        .filter(|&c| {
            c.is_ascii_alphanumeric()
                || ('\u{00C0}'..='\u{017F}').contains(&c)
                || c == ','
                || c == ' '
        })
        .collect()
}
