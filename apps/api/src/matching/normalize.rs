//! Text normalization shared by every matcher in the pipeline.

/// Reduces raw text to the canonical form used for dictionary matching.
///
/// Lowercases, drops bullet glyphs, replaces everything outside
/// `[a-z0-9+.-]` and whitespace with a space, then collapses whitespace
/// (newlines included) to single spaces and trims.
pub fn normalize_text(raw: &str) -> String {
    let cleaned: String = raw
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '+' | '.' | '-' => c,
            // bullets, whitespace and everything else
            _ => ' ',
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
