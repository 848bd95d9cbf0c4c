use unicode_normalization::UnicodeNormalization as _;

/// Normalizes text for comparisons.
///
/// Applies Unicode compatibility composition (NFKC), lowercases, and trims
/// surrounding whitespace. Fullwidth and halfwidth forms therefore compare
/// equal to their regular counterparts.
pub fn normalize(text: &str) -> String {
    let norm: String = text.nfkc().flat_map(char::to_lowercase).collect();
    match norm.trim() {
        trimmed if trimmed.len() == norm.len() => norm,
        trimmed => trimmed.to_owned(),
    }
}
