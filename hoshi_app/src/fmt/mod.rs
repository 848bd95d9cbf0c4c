//! Formatting helpers for Discord output.

use std::borrow::Cow;

pub mod content;

/// Truncates `text` to at most `len` characters.
///
/// If it's too long, the last kept character is replaced with `…`.
#[must_use]
pub fn truncate(text: &str, len: usize) -> Cow<'_, str> {
    if len == 0 {
        return Cow::Borrowed("");
    }

    match text.char_indices().nth(len - 1) {
        Some((cut, _)) if text[cut..].chars().nth(1).is_some() => {
            let mut out = String::with_capacity(cut + '…'.len_utf8());
            out.push_str(&text[..cut]);
            out.push('…');
            Cow::Owned(out)
        },
        _ => Cow::Borrowed(text),
    }
}
