//! Locale-aware formatting of lists, numbers and dates.
//!
//! Locale rules are matched by the language subtag (`de` for `de-AT`), with
//! English rules as the fallback for anything unknown.

mod date;
mod list;
mod number;

pub use date::{DateStyle, format_date};
pub use list::format_list;
pub use number::{NumberOptions, NumberStyle, format_int, format_number};

/// Splits a locale code into its lowercased language and uppercased region.
fn split_locale(locale: &str) -> (String, Option<String>) {
    let mut parts = locale.split(['-', '_']);
    let language = parts.next().unwrap_or_default().to_ascii_lowercase();
    // skip script subtags, i.e. `zh-Hant-TW`
    let region = parts
        .find(|p| p.len() == 2 || p.bytes().all(|b| b.is_ascii_digit()))
        .map(str::to_ascii_uppercase);

    (language, region)
}
