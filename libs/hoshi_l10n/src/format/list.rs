use std::fmt::{Display, Formatter, Result};

use super::split_locale;

/// How a locale joins items in natural speech.
#[derive(Debug, Clone, Copy)]
struct ListRules {
    /// Between items except the last two.
    mid: &'static str,
    /// Between the last two of three or more items.
    last: &'static str,
    /// Between exactly two items.
    once: &'static str,
    /// Appended when items are cut off.
    etc: &'static str,
}

impl ListRules {
    const EN: Self = Self {
        mid: ", ",
        last: ", and ",
        once: " and ",
        etc: ", etc.",
    };

    const DE: Self = Self {
        mid: ", ",
        last: " und ",
        once: " und ",
        etc: " usw.",
    };

    const JA: Self = Self {
        mid: "、",
        last: "と",
        once: "と",
        etc: "など",
    };

    const ZH: Self = Self {
        mid: "、",
        last: "和",
        once: "和",
        etc: "等",
    };

    fn for_locale(locale: &str) -> Self {
        match split_locale(locale).0.as_str() {
            "de" => Self::DE,
            "ja" => Self::JA,
            "zh" => Self::ZH,
            _ => Self::EN,
        }
    }
}

/// Joins items like in natural speech for the given locale.
///
/// - No items result in an empty string and one item is returned as is.
/// - Two items are joined with the locale's "and".
/// - Three or more are joined with the locale's separator, with the last one
///   attached by "and" (in English with an Oxford comma).
/// - With more than three items and more than `max_items`, only the first
///   `max_items` are joined by the separator, followed by the locale's "etc."
///   and without any "and". A `max_items` of 0 is treated as 1, so at least
///   one item is always shown before the suffix.
///
/// ```
/// use hoshi_l10n::format::format_list;
///
/// assert_eq!(format_list("en-US", &["A", "B", "C"], None), "A, B, and C");
/// assert_eq!(format_list("de", &["A", "B", "C"], None), "A, B und C");
/// assert_eq!(format_list("en-US", &["A", "B", "C", "D", "E"], Some(2)), "A, B, etc.");
/// ```
pub fn format_list<S>(locale: &str, items: &[S], max_items: Option<usize>) -> String
where
    S: AsRef<str>,
{
    let rules = ListRules::for_locale(locale);
    let items: Vec<&str> = items.iter().map(AsRef::as_ref).collect();

    match max_items {
        Some(max) if items.len() > 3 && items.len() > max => {
            let max = max.max(1);
            let mut out = Truncated { rules, items: &items[..max] }.to_string();
            out.push_str(rules.etc);
            out
        },
        _ => Natural { rules, items: &items }.to_string(),
    }
}

struct Natural<'a> {
    rules: ListRules,
    items: &'a [&'a str],
}

impl Display for Natural<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.items {
            [] => Ok(()),
            [one] => f.write_str(one),
            [first, last] => {
                f.write_str(first)?;
                f.write_str(self.rules.once)?;
                f.write_str(last)
            },
            [first, mid @ .., last] => {
                f.write_str(first)?;

                for part in mid {
                    f.write_str(self.rules.mid)?;
                    f.write_str(part)?;
                }

                f.write_str(self.rules.last)?;
                f.write_str(last)
            },
        }
    }
}

struct Truncated<'a> {
    rules: ListRules,
    items: &'a [&'a str],
}

impl Display for Truncated<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let mut iter = self.items.iter();
        if let Some(first) = iter.next() {
            f.write_str(first)?;
            for part in iter {
                f.write_str(self.rules.mid)?;
                f.write_str(part)?;
            }
        }

        Ok(())
    }
}
