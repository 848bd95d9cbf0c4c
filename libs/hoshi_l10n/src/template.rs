use std::borrow::Cow;
use std::sync::Arc;

use time::OffsetDateTime;

use crate::format::{self, DateStyle, NumberOptions, NumberStyle};
use crate::key::ResourceKey;
use crate::store::ResourceStore;

/// A replacement value for a template placeholder.
///
/// Numbers are formatted for the target locale before substitution.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg<'a> {
    Text(Cow<'a, str>),
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl Arg<'_> {
    fn render(&self, locale: &str) -> Cow<'_, str> {
        let style = NumberStyle::from(locale);
        match self {
            Self::Text(text) => Cow::Borrowed(text.as_ref()),
            Self::Int(n) => Cow::Owned(format::format_int(style, i128::from(*n))),
            Self::Uint(n) => Cow::Owned(format::format_int(style, i128::from(*n))),
            Self::Float(n) => Cow::Owned(format::format_number(style, *n, NumberOptions::default())),
        }
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

impl From<String> for Arg<'_> {
    fn from(value: String) -> Self {
        Self::Text(Cow::Owned(value))
    }
}

macro_rules! impl_from_num {
    ($($ty:ty => $variant:ident($as:ty)),* $(,)?) => { $(
        impl From<$ty> for Arg<'_> {
            fn from(value: $ty) -> Self {
                Self::$variant(<$as>::from(value))
            }
        }
    )* };
}

impl_from_num!(
    i8 => Int(i64), i16 => Int(i64), i32 => Int(i64), i64 => Int(i64),
    u8 => Uint(u64), u16 => Uint(u64), u32 => Uint(u64), u64 => Uint(u64),
    f32 => Float(f64), f64 => Float(f64),
);

impl From<usize> for Arg<'_> {
    fn from(value: usize) -> Self {
        Self::Uint(u64::try_from(value).unwrap_or(u64::MAX))
    }
}

/// Turns resource templates into display text.
#[derive(Debug, Clone)]
pub struct Templater {
    store: Arc<ResourceStore>,
}

impl Templater {
    #[must_use]
    pub fn new(store: Arc<ResourceStore>) -> Self {
        Self { store }
    }

    /// Fetches the template at `key` and substitutes `pairs` into it.
    ///
    /// A missing key or a value that isn't a string results in an empty
    /// string.
    ///
    /// See [`Templater::substitute`] for the substitution rules.
    #[must_use]
    pub fn format(&self, locale: &str, key: &ResourceKey, pairs: &[(&str, Arg<'_>)]) -> String {
        let res = self.store.snapshot();
        match res.get(locale, key).and_then(|v| v.as_str()) {
            Some(template) => self.substitute(locale, template, pairs),
            None => {
                log::trace!("no template for {key} in {locale}");
                String::new()
            },
        }
    }

    /// Replaces every occurrence of each placeholder with its value.
    ///
    /// Pairs are applied in order and replacement is literal, so a later
    /// placeholder also matches text substituted by an earlier pair.
    #[must_use]
    pub fn substitute(&self, locale: &str, template: &str, pairs: &[(&str, Arg<'_>)]) -> String {
        let mut out = template.to_owned();
        for (token, arg) in pairs {
            if out.contains(*token) {
                out = out.replace(*token, &arg.render(locale));
            }
        }

        out
    }

    /// See [`format::format_list`].
    #[must_use]
    pub fn format_list<S: AsRef<str>>(&self, locale: &str, items: &[S], max_items: Option<usize>) -> String {
        format::format_list(locale, items, max_items)
    }

    /// See [`format::format_number`]. `locale` may be the pseudo-locale `"SI"`.
    #[must_use]
    pub fn format_number(&self, locale: &str, value: f64, options: NumberOptions) -> String {
        format::format_number(NumberStyle::from(locale), value, options)
    }

    /// See [`format::format_date`]. `locale` may be the pseudo-locale `"ISO"`.
    #[must_use]
    pub fn format_date(&self, locale: &str, date: OffsetDateTime) -> String {
        format::format_date(DateStyle::from(locale), date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Resources;

    const GREETING: ResourceKey = ResourceKey::from_static("greeting");

    fn templater() -> Templater {
        let text = r#"{
            "version": "1",
            "locales": ["en-US", "de"],
            "en-US": {
                "greeting": "Hello {NAME}",
                "count": "{NAME} has {COUNT} points, {NAME}!",
                "record": { "title": "x" }
            },
            "de": {
                "count": "{NAME} hat {COUNT} Punkte"
            }
        }"#;

        let res = Resources::parse(text, "en-US").expect("test resources must be valid");
        Templater::new(Arc::new(ResourceStore::with_resources(res)))
    }

    #[test]
    fn format_substitutes() {
        let t = templater();
        assert_eq!(t.format("en-US", &GREETING, &[("{NAME}", "Ann".into())]), "Hello Ann");
    }

    #[test]
    fn format_falls_back() {
        let t = templater();
        assert_eq!(t.format("de", &GREETING, &[("{NAME}", "Ann".into())]), "Hello Ann");
    }

    #[test]
    fn format_missing_is_empty() {
        let t = templater();
        let missing = ResourceKey::from_static("missing");
        assert_eq!(t.format("en-US", &missing, &[]), "");

        let record = ResourceKey::from_static("record");
        assert_eq!(t.format("en-US", &record, &[]), "");
    }

    #[test]
    fn format_replaces_all_and_numbers() {
        let t = templater();
        let count = ResourceKey::from_static("count");
        let pairs = [("{NAME}", Arg::from("Bo")), ("{COUNT}", Arg::from(12_345_u32))];

        assert_eq!(t.format("en-US", &count, &pairs), "Bo has 12,345 points, Bo!");
        assert_eq!(t.format("de", &count, &pairs), "Bo hat 12.345 Punkte");
    }

    #[test]
    fn substitute_in_order() {
        let t = templater();
        let pairs = [("{A}", Arg::from("{B}")), ("{B}", Arg::from("x"))];
        assert_eq!(t.substitute("en-US", "{A} {B}", &pairs), "x x");

        let floats = [("{V}", Arg::from(1234.5_f64)), ("{N}", Arg::from(-7_i32))];
        assert_eq!(t.substitute("SI", "{V} {N}", &floats), "1\u{202F}234.5 -7");
    }

    #[test]
    fn formatting_helpers() {
        let t = templater();
        assert_eq!(t.format_list("en-US", &["a", "b"], None), "a and b");
        assert_eq!(t.format_number("de", 0.5, NumberOptions::fixed(2)), "0,50");

        let date = OffsetDateTime::from_unix_timestamp(1_672_876_800).expect("timestamp must be valid");
        assert_eq!(t.format_date("ISO", date), "2023-01-05");
        assert_eq!(t.format_date("ja", date), "2023/01/05");
    }
}
