use time::{OffsetDateTime, UtcOffset};

use super::split_locale;

/// Selects how [`format_date`] prints a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle<'a> {
    /// `YYYY-MM-DD`.
    Iso,
    /// The medium date format of a locale.
    Locale(&'a str),
}

impl<'a> From<&'a str> for DateStyle<'a> {
    /// Maps the pseudo-locale `"ISO"` to [`DateStyle::Iso`] and anything else
    /// to [`DateStyle::Locale`].
    fn from(value: &'a str) -> Self {
        if value.eq_ignore_ascii_case("iso") {
            Self::Iso
        } else {
            Self::Locale(value)
        }
    }
}

const EN_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const FR_MONTHS: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.", "déc.",
];

const ES_MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Formats the date part of `date` in UTC.
///
/// English locales without a region or with the `US` region use the
/// `Jan 5, 2023` pattern, while other English regions use `5 Jan 2023`.
/// Unknown languages are formatted like `en-US`.
///
/// ```
/// use hoshi_l10n::format::{DateStyle, format_date};
///
/// let date = time::OffsetDateTime::from_unix_timestamp(1_672_876_800).unwrap();
/// assert_eq!(format_date(DateStyle::Iso, date), "2023-01-05");
/// assert_eq!(format_date(DateStyle::Locale("de"), date), "05.01.2023");
/// ```
#[must_use]
pub fn format_date(style: DateStyle<'_>, date: OffsetDateTime) -> String {
    let date = date.to_offset(UtcOffset::UTC).date();
    let year = date.year();
    let month = u8::from(date.month());
    let day = date.day();
    let month_index = usize::from(month - 1);

    let DateStyle::Locale(locale) = style else {
        return format!("{year:04}-{month:02}-{day:02}");
    };

    let (language, region) = split_locale(locale);
    match language.as_str() {
        "de" => format!("{day:02}.{month:02}.{year}"),
        "fr" => format!("{day} {} {year}", FR_MONTHS[month_index]),
        "es" => format!("{day} {} {year}", ES_MONTHS[month_index]),
        "ja" => format!("{year}/{month:02}/{day:02}"),
        "zh" => format!("{year}年{month}月{day}日"),
        "ko" => format!("{year}. {month}. {day}."),
        "en" if region.as_deref().is_some_and(|r| r != "US") => {
            format!("{day} {} {year}", EN_MONTHS[month_index])
        },
        _ => format!("{} {day}, {year}", EN_MONTHS[month_index]),
    }
}
