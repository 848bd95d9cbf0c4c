use super::split_locale;

/// Selects the symbols used to format a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle<'a> {
    /// The grouping and decimal separators of a locale.
    Locale(&'a str),
    /// SI style: narrow no-break space groups and a `.` decimal mark.
    Si,
}

impl<'a> From<&'a str> for NumberStyle<'a> {
    /// Maps the pseudo-locale `"SI"` to [`NumberStyle::Si`] and anything else
    /// to [`NumberStyle::Locale`].
    fn from(value: &'a str) -> Self {
        if value.eq_ignore_ascii_case("si") {
            Self::Si
        } else {
            Self::Locale(value)
        }
    }
}

/// How many fraction digits to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumberOptions {
    /// Trailing zeros are kept up to this many digits.
    pub minimum_fraction_digits: u8,
    /// The value is rounded to this many digits. Defaults to the larger of
    /// `minimum_fraction_digits` and 3.
    pub maximum_fraction_digits: Option<u8>,
}

impl NumberOptions {
    /// Shows exactly `digits` fraction digits.
    #[must_use]
    pub const fn fixed(digits: u8) -> Self {
        Self {
            minimum_fraction_digits: digits,
            maximum_fraction_digits: Some(digits),
        }
    }

    fn bounds(self) -> (usize, usize) {
        let min = self.minimum_fraction_digits;
        let max = self.maximum_fraction_digits.unwrap_or(3).max(min);
        (usize::from(min), usize::from(max))
    }
}

#[derive(Debug, Clone, Copy)]
struct Symbols {
    group: &'static str,
    decimal: &'static str,
    /// Groups are only inserted if the integer part has at least
    /// `3 + min_grouping` digits.
    min_grouping: usize,
}

impl Symbols {
    const EN: Self = Self::new(",", ".");
    const DOT_COMMA: Self = Self::new(".", ",");
    const SI: Self = Self::new("\u{202F}", ".");

    const fn new(group: &'static str, decimal: &'static str) -> Self {
        Self {
            group,
            decimal,
            min_grouping: 1,
        }
    }

    fn for_style(style: NumberStyle<'_>) -> Self {
        let NumberStyle::Locale(locale) = style else {
            return Self::SI;
        };

        match split_locale(locale).0.as_str() {
            "de" | "it" | "pt" => Self::DOT_COMMA,
            "es" => Self {
                min_grouping: 2,
                ..Self::DOT_COMMA
            },
            "fr" => Self::new("\u{202F}", ","),
            "ru" => Self::new("\u{A0}", ","),
            _ => Self::EN,
        }
    }
}

/// Formats a number with the separators of `style`.
///
/// The value is rounded half away from zero to the maximum fraction digits,
/// then trailing zeros are removed down to the minimum fraction digits.
/// Non-finite values are formatted as-is.
///
/// ```
/// use hoshi_l10n::format::{NumberOptions, NumberStyle, format_number};
///
/// let opts = NumberOptions::default();
/// assert_eq!(format_number(NumberStyle::Locale("en-US"), 1234.5, opts), "1,234.5");
/// assert_eq!(format_number(NumberStyle::Locale("de"), 1234.5, opts), "1.234,5");
/// assert_eq!(format_number(NumberStyle::Si, 1234.5, opts), "1\u{202F}234.5");
/// ```
#[must_use]
pub fn format_number(style: NumberStyle<'_>, value: f64, options: NumberOptions) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let (min, max) = options.bounds();
    let digits = round_to(value.abs(), max);

    let (int, frac) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
    let frac = trim_fraction(frac, min);

    // rounding may turn small negatives into zero
    let negative = value.is_sign_negative() && (int.bytes().any(|b| b != b'0') || !frac.is_empty());
    write_parts(Symbols::for_style(style), negative, int, frac)
}

/// Formats an integer with the separators of `style`, without fractions.
#[must_use]
pub fn format_int(style: NumberStyle<'_>, value: i128) -> String {
    let digits = value.unsigned_abs().to_string();
    write_parts(Symbols::for_style(style), value < 0, &digits, "")
}

fn round_to(value: f64, digits: usize) -> String {
    let digits_i32 = i32::try_from(digits).unwrap_or(i32::MAX);
    let factor = 10f64.powi(digits_i32);
    let scaled = value * factor;

    // beyond this, the value has no fraction to round anymore
    let rounded = if scaled.is_finite() && scaled < 9_007_199_254_740_992.0 {
        scaled.round() / factor
    } else {
        value
    };

    format!("{rounded:.digits$}")
}

fn trim_fraction(frac: &str, min: usize) -> &str {
    let trimmed = frac.trim_end_matches('0');
    if trimmed.len() >= min {
        trimmed
    } else {
        &frac[..min.min(frac.len())]
    }
}

fn write_parts(symbols: Symbols, negative: bool, int: &str, frac: &str) -> String {
    let mut out = String::with_capacity(int.len() * 2 + frac.len() + 2);
    if negative {
        out.push('-');
    }

    if int.len() >= 3 + symbols.min_grouping {
        let lead = int.len() % 3;
        for (index, digit) in int.char_indices() {
            if index != 0 && index % 3 == lead {
                out.push_str(symbols.group);
            }

            out.push(digit);
        }
    } else {
        out.push_str(int);
    }

    if !frac.is_empty() {
        out.push_str(symbols.decimal);
        out.push_str(frac);
    }

    out
}
