//! Number extraction from rendered counter text.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// First "number-like" run: optional sign, a digit, then digits and separators.
static NUMERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?[0-9][0-9.,]*").expect("numeral pattern is valid")
});

/// Character judged to separate the integer and fractional parts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DecimalSeparator {
    /// `1,234.56`
    Dot,
    /// `1.234,56`
    Comma,
    /// No separator in the source numeral
    #[default]
    None,
}

impl DecimalSeparator {
    /// The glyph for this separator, if any.
    #[inline]
    pub fn glyph(self) -> Option<char> {
        match self {
            DecimalSeparator::Dot => Some('.'),
            DecimalSeparator::Comma => Some(','),
            DecimalSeparator::None => None,
        }
    }

    /// Pick the decimal separator of a numeral: whichever glyph occurs last.
    fn infer(numeral: &str) -> Self {
        match (numeral.rfind('.'), numeral.rfind(',')) {
            (Some(dot), Some(comma)) if comma > dot => DecimalSeparator::Comma,
            (Some(_), _) => DecimalSeparator::Dot,
            (None, Some(_)) => DecimalSeparator::Comma,
            (None, None) => DecimalSeparator::None,
        }
    }
}

/// Error type for parsing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No digit run in the text
    #[error("no number found in text")]
    NoNumberFound,
    /// The numeral could not be converted to a finite number
    #[error("unparsable number: {normalized:?}")]
    UnparsableNumber { normalized: String },
}

/// A display string decomposed around its first numeral.
///
/// Created once from an element's original text; `prefix + numeral + suffix`
/// reproduces the source formatting for the same value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedNumber {
    /// Text before the numeral (currency symbols, words)
    pub prefix: String,
    /// Text after the numeral (units, punctuation)
    pub suffix: String,
    /// Numeric magnitude, always finite
    pub value: f64,
    /// Separator style of the source numeral
    pub decimal_separator: DecimalSeparator,
    /// Digits after the decimal separator (0 when there is none)
    pub decimal_digits: usize,
}

impl ParsedNumber {
    /// Parse display text, returning `None` when it holds no usable number.
    ///
    /// This is the non-failing entry point used for counters: text without a
    /// number is simply "not a counter".
    pub fn parse(text: &str) -> Option<Self> {
        parse_number(text).ok()
    }
}

/// Decompose display text into prefix, numeric value and suffix.
///
/// The decimal separator is whichever of `.` and `,` appears last in the
/// numeral; the other glyph is treated as a thousands separator. A numeral
/// with a single group such as `1.234` therefore reads as three decimals.
///
/// ## Example
///
/// ```rust
/// use ccreveal_core::{parse_number, DecimalSeparator};
///
/// let parsed = parse_number("€12.345,00").unwrap();
/// assert_eq!(parsed.prefix, "€");
/// assert_eq!(parsed.value, 12345.0);
/// assert_eq!(parsed.decimal_separator, DecimalSeparator::Comma);
/// assert_eq!(parsed.decimal_digits, 2);
/// ```
pub fn parse_number(text: &str) -> Result<ParsedNumber, ParseError> {
    let text = text.trim();
    let found = NUMERAL.find(text).ok_or(ParseError::NoNumberFound)?;
    let numeral = found.as_str();

    let decimal_separator = DecimalSeparator::infer(numeral);
    let (normalized, decimal_digits) = match decimal_separator.glyph() {
        Some(glyph) => {
            let grouping = if glyph == '.' { ',' } else { '.' };
            let digits = numeral.len() - numeral.rfind(glyph).map_or(0, |idx| idx + 1);
            let normalized: String = numeral
                .chars()
                .filter(|&c| c != grouping)
                .map(|c| if c == glyph { '.' } else { c })
                .collect();
            (normalized, digits)
        }
        None => (numeral.to_string(), 0),
    };

    // A repeated decimal glyph leaves more than one '.' and fails here.
    let value = match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => return Err(ParseError::UnparsableNumber { normalized }),
    };

    Ok(ParsedNumber {
        prefix: text[..found.start()].to_string(),
        suffix: text[found.end()..].to_string(),
        value,
        decimal_separator,
        decimal_digits,
    })
}
