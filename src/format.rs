//! Re-rendering numbers in the separator style they were parsed from.

use crate::{DecimalSeparator, ParsedNumber};

/// Enough fractional digits to print any finite `f64` exactly.
const EXACT_DIGITS: usize = 1074;

/// Format `value` with `decimals` fractional digits and thousands grouping.
///
/// Grouping uses `,` with a `.` decimal point, unless the source style was
/// [`DecimalSeparator::Comma`], in which case the two glyphs swap. With zero
/// decimals only the grouped integer part is emitted.
///
/// Rounding is half away from zero on the exact binary value, so `2.5`
/// becomes `3` while `1.005` (stored just below the tie) becomes `1.00`.
/// A value that rounds to zero never carries a minus sign.
///
/// ## Example
///
/// ```rust
/// use ccreveal_core::{format_number, DecimalSeparator};
///
/// assert_eq!(format_number(1234.5, 2, DecimalSeparator::Dot), "1,234.50");
/// assert_eq!(format_number(12345.0, 2, DecimalSeparator::Comma), "12.345,00");
/// assert_eq!(format_number(1234.5, 0, DecimalSeparator::Comma), "1,235");
/// ```
pub fn format_number(value: f64, decimals: usize, separator: DecimalSeparator) -> String {
    let fixed = round_half_away(value.abs(), decimals);

    let (digits, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let is_zero = digits.bytes().chain(frac_part.bytes()).all(|b| b == b'0');
    let sign = if value.is_sign_negative() && !is_zero { "-" } else { "" };

    let (group, point) = if decimals > 0 && separator == DecimalSeparator::Comma {
        ('.', ',')
    } else {
        (',', '.')
    };

    let mut out = String::with_capacity(fixed.len() + digits.len() / 3 + 2);
    out.push_str(sign);
    push_grouped(&mut out, digits, group);
    if decimals > 0 {
        out.push(point);
        out.push_str(frac_part);
    }
    out
}

/// Fixed-point text of a non-negative `magnitude`, exact ties rounded up.
fn round_half_away(magnitude: f64, decimals: usize) -> String {
    if is_exact_tie(magnitude, decimals) {
        // the next representable value sits above the tie and rounds up
        let above = f64::from_bits(magnitude.to_bits() + 1);
        format!("{:.*}", decimals, above)
    } else {
        format!("{:.*}", decimals, magnitude)
    }
}

/// Whether `magnitude` lies exactly halfway between two `decimals`-digit values.
fn is_exact_tie(magnitude: f64, decimals: usize) -> bool {
    if !magnitude.is_finite() {
        return false;
    }
    // A tie has exactly `decimals + 1` fractional digits, so this is exact for one.
    if !format!("{:.*}", decimals + 1, magnitude).ends_with('5') {
        return false;
    }
    let exact = format!("{:.*}", EXACT_DIGITS, magnitude);
    let Some(point) = exact.find('.') else {
        return false;
    };
    let tail = &exact[point + 1 + decimals..];
    tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0')
}

/// Append ASCII `digits`, inserting `group` before every run of three from the right.
fn push_grouped(out: &mut String, digits: &str, group: char) {
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(group);
        }
        out.push(ch);
    }
}

impl ParsedNumber {
    /// Render `value` wrapped in this number's prefix and suffix, using its
    /// separator style and decimal precision.
    ///
    /// ```rust
    /// use ccreveal_core::ParsedNumber;
    ///
    /// let parsed = ParsedNumber::parse("€12.345,00").unwrap();
    /// assert_eq!(parsed.render(500.0), "€500,00");
    /// assert_eq!(parsed.render(parsed.value), "€12.345,00");
    /// ```
    pub fn render(&self, value: f64) -> String {
        let numeral = format_number(value, self.decimal_digits, self.decimal_separator);
        let mut text = String::with_capacity(self.prefix.len() + numeral.len() + self.suffix.len());
        text.push_str(&self.prefix);
        text.push_str(&numeral);
        text.push_str(&self.suffix);
        text
    }

    /// Render the parsed value itself.
    #[inline]
    pub fn render_target(&self) -> String {
        self.render(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping() {
        assert_eq!(format_number(0.0, 0, DecimalSeparator::None), "0");
        assert_eq!(format_number(999.0, 0, DecimalSeparator::None), "999");
        assert_eq!(format_number(1000.0, 0, DecimalSeparator::None), "1,000");
        assert_eq!(format_number(123456.0, 0, DecimalSeparator::None), "123,456");
        assert_eq!(format_number(1234567.0, 0, DecimalSeparator::None), "1,234,567");
    }

    #[test]
    fn test_dot_style() {
        assert_eq!(format_number(1234.56, 2, DecimalSeparator::Dot), "1,234.56");
        assert_eq!(format_number(0.5, 3, DecimalSeparator::Dot), "0.500");
    }

    #[test]
    fn test_comma_style_swaps_glyphs() {
        assert_eq!(format_number(12345.0, 2, DecimalSeparator::Comma), "12.345,00");
        assert_eq!(format_number(1234567.891, 1, DecimalSeparator::Comma), "1.234.567,9");
    }

    #[test]
    fn test_zero_decimals_has_no_separator() {
        for sep in [DecimalSeparator::Dot, DecimalSeparator::Comma, DecimalSeparator::None] {
            let out = format_number(1234.4, 0, sep);
            assert_eq!(out, "1,234");
            assert!(!out.contains('.'));
        }
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(format_number(-1234.5, 1, DecimalSeparator::Dot), "-1,234.5");
        assert_eq!(format_number(-123.0, 0, DecimalSeparator::None), "-123");
        assert_eq!(format_number(-1234567.0, 2, DecimalSeparator::Comma), "-1.234.567,00");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(format_number(-0.0, 0, DecimalSeparator::None), "0");
        assert_eq!(format_number(-0.0, 2, DecimalSeparator::Dot), "0.00");
        // small negatives that round to zero lose their sign too
        assert_eq!(format_number(-0.3, 0, DecimalSeparator::None), "0");
        assert_eq!(format_number(-0.004, 2, DecimalSeparator::Dot), "0.00");
        assert_eq!(format_number(-0.004, 2, DecimalSeparator::Comma), "0,00");
        assert_eq!(format_number(-0.6, 0, DecimalSeparator::None), "-1");
    }

    #[test]
    fn test_exact_ties_round_away_from_zero() {
        assert_eq!(format_number(0.5, 0, DecimalSeparator::None), "1");
        assert_eq!(format_number(2.5, 0, DecimalSeparator::None), "3");
        assert_eq!(format_number(1234.5, 0, DecimalSeparator::Comma), "1,235");
        assert_eq!(format_number(0.125, 2, DecimalSeparator::Dot), "0.13");
        assert_eq!(format_number(-2.5, 0, DecimalSeparator::None), "-3");
        assert_eq!(format_number(-0.125, 2, DecimalSeparator::Comma), "-0,13");
    }

    #[test]
    fn test_near_ties_follow_binary_value() {
        // 1.005 and 0.145 are stored just below the midpoint
        assert_eq!(format_number(1.005, 2, DecimalSeparator::Dot), "1.00");
        assert_eq!(format_number(0.145, 2, DecimalSeparator::Dot), "0.14");
        // 0.135 is stored just above it
        assert_eq!(format_number(0.135, 2, DecimalSeparator::Dot), "0.14");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(format_number(1.26, 1, DecimalSeparator::Dot), "1.3");
        assert_eq!(format_number(999.96, 1, DecimalSeparator::Dot), "1,000.0");
        assert_eq!(format_number(99.7, 0, DecimalSeparator::None), "100");
    }

    #[test]
    fn test_render_wraps_prefix_suffix() {
        let parsed = ParsedNumber::parse("Revenue $1,234.56 today").unwrap();
        assert_eq!(parsed.render(0.0), "Revenue $0.00 today");
        assert_eq!(parsed.render(1000.0), "Revenue $1,000.00 today");
        assert_eq!(parsed.render_target(), "Revenue $1,234.56 today");
    }
}
