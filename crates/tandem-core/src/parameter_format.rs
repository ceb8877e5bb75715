//! Parameter value formatting and parsing.
//!
//! This module provides the [`Formatter`] enum for converting between plain
//! parameter values and display strings. The formatter is derived from the
//! parameter's flags (see [`ParameterDescriptor::formatter`]):
//!
//! - boolean parameters render `1` or `0`, switching at `0.5`
//! - integer parameters render the value truncated toward zero
//! - continuous parameters render with a fixed number of decimals
//!
//! Unit suffixes are not part of the formatter; the descriptor appends them.
//!
//! Parsing is deliberately lenient, matching what hosts expect from C-style
//! text entry: the longest numeric prefix is used and trailing text (such as
//! a unit the user typed) is ignored.
//!
//! [`ParameterDescriptor::formatter`]: crate::parameter_info::ParameterDescriptor::formatter

use crate::types::ParameterValue;

/// Parameter value formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    /// Continuous value with fixed precision (e.g., "1.23").
    Float {
        /// Number of decimal places.
        precision: usize,
    },

    /// Whole number (e.g., "4").
    Integer,

    /// Toggle rendered as "1" (on) or "0" (off).
    Boolean,
}

impl Formatter {
    /// Convert a plain value to a display string (without unit).
    pub fn text(&self, value: ParameterValue) -> String {
        match self {
            Formatter::Float { precision } => {
                format!("{:.prec$}", value, prec = *precision)
            }

            Formatter::Integer => format!("{}", value.trunc() as i64),

            Formatter::Boolean => {
                if value >= 0.5 {
                    "1".to_string()
                } else {
                    "0".to_string()
                }
            }
        }
    }

    /// Parse a display string to a plain value.
    ///
    /// Returns `None` if the string does not start with a number.
    pub fn parse(&self, s: &str) -> Option<ParameterValue> {
        let s = s.trim();

        match self {
            Formatter::Float { .. } => leading_float(s),

            Formatter::Integer => leading_integer(s).map(|v| v as ParameterValue),

            Formatter::Boolean => match s.to_ascii_lowercase().as_str() {
                "on" | "true" | "yes" => Some(1.0),
                "off" | "false" | "no" => Some(0.0),
                _ => leading_float(s),
            },
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::Float { precision: 2 }
    }
}

/// Length of the optional sign plus digit run starting at `start`.
fn digit_run(bytes: &[u8], start: usize) -> usize {
    bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Parse the longest leading integer (`[+-]?[0-9]+`).
fn leading_integer(s: &str) -> Option<i64> {
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = digit_run(bytes, sign);
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

/// Parse the longest leading decimal number (`[+-]?[0-9]*(.[0-9]*)?([eE][+-]?[0-9]+)?`).
fn leading_float(s: &str) -> Option<ParameterValue> {
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = digit_run(bytes, end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digit_run(bytes, end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = digit_run(bytes, end + 1 + exp_sign);
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }

    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_text() {
        let f = Formatter::default();
        assert_eq!(f.text(50.0), "50.00");
        assert_eq!(f.text(-0.125), "-0.12");
        assert_eq!(Formatter::Float { precision: 0 }.text(2.6), "3");
    }

    #[test]
    fn test_integer_text_truncates() {
        assert_eq!(Formatter::Integer.text(3.0), "3");
        assert_eq!(Formatter::Integer.text(4.99), "4");
        assert_eq!(Formatter::Integer.text(-2.7), "-2");
    }

    #[test]
    fn test_boolean_text_threshold() {
        assert_eq!(Formatter::Boolean.text(0.0), "0");
        assert_eq!(Formatter::Boolean.text(0.49), "0");
        assert_eq!(Formatter::Boolean.text(0.5), "1");
        assert_eq!(Formatter::Boolean.text(1.0), "1");
    }

    #[test]
    fn test_parse_float_prefix() {
        let f = Formatter::default();
        assert_eq!(f.parse("42.5"), Some(42.5));
        assert_eq!(f.parse("  0.75 UTF8"), Some(0.75));
        assert_eq!(f.parse("-.5"), Some(-0.5));
        assert_eq!(f.parse("3."), Some(3.0));
        assert_eq!(f.parse("1e2x"), Some(100.0));
        assert_eq!(f.parse("2e"), Some(2.0));
        assert_eq!(f.parse("abc"), None);
        assert_eq!(f.parse("."), None);
        assert_eq!(f.parse(""), None);
    }

    #[test]
    fn test_parse_integer_prefix() {
        assert_eq!(Formatter::Integer.parse("4"), Some(4.0));
        assert_eq!(Formatter::Integer.parse("3.9"), Some(3.0));
        assert_eq!(Formatter::Integer.parse("+5 steps"), Some(5.0));
        assert_eq!(Formatter::Integer.parse("-"), None);
    }

    #[test]
    fn test_parse_boolean() {
        assert_eq!(Formatter::Boolean.parse("1"), Some(1.0));
        assert_eq!(Formatter::Boolean.parse("0"), Some(0.0));
        assert_eq!(Formatter::Boolean.parse("On"), Some(1.0));
        assert_eq!(Formatter::Boolean.parse("off"), Some(0.0));
        assert_eq!(Formatter::Boolean.parse("maybe"), None);
    }
}
