//! Numeric parsing for reply tokens.
//!
//! The lenient parsers read the longest numeric prefix and fall back to zero,
//! which is what callers of the silent API rely on. The strict parsers accept
//! only a complete number (surrounding whitespace allowed).

use crate::reply::ParseError;

/// Parse the leading float in `text`, or `0.0` if there is none.
pub fn parse_float_lenient(text: &str) -> f32 {
    let s = text.trim_start();
    let len = float_prefix_len(s);
    s[..len].parse::<f32>().unwrap_or(0.0)
}

/// Parse the leading integer in `text`, or `0` if there is none.
///
/// Values beyond the `i64` range saturate.
pub fn parse_int_lenient(text: &str) -> i64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            i = 1;
            true
        }
        Some(b'+') => {
            i = 1;
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    while let Some(d) = bytes.get(i).filter(|b| b.is_ascii_digit()) {
        let digit = i64::from(d - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
        i += 1;
    }
    value
}

pub fn parse_float_strict(text: &str) -> Result<f32, ParseError> {
    let s = text.trim();
    if s.is_empty() {
        return Err(ParseError::Empty);
    }
    if float_prefix_len(s) != s.len() {
        return Err(ParseError::InvalidNumber(text.to_string()));
    }
    s.parse::<f32>()
        .map_err(|_| ParseError::InvalidNumber(text.to_string()))
}

pub fn parse_int_strict(text: &str) -> Result<i64, ParseError> {
    let s = text.trim();
    if s.is_empty() {
        return Err(ParseError::Empty);
    }
    s.parse::<i64>()
        .map_err(|_| ParseError::InvalidNumber(text.to_string()))
}

/// Length of the numeric prefix of `s` understood by `f32::from_str`.
fn float_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i = 1;
    }

    let rest = &bytes[i..];
    for word in ["infinity", "inf", "nan"] {
        if rest.len() >= word.len() && rest[..word.len()].eq_ignore_ascii_case(word.as_bytes()) {
            return i + word.len();
        }
    }

    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;
    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = count_digits(&bytes[i + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j.min(bytes.len())..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }
    i
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_float_takes_prefix() {
        assert_eq!(parse_float_lenient("1.2500"), 1.25);
        assert_eq!(parse_float_lenient("  -3.0"), -3.0);
        assert_eq!(parse_float_lenient("1.5abc"), 1.5);
        assert_eq!(parse_float_lenient("2e3"), 2000.0);
        assert_eq!(parse_float_lenient("2e"), 2.0);
        assert_eq!(parse_float_lenient(".5"), 0.5);
        assert_eq!(parse_float_lenient("7."), 7.0);
        assert!(parse_float_lenient("-inf").is_infinite());
        assert!(parse_float_lenient("nan").is_nan());
    }

    #[test]
    fn lenient_float_defaults_to_zero() {
        assert_eq!(parse_float_lenient(""), 0.0);
        assert_eq!(parse_float_lenient("garbage"), 0.0);
        assert_eq!(parse_float_lenient("-"), 0.0);
        assert_eq!(parse_float_lenient("."), 0.0);
        assert_eq!(parse_float_lenient("-\u{e9}t\u{e9}"), 0.0);
    }

    #[test]
    fn lenient_int() {
        assert_eq!(parse_int_lenient("8"), 8);
        assert_eq!(parse_int_lenient(" -12xyz"), -12);
        assert_eq!(parse_int_lenient("+4"), 4);
        assert_eq!(parse_int_lenient("3.9"), 3);
        assert_eq!(parse_int_lenient("idle"), 0);
        assert_eq!(parse_int_lenient(""), 0);
        assert_eq!(parse_int_lenient("99999999999999999999"), i64::MAX);
        assert_eq!(parse_int_lenient("-99999999999999999999"), i64::MIN);
    }

    #[test]
    fn strict_rejects_trailing_text() {
        assert_eq!(parse_float_strict(" 24.013 "), Ok(24.013));
        assert!(matches!(
            parse_float_strict("1.5abc"),
            Err(ParseError::InvalidNumber(_))
        ));
        assert_eq!(parse_float_strict(""), Err(ParseError::Empty));

        assert_eq!(parse_int_strict("8\r"), Ok(8));
        assert!(matches!(
            parse_int_strict("8.0"),
            Err(ParseError::InvalidNumber(_))
        ));
    }
}
