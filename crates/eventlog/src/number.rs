//! Numeric coercions for loosely typed feed values.
//!
//! Feed values arrive as strings (from markup) or as JSON numbers (from JSON feeds),
//! and either may be garbage. Two coercions are used, and they intentionally differ:
//!
//! - [`parse_int`] reads a leading base-10 integer and ignores whatever follows it, so
//!   `"404 Not Found"` still yields `404`.
//! - [`to_number`] requires the whole (trimmed) string to be numeric and signals failure
//!   with `NaN`, so an unknown value stays distinguishable from a real zero. A blank
//!   string is still zero, the same as in a browser.

use super::*;

/// Reads a leading base-10 integer from a feed value.
///
/// Strings have leading whitespace skipped, then accept one optional sign followed by the
/// longest run of ASCII digits; anything after the digits is ignored. Numbers are
/// truncated toward zero. Every other value, and any result outside the `i64` range,
/// yields `None`.
///
/// # Examples
///
/// ```
/// use eventlog::number::parse_int;
/// use serde_json::json;
///
/// assert_eq!(parse_int(&json!("500")), Some(500));
/// assert_eq!(parse_int(&json!("  -12abc")), Some(-12));
/// assert_eq!(parse_int(&json!("3.7")), Some(3));
/// assert_eq!(parse_int(&json!("OK")), None);
/// assert_eq!(parse_int(&json!("")), None);
/// ```
pub fn parse_int(value: &Value) -> Option<i64> {
  match value {
    Value::String(s) => parse_int_str(s),
    Value::Number(n) => n.as_i64().or_else(|| {
      n.as_f64().filter(|f| f.is_finite() && f.abs() < i64::MAX as f64).map(|f| f.trunc() as i64)
    }),
    _ => None,
  }
}

/// String half of [`parse_int`].
fn parse_int_str(s: &str) -> Option<i64> {
  let s = s.trim_start();
  let sign_len = usize::from(s.starts_with(['+', '-']));
  let digits_len = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
  if digits_len == 0 {
    return None;
  }
  s[..sign_len + digits_len].parse().ok()
}

/// Converts an optional feed value to a number, using `NaN` for "not a number".
///
/// JSON numbers pass through. Strings are trimmed and must then be entirely a decimal
/// literal (optional sign, fraction and exponent), a `0x`/`0o`/`0b` integer literal or
/// a signed `Infinity`. An empty or whitespace-only string is `0`. Decimals too large
/// for `f64` become infinite. An absent value, `null`, booleans, objects, arrays and
/// any other spelling (`"inf"`, `"NaN"`) yield `NaN`.
///
/// # Examples
///
/// ```
/// use eventlog::number::to_number;
/// use serde_json::json;
///
/// assert_eq!(to_number(Some(&json!("150"))), 150.0);
/// assert_eq!(to_number(Some(&json!(" 1e3 "))), 1000.0);
/// assert_eq!(to_number(Some(&json!(""))), 0.0);
/// assert!(to_number(Some(&json!("Not A Number"))).is_nan());
/// assert!(to_number(None).is_nan());
/// ```
pub fn to_number(value: Option<&Value>) -> f64 {
  match value {
    Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
    Some(Value::String(s)) => parse_number_str(s.trim()),
    _ => f64::NAN,
  }
}

/// String half of [`to_number`], on an already trimmed string.
fn parse_number_str(s: &str) -> f64 {
  if s.is_empty() {
    return 0.0;
  }

  match s {
    "Infinity" | "+Infinity" => return f64::INFINITY,
    "-Infinity" => return f64::NEG_INFINITY,
    _ => (),
  }

  let radix_literal = s.get(..2).and_then(|prefix| match prefix {
    "0x" | "0X" => Some(16),
    "0o" | "0O" => Some(8),
    "0b" | "0B" => Some(2),
    _ => None,
  });
  if let Some(radix) = radix_literal {
    let digits = &s[2..];
    if digits.starts_with('+') {
      return f64::NAN;
    }
    return u64::from_str_radix(digits, radix).map(|n| n as f64).unwrap_or(f64::NAN);
  }

  // `f64::from_str` also accepts "inf" and "NaN" spellings.
  let decimal_charset =
    s.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
  if !decimal_charset || !s.bytes().any(|b| b.is_ascii_digit()) {
    return f64::NAN;
  }
  f64::from_str(s).unwrap_or(f64::NAN)
}
