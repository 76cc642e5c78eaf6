//! Numeric helpers shared by every codec.
//!
//! Stored token values come from hand-edited JSON, older schema versions and
//! third-party exports, so numbers show up as JSON numbers, as bare numeric
//! strings (`"1.5"`) and as strings with trailing junk (`"24px"`). These
//! helpers read all three the same way.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static LEADING_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid float regex")
});

/// Reads the longest numeric prefix of `s`.
///
/// Mirrors the permissive `parseFloat` reading that stored values were
/// written against: `"24px"` reads as `24`, `"1.2.3"` as `1.2`, and a string
/// without a numeric prefix yields `None`.
///
/// ```rust
/// use tokenkit_codec::number::leading_float;
///
/// assert_eq!(leading_float("24px"), Some(24.0));
/// assert_eq!(leading_float("  -0.5em"), Some(-0.5));
/// assert_eq!(leading_float("1.2.3"), Some(1.2));
/// assert_eq!(leading_float("px"), None);
/// ```
pub fn leading_float(s: &str) -> Option<f64> {
    let m = LEADING_FLOAT.find(s)?;
    m.as_str().trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Reads a finite number from a JSON number or a numeric string.
///
/// Strings go through [`leading_float`]; everything else is `None`.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => leading_float(s),
        _ => None,
    }
}

/// Formats a number the way CSS values are written: shortest round-trip
/// decimal, no trailing `.0`, and never `-0`.
///
/// ```rust
/// use tokenkit_codec::number::format_number;
///
/// assert_eq!(format_number(16.0), "16");
/// assert_eq!(format_number(1.5), "1.5");
/// assert_eq!(format_number(-0.0), "0");
/// ```
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    format!("{}", n)
}

/// Converts a finite number into a JSON value, preferring an integer
/// representation when the number has no fractional part.
pub fn json_number(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}
