//! Lossy coercion of untyped JSON values
//!
//! The transport hands the core whatever the client sent, so every field
//! read goes through one of these helpers. They never fail: a value that
//! cannot be coerced degrades to the caller's default.

use serde_json::Value;

/// String literals accepted as "true" for boolean-like fields,
/// matched case-insensitively. Anything else is false.
const TRUTHY_LITERALS: [&str; 3] = ["1", "yes", "true"];

/// Coerce a JSON value to a finite float, or `default`.
///
/// Accepts numbers, numeric strings, and booleans (1/0).
pub fn safe_float(value: Option<&Value>, default: f64) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|f| f.is_finite()).unwrap_or(default),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .unwrap_or(default),
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => default,
    }
}

/// Coerce a JSON value to an integer, or `default`.
///
/// Goes through the float path first so "5.7" truncates to 5.
pub fn safe_int(value: Option<&Value>, default: i64) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
            .unwrap_or(default),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
            .unwrap_or(default),
        Some(Value::Bool(b)) => *b as i64,
        _ => default,
    }
}

/// Parse a boolean-like field from its textual form.
///
/// An absent field takes `default`; a present value is stringified and
/// matched against [`TRUTHY_LITERALS`], so `true`, `"Yes"`, `1`, and
/// `"1"` all read as true while `null`, `"no"`, `0`, and `1.0` do not.
pub fn truthy(value: Option<&Value>, default: bool) -> bool {
    let raw = match value {
        None => return default,
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
    };
    TRUTHY_LITERALS.iter().any(|lit| raw.eq_ignore_ascii_case(lit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_safe_float_accepts_numbers_and_strings() {
        assert_eq!(safe_float(Some(&json!(85.5)), -1.0), 85.5);
        assert_eq!(safe_float(Some(&json!("85.5")), -1.0), 85.5);
        assert_eq!(safe_float(Some(&json!(" 42 ")), -1.0), 42.0);
        assert_eq!(safe_float(Some(&json!(true)), -1.0), 1.0);
    }

    #[test]
    fn test_safe_float_degrades_to_default() {
        assert_eq!(safe_float(None, -1.0), -1.0);
        assert_eq!(safe_float(Some(&json!(null)), -1.0), -1.0);
        assert_eq!(safe_float(Some(&json!("abc")), -1.0), -1.0);
        assert_eq!(safe_float(Some(&json!("NaN")), -1.0), -1.0);
        assert_eq!(safe_float(Some(&json!([1, 2])), -1.0), -1.0);
    }

    #[test]
    fn test_safe_int_truncates_floats() {
        assert_eq!(safe_int(Some(&json!(5.7)), -1), 5);
        assert_eq!(safe_int(Some(&json!("5.7")), -1), 5);
        assert_eq!(safe_int(Some(&json!(-0.9)), -1), 0);
        assert_eq!(safe_int(Some(&json!("six")), -1), -1);
        assert_eq!(safe_int(None, 20), 20);
    }

    #[test]
    fn test_truthy_literal_set() {
        for v in [json!("1"), json!("yes"), json!("Yes"), json!("TRUE"), json!(true), json!(1)] {
            assert!(truthy(Some(&v), false), "{v} should be truthy");
        }
        for v in [json!("0"), json!("no"), json!(false), json!(0), json!(null), json!(1.0)] {
            assert!(!truthy(Some(&v), true), "{v} should not be truthy");
        }
    }

    #[test]
    fn test_truthy_default_applies_only_when_absent() {
        assert!(truthy(None, true));
        assert!(!truthy(None, false));
        // Present but unrecognized never falls back to the default.
        assert!(!truthy(Some(&json!("maybe")), true));
    }
}
