//! Lenient numeric parsing for user-typed fields

use serde_json::Value;

/// Parse a leading integer the way a lenient form field would:
/// leading whitespace, an optional sign, then digits. Trailing text is ignored.
/// Returns `None` when no digits are found.
pub fn parse_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }

    // Saturate absurdly long inputs instead of failing
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Best-effort integer from a JSON field: numbers are truncated, strings parsed leniently
pub fn value_as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|v| v.min(i64::MAX as u64) as i64))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => parse_int(s),
        _ => None,
    }
}

/// Non-negative count from a JSON field; malformed and negative input become zero
pub fn value_as_count(value: &Value) -> u64 {
    value_as_int(value).map(|v| v.max(0) as u64).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("25"), Some(25));
        assert_eq!(parse_int("  7 minutes"), Some(7));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("+12"), Some(12));
        assert_eq!(parse_int("1.9"), Some(1));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn test_value_as_int() {
        assert_eq!(value_as_int(&json!(5)), Some(5));
        assert_eq!(value_as_int(&json!(5.8)), Some(5));
        assert_eq!(value_as_int(&json!("42")), Some(42));
        assert_eq!(value_as_int(&json!(null)), None);
        assert_eq!(value_as_int(&json!(true)), None);
        assert_eq!(value_as_int(&json!([1])), None);
    }

    #[test]
    fn test_value_as_count_defaults_to_zero() {
        assert_eq!(value_as_count(&json!("x")), 0);
        assert_eq!(value_as_count(&json!(-10)), 0);
        assert_eq!(value_as_count(&json!(null)), 0);
        assert_eq!(value_as_count(&json!("15")), 15);
    }
}
