//! Value coercion: turn one line of free-form text into a typed scalar.

use serde_json::{Number, Value};

/// Coerce a raw token into a JSON scalar.
///
/// Rules, in order: `true`, `null`, `false` literals; a number when the JSON text
/// it would be committed as is exactly the token; otherwise the token as a string.
///
/// # Example
///
/// ```
/// use json_node_edit::coerce;
/// use serde_json::json;
///
/// assert_eq!(coerce("true"), json!(true));
/// assert_eq!(coerce("42"), json!(42));
/// assert_eq!(coerce("042"), json!("042"));
/// assert_eq!(coerce("abc"), json!("abc"));
/// ```
pub fn coerce(token: &str) -> Value {
    match token {
        "true" => return Value::Bool(true),
        "null" => return Value::Null,
        "false" => return Value::Bool(false),
        _ => {}
    }
    match parse_exact_number(token) {
        Some(number) => number,
        None => Value::String(token.to_string()),
    }
}

/// Parse `token` as a number only if the committed JSON text of that number is the token itself.
fn parse_exact_number(token: &str) -> Option<Value> {
    let n: f64 = token.parse().ok()?;
    if !n.is_finite() {
        return None;
    }
    // Negative zero commits as `0`, so `-0` never round-trips.
    let value = if n == 0.0 {
        Value::from(0)
    } else if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Value::Number(Number::from_f64(n)?)
    };
    (value.to_string() == token).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn literals() {
        assert_eq!(coerce("true"), json!(true));
        assert_eq!(coerce("null"), json!(null));
        assert_eq!(coerce("false"), json!(false));
    }

    #[test]
    fn literals_are_case_and_space_sensitive() {
        assert_eq!(coerce("True"), json!("True"));
        assert_eq!(coerce(" true"), json!(" true"));
        assert_eq!(coerce("NULL"), json!("NULL"));
    }

    #[test]
    fn canonical_numbers() {
        assert_eq!(coerce("42"), json!(42));
        assert_eq!(coerce("-7"), json!(-7));
        assert_eq!(coerce("0"), json!(0));
        assert_eq!(coerce("1.5"), json!(1.5));
        assert_eq!(coerce("-0.25"), json!(-0.25));
        assert!(coerce("42").is_i64());
        assert_eq!(coerce("0.001"), json!(0.001));
        assert_eq!(coerce("123456.789"), json!(123456.789));
    }

    #[test]
    fn non_canonical_numbers_stay_strings() {
        for token in ["042", "1.50", "3.0", "+1", ".5", "1.", "1e3", "0x1f", " 42", "42 ", "-0", ""] {
            assert_eq!(coerce(token), json!(token), "token {token:?}");
        }
    }

    #[test]
    fn numbers_committed_in_exponent_form_stay_strings() {
        for token in ["0.0000001", "100000000000000000000", "-0.0", "1.0e2"] {
            assert_eq!(coerce(token), json!(token), "token {token:?}");
        }
    }

    #[test]
    fn non_finite_stays_string() {
        for token in ["inf", "NaN", "infinity", "-inf"] {
            assert_eq!(coerce(token), json!(token));
        }
    }

    #[test]
    fn imprecise_integers_stay_strings() {
        assert_eq!(coerce("12345678901234567"), json!("12345678901234567"));
        assert_eq!(coerce("9007199254740992"), json!(9007199254740992_i64));
    }

    #[test]
    fn plain_text() {
        assert_eq!(coerce("abc"), json!("abc"));
        assert_eq!(coerce("{not json"), json!("{not json"));
    }
}
