//! Value Coercion
//!
//! Total conversions from arbitrary `Value`s into the string, number and
//! boolean shapes form controls understand, following the ECMAScript
//! abstract operations where a conversion is not otherwise defined.

use crate::Value;

/// String form of `val`; `""` for null and undefined
///
/// Every other value is converted with ECMAScript ToString, so numbers
/// render as `"5"`, `"1.5"`, `"NaN"` or `"1e+21"`.
pub fn parse_string(val: &Value) -> String {
    if val.is_nullish() {
        String::new()
    } else {
        val.to_string()
    }
}

/// Numeric form of `val`; every non-finite result becomes `0`
pub fn parse_number(val: &Value) -> f64 {
    let n = to_number(val);
    if n.is_finite() { n } else { 0.0 }
}

/// Truthiness of `val`
pub fn parse_boolean(val: &Value) -> bool {
    match val {
        Value::Undefined | Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => !(n.is_nan() || *n == 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// ECMAScript ToNumber (NaN and infinities preserved)
pub fn to_number(val: &Value) -> f64 {
    match val {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => *n,
        Value::String(s) => string_to_number(s),
        // ToPrimitive yields the string form for arrays and plain objects
        Value::Array(_) | Value::Object(_) => string_to_number(&val.to_string()),
    }
}

/// `attr == val` with abstract equality, where `attr` is an attribute value
///
/// Null and undefined never equal a present attribute; numbers and
/// booleans compare numerically; objects compare by their string form.
pub fn loosely_equals(attr: &str, val: &Value) -> bool {
    match val {
        Value::Undefined | Value::Null => false,
        Value::String(s) => attr == s,
        Value::Number(n) => string_to_number(attr) == *n,
        Value::Bool(b) => string_to_number(attr) == f64::from(u8::from(*b)),
        Value::Array(_) | Value::Object(_) => attr == val.to_string(),
    }
}

/// ECMAScript StringToNumber
pub fn string_to_number(s: &str) -> f64 {
    let s = s.trim_matches(is_js_whitespace);
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&s[2..], radix);
    }

    if is_decimal_literal(s) {
        s.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut n = 0.0;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => n = n * f64::from(radix) + f64::from(d),
            None => return f64::NAN,
        }
    }
    n
}

/// `[+-]? (digits (. digits?)? | . digits) ([eE] [+-]? digits)?`
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    let digits = |i: &mut usize| {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i - start
    };

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let mut mantissa = digits(&mut i);
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        mantissa += digits(&mut i);
    }
    if mantissa == 0 {
        return false;
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if digits(&mut i) == 0 {
            return false;
        }
    }
    i == bytes.len()
}

fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{B}'
            | '\u{C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValueBag;

    #[test]
    fn test_parse_string() {
        assert_eq!(parse_string(&Value::Null), "");
        assert_eq!(parse_string(&Value::Undefined), "");
        assert_eq!(parse_string(&Value::from(5)), "5");
        assert_eq!(parse_string(&Value::from(0.1)), "0.1");
        assert_eq!(parse_string(&Value::from(f64::NAN)), "NaN");
        assert_eq!(parse_string(&Value::from(false)), "false");
        assert_eq!(parse_string(&Value::from("x")), "x");
        assert_eq!(parse_string(&Value::from(vec![1, 2])), "1,2");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(&Value::from("3.5")), 3.5);
        assert_eq!(parse_number(&Value::from("")), 0.0);
        assert_eq!(parse_number(&Value::from("abc")), 0.0);
        assert_eq!(parse_number(&Value::from(f64::INFINITY)), 0.0);
        assert_eq!(parse_number(&Value::from("1e400")), 0.0);
        assert_eq!(parse_number(&Value::Null), 0.0);
        assert_eq!(parse_number(&Value::Undefined), 0.0);
        assert_eq!(parse_number(&Value::from(true)), 1.0);
        assert_eq!(parse_number(&Value::from(-2)), -2.0);
    }

    #[test]
    fn test_parse_boolean() {
        for falsy in [Value::Null, Value::Undefined, Value::from(0), Value::from(f64::NAN), Value::from(""), Value::from(false)] {
            assert!(!parse_boolean(&falsy), "{falsy:?} should be falsy");
        }
        for truthy in [Value::from("0"), Value::from("false"), Value::from(-1), Value::Array(Vec::new()), Value::Object(ValueBag::new())] {
            assert!(parse_boolean(&truthy), "{truthy:?} should be truthy");
        }
    }

    #[test]
    fn test_string_to_number() {
        assert_eq!(string_to_number("  42\n"), 42.0);
        assert_eq!(string_to_number("\u{FEFF}7"), 7.0);
        assert_eq!(string_to_number("-.5"), -0.5);
        assert_eq!(string_to_number("5."), 5.0);
        assert_eq!(string_to_number("1E3"), 1000.0);
        assert_eq!(string_to_number("0x1F"), 31.0);
        assert_eq!(string_to_number("0b101"), 5.0);
        assert_eq!(string_to_number("0o17"), 15.0);
        assert_eq!(string_to_number("-Infinity"), f64::NEG_INFINITY);
        for bad in [".", "1e", "-0x10", "0x", "1_000", "inf", "NaN", "12px", "+-1"] {
            assert!(string_to_number(bad).is_nan(), "{bad:?} should be NaN");
        }
    }

    #[test]
    fn test_loosely_equals() {
        assert!(loosely_equals("1", &Value::from(1)));
        assert!(loosely_equals("1.0", &Value::from(1)));
        assert!(loosely_equals("", &Value::from(0)));
        assert!(loosely_equals("1", &Value::from(true)));
        assert!(loosely_equals("0", &Value::from(false)));
        assert!(loosely_equals("a,b", &Value::from(vec!["a", "b"])));
        assert!(!loosely_equals("true", &Value::from(true)));
        assert!(!loosely_equals("x", &Value::Null));
        assert!(!loosely_equals("", &Value::Undefined));
        assert!(!loosely_equals("NaN", &Value::from(f64::NAN)));
    }
}
