//! Number Serialization and Parsing
//!
//! `format_number` is the ECMAScript Number-to-String conversion (used
//! when a number becomes an attribute or control value). `parse_html_float`
//! implements the HTML "valid floating-point number" grammar.

/// Render a number the way ECMAScript `String(n)` does.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n == 0.0 {
        // Covers -0 as well
        return "0".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{n}");
    }

    // Rust renders "1e21" / "1.5e-7"; ECMAScript wants an explicit sign.
    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

/// Parse a valid floating-point number as defined by HTML.
///
/// Accepts `-?(digits(.digits)?|.digits)([eE][+-]?digits)?` with no
/// surrounding whitespace. Returns `None` for anything else, including
/// values that overflow to infinity.
pub fn parse_html_float(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut i = 0;

    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
        if frac_digits == 0 {
            return None;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return None;
        }
    }

    if i != bytes.len() {
        return None;
    }

    s.parse::<f64>().ok().filter(|n| n.is_finite())
}
