//! Unit conversion and rounding utilities
//!
//! Raw card values arrive as numbers or free-form strings. Everything here is
//! fail-soft: an unparsable value yields `None` and is left out of whatever
//! aggregate the caller is building.

use crate::types::RawValue;

/// Knots to metres per second
pub const KNOTS_TO_MPS: f64 = 0.514444;

/// Tenths-of-a-degree scale used by the first card temperature columns
pub const TENTHS_PER_DEGREE: f64 = 10.0;

/// Parse the leading numeric prefix of a string.
///
/// Leading whitespace is skipped and trailing garbage is ignored, so `"12.5mm"`
/// reads as `12.5`. Returns `None` when no digits precede the garbage.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - end - 1;
        if digits + frac_digits > 0 {
            digits += frac_digits;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Numeric value of an optional raw field, `None` when missing or unparsable
pub fn numeric(raw: Option<&RawValue>) -> Option<f64> {
    raw.and_then(RawValue::as_f64)
}

/// Arithmetic mean. An empty slice averages to 0, so check the length first.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Round half up to a whole number
pub fn round0(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round half up to one decimal place
pub fn round1(value: f64) -> f64 {
    round0(value * 10.0) / 10.0
}

pub fn tenths_to_celsius(raw: Option<&RawValue>) -> Option<f64> {
    numeric(raw).map(|tenths| tenths / TENTHS_PER_DEGREE)
}

pub fn knots_to_meters_per_second(raw: Option<&RawValue>) -> Option<f64> {
    numeric(raw).map(|knots| knots * KNOTS_TO_MPS)
}

/// Render as a whole number ("1008")
pub fn format_integer(value: f64) -> String {
    format!("{}", round0(value) as i64)
}

/// Render rounded to one decimal in shortest form ("23.4", "25"); never
/// emits "-0"
pub fn format_one_decimal(value: f64) -> String {
    // adding +0.0 folds negative zero
    format!("{}", round1(value) + 0.0)
}
