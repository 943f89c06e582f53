//! Numeric parsing for raw form text.
//!
//! Lenient parsing follows the browser `parseFloat` rules the calculator form
//! has always used: skip leading whitespace, read the longest numeric prefix,
//! and fall back to NaN when there is none. Strict parsing accepts only text
//! that is entirely one finite number.

use crate::config::ParseMode;
use crate::errors::{CalculatorError, Result};
use crate::types::FormField;

/// parse with the given mode, reporting failures against `field`
pub fn parse_field(text: &str, field: FormField, mode: ParseMode) -> Result<f64> {
    match mode {
        ParseMode::Lenient => Ok(parse_float(text)),
        ParseMode::Strict => parse_strict(text).ok_or_else(|| CalculatorError::InvalidInput {
            field: field.as_str().to_string(),
            value: text.to_string(),
        }),
    }
}

/// `parseFloat` semantics, never fails
pub fn parse_float(text: &str) -> f64 {
    let trimmed = text.trim_start();
    match numeric_prefix(trimmed) {
        Some((number, _)) => number,
        None => f64::NAN,
    }
}

/// whole-string finite number, surrounding whitespace allowed
pub fn parse_strict(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let (number, consumed) = numeric_prefix(trimmed)?;
    if consumed != trimmed.len() || !number.is_finite() {
        return None;
    }
    Some(number)
}

/// longest leading decimal literal, returning its value and byte length
fn numeric_prefix(text: &str) -> Option<(f64, usize)> {
    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut negative = false;

    if let Some(&sign) = bytes.first() {
        if sign == b'+' || sign == b'-' {
            negative = sign == b'-';
            pos += 1;
        }
    }

    if text[pos..].starts_with("Infinity") {
        let value = if negative { f64::NEG_INFINITY } else { f64::INFINITY };
        return Some((value, pos + "Infinity".len()));
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = pos - int_start;

    let mut frac_digits = 0;
    let mut end = pos;
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut cursor = frac_start;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        frac_digits = cursor - frac_start;
        if int_digits > 0 || frac_digits > 0 {
            end = cursor;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    let mantissa_end = end;

    // exponent only counts when at least one digit follows
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut cursor = end + 1;
        if cursor < bytes.len() && (bytes[cursor] == b'+' || bytes[cursor] == b'-') {
            cursor += 1;
        }
        let exp_start = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > exp_start {
            end = cursor;
        }
    }

    let literal = normalize_literal(&text[..mantissa_end], &text[mantissa_end..end]);
    literal.parse::<f64>().ok().map(|value| (value, end))
}

/// rewrite `.5` and `5.` forms into `0.5` and `5.0` before handing to the std parser
fn normalize_literal(mantissa: &str, exponent: &str) -> String {
    let (sign, digits) = match mantissa.as_bytes().first() {
        Some(b'+') | Some(b'-') => mantissa.split_at(1),
        _ => ("", mantissa),
    };

    let mut normalized = String::with_capacity(mantissa.len() + exponent.len() + 2);
    normalized.push_str(sign);
    if digits.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(digits);
    if digits.ends_with('.') {
        normalized.push('0');
    }
    normalized.push_str(exponent);
    normalized
}
