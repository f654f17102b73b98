//! Text-protocol numeric decoders.
//!
//! The server sends numbers as ASCII: optional sign, digits, and for
//! DECIMAL/FLOAT a fractional part or exponent.

use crate::error::{Error, Result};

fn ascii(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes)
        .map_err(|_| Error::type_conversion("numeric value is not ASCII"))
}

/// Decode a signed integer.
pub fn decode_integer(bytes: &[u8]) -> Result<i64> {
    let s = ascii(bytes)?;
    s.parse()
        .map_err(|_| Error::type_conversion(format!("invalid integer '{}'", s)))
}

/// Decode an unsigned integer (BIGINT UNSIGNED).
pub fn decode_unsigned(bytes: &[u8]) -> Result<u64> {
    let s = ascii(bytes)?;
    s.parse()
        .map_err(|_| Error::type_conversion(format!("invalid unsigned integer '{}'", s)))
}

/// Decode a FLOAT or DOUBLE.
pub fn decode_float(bytes: &[u8]) -> Result<f64> {
    let s = ascii(bytes)?;
    s.parse()
        .map_err(|_| Error::type_conversion(format!("invalid floating point value '{}'", s)))
}

/// Validate a DECIMAL literal and return it unchanged.
///
/// Accepts `[-]digits[.digits]`; at least one digit is required.
pub fn decode_decimal(bytes: &[u8]) -> Result<String> {
    let s = ascii(bytes)?;
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let valid = all_digits(int_part)
        && frac_part.map_or(true, all_digits)
        && !(int_part.is_empty() && frac_part.map_or(true, str::is_empty));

    if !valid {
        return Err(Error::type_conversion(format!("invalid decimal '{}'", s)));
    }
    Ok(s.to_string())
}
