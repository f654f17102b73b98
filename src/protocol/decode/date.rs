//! Text-protocol temporal decoders.
//!
//! MariaDB sends temporal values as text:
//! - DATE: `YYYY-MM-DD`
//! - DATETIME / TIMESTAMP: `YYYY-MM-DD HH:MM:SS[.ffffff]`
//! - TIME: `[-]HHH:MM:SS[.ffffff]`, hours up to 838
//!
//! Zero dates (`0000-00-00`) are rejected: they have no calendar value.

use crate::error::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

const MAX_TIME_HOURS: i64 = 838;

fn text(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes)
        .map_err(|_| Error::type_conversion("temporal value is not ASCII"))
}

fn reject_zero_date(s: &str) -> Result<()> {
    if s.starts_with("0000-00-00") {
        return Err(Error::type_conversion(format!("zero date '{}'", s)));
    }
    Ok(())
}

/// Decode a DATE.
pub fn decode_date(bytes: &[u8]) -> Result<NaiveDate> {
    let s = text(bytes)?;
    reject_zero_date(s)?;
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| Error::type_conversion(format!("invalid DATE '{}': {}", s, e)))
}

/// Decode a DATETIME or TIMESTAMP.
pub fn decode_datetime(bytes: &[u8]) -> Result<NaiveDateTime> {
    let s = text(bytes)?;
    reject_zero_date(s)?;
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .map_err(|e| Error::type_conversion(format!("invalid DATETIME '{}': {}", s, e)))
}

/// Decode a TIME as a signed duration.
pub fn decode_time(bytes: &[u8]) -> Result<TimeDelta> {
    let s = text(bytes)?;
    let invalid = || Error::type_conversion(format!("invalid TIME '{}'", s));

    let (negative, rest) = match s.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, s),
    };
    let (clock, fraction) = match rest.split_once('.') {
        Some((c, f)) => (c, Some(f)),
        None => (rest, None),
    };

    let mut parts = clock.split(':');
    let (Some(h), Some(m), Some(sec), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let parse = |part: &str| -> Result<i64> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        part.parse().map_err(|_| invalid())
    };
    let hours = parse(h)?;
    let minutes = parse(m)?;
    let seconds = parse(sec)?;
    if hours > MAX_TIME_HOURS || minutes > 59 || seconds > 59 {
        return Err(invalid());
    }

    let micros = match fraction {
        None => 0,
        Some(f) if !f.is_empty() && f.len() <= 6 => parse(f)? * 10i64.pow(6 - f.len() as u32),
        Some(_) => return Err(invalid()),
    };

    let magnitude = TimeDelta::hours(hours)
        + TimeDelta::minutes(minutes)
        + TimeDelta::seconds(seconds)
        + TimeDelta::microseconds(micros);
    Ok(if negative { -magnitude } else { magnitude })
}
