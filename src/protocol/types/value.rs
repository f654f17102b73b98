//! Decoded column values.

use bytes::Bytes;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use std::fmt;

use crate::error::{Error, Result};

/// Value enum representing a single decoded field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL value.
    Null,
    /// Signed integer (TINYINT .. BIGINT, YEAR).
    Integer(i64),
    /// BIGINT UNSIGNED, which may not fit in `i64`.
    UnsignedInteger(u64),
    /// FLOAT / DOUBLE.
    Float(f64),
    /// DECIMAL as text (preserves precision).
    Decimal(String),
    /// Character data.
    Text(String),
    /// Binary data (binary strings, blobs, BIT, GEOMETRY).
    Bytes(Bytes),
    /// DATE.
    Date(NaiveDate),
    /// DATETIME / TIMESTAMP.
    DateTime(NaiveDateTime),
    /// TIME, signed and possibly longer than a day.
    Time(TimeDelta),
}

impl Value {
    /// Check if the value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get the value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Decimal(s) => Some(s),
            _ => None,
        }
    }

    /// Try to convert to i64.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::UnsignedInteger(u) => i64::try_from(*u).ok(),
            Value::Decimal(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Try to convert to f64.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            Value::UnsignedInteger(u) => Some(*u as f64),
            Value::Decimal(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Try to get the value as raw bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            Value::Text(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Try to get the value as a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::DateTime(dt) => Some(dt.date()),
            _ => None,
        }
    }

    /// Try to get the value as a date/time (DATE values at midnight).
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            Value::Date(d) => d.and_hms_opt(0, 0, 0),
            _ => None,
        }
    }

    /// Name of the variant, used in conversion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Integer(_) => "integer",
            Value::UnsignedInteger(_) => "unsigned integer",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Time(_) => "time",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::UnsignedInteger(u) => write!(f, "{}", u),
            Value::Float(v) => write!(f, "{}", v),
            Value::Decimal(s) => write!(f, "{}", s),
            Value::Text(s) => write!(f, "{}", s),
            Value::Bytes(b) => write!(f, "<BYTES: {} bytes>", b.len()),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f")),
            Value::Time(t) => {
                let sign = if *t < TimeDelta::zero() { "-" } else { "" };
                let total = t.num_seconds().abs();
                write!(
                    f,
                    "{}{:02}:{:02}:{:02}",
                    sign,
                    total / 3600,
                    (total / 60) % 60,
                    total % 60
                )
            }
        }
    }
}

/// Conversion from a decoded `Value` into a concrete Rust type.
///
/// Implemented for the scalar types a column can hold. NULL converts only
/// into `Option<T>` or `Value`; other targets return `Error::NullValue`.
pub trait FromValue: Sized {
    /// Convert the value, consuming it.
    fn from_value(value: Value) -> Result<Self>;
}

fn unexpected_null() -> Error {
    Error::NullValue {
        column: String::new(),
    }
}

fn mismatch(value: &Value, target: &str) -> Error {
    Error::type_conversion(format!("cannot convert {} to {}", value.kind(), target))
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Err(unexpected_null()),
            Value::Integer(i) => Ok(i),
            Value::UnsignedInteger(u) => i64::try_from(u)
                .map_err(|_| Error::type_conversion(format!("{} out of range for i64", u))),
            other => Err(mismatch(&other, "i64")),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> Result<Self> {
        let wide = i64::from_value(value)?;
        i32::try_from(wide)
            .map_err(|_| Error::type_conversion(format!("{} out of range for i32", wide)))
    }
}

impl FromValue for u64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Err(unexpected_null()),
            Value::UnsignedInteger(u) => Ok(u),
            Value::Integer(i) => u64::try_from(i)
                .map_err(|_| Error::type_conversion(format!("{} out of range for u64", i))),
            other => Err(mismatch(&other, "u64")),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Err(unexpected_null()),
            Value::Float(f) => Ok(f),
            Value::Integer(i) => Ok(i as f64),
            Value::Decimal(ref s) => s
                .parse()
                .map_err(|_| Error::type_conversion(format!("invalid decimal '{}'", s))),
            other => Err(mismatch(&other, "f64")),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Err(unexpected_null()),
            Value::Integer(i) => Ok(i != 0),
            Value::UnsignedInteger(u) => Ok(u != 0),
            other => Err(mismatch(&other, "bool")),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Err(unexpected_null()),
            Value::Text(s) | Value::Decimal(s) => Ok(s),
            other => Err(mismatch(&other, "String")),
        }
    }
}

impl FromValue for Bytes {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Err(unexpected_null()),
            Value::Bytes(b) => Ok(b),
            Value::Text(s) => Ok(Bytes::from(s)),
            other => Err(mismatch(&other, "bytes")),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self> {
        Bytes::from_value(value).map(|b| b.to_vec())
    }
}

impl FromValue for NaiveDate {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Err(unexpected_null()),
            Value::Date(d) => Ok(d),
            other => Err(mismatch(&other, "NaiveDate")),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Err(unexpected_null()),
            ref v @ (Value::DateTime(_) | Value::Date(_)) => {
                v.as_datetime().ok_or_else(|| mismatch(v, "NaiveDateTime"))
            }
            other => Err(mismatch(&other, "NaiveDateTime")),
        }
    }
}

impl FromValue for TimeDelta {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Err(unexpected_null()),
            Value::Time(t) => Ok(t),
            other => Err(mismatch(&other, "TimeDelta")),
        }
    }
}
