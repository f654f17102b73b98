//! Field decoders for the MariaDB text protocol.
//!
//! `decode_field` is the single path from a raw field to a `Value`. It is
//! pure: the same field and column always produce the same value.
//!
//! | Column type | Value |
//! |-------------|-------|
//! | TINYINT .. BIGINT, YEAR | `Integer` (`UnsignedInteger` for BIGINT UNSIGNED) |
//! | FLOAT, DOUBLE | `Float` |
//! | DECIMAL | `Decimal` |
//! | DATE | `Date` |
//! | DATETIME, TIMESTAMP | `DateTime` |
//! | TIME | `Time` |
//! | CHAR, VARCHAR, TEXT family | `Text`, or `Bytes` with the binary charset |
//! | ENUM, SET, JSON | `Text` |
//! | BIT, GEOMETRY | `Bytes` |
//! | NULL | `Null` (a payload is an error) |

mod date;
mod number;

pub use date::{decode_date, decode_datetime, decode_time};
pub use number::{decode_decimal, decode_float, decode_integer, decode_unsigned};

use crate::error::{Error, Result};
use crate::protocol::types::{Column, ColumnType, RawField, Value};

/// Decode one raw field according to its column.
///
/// NULL fields decode to `Value::Null` for every column type. Columns of an
/// unsupported wire type fail with `Error::UnsupportedColumnType`; malformed
/// payloads fail with `Error::InvalidField`.
pub fn decode_field(raw: &RawField, column: &Column) -> Result<Value> {
    let Some(bytes) = raw.bytes() else {
        return Ok(Value::Null);
    };

    let value = match column.column_type {
        ColumnType::Null => Err(Error::type_conversion("non-NULL payload for NULL column")),
        ColumnType::LongLong if column.is_unsigned() => {
            decode_unsigned(bytes).map(Value::UnsignedInteger)
        }
        ColumnType::Tiny
        | ColumnType::Short
        | ColumnType::Long
        | ColumnType::Int24
        | ColumnType::LongLong
        | ColumnType::Year => decode_integer(bytes).map(Value::Integer),
        ColumnType::Float | ColumnType::Double => decode_float(bytes).map(Value::Float),
        ColumnType::Decimal => decode_decimal(bytes).map(Value::Decimal),
        ColumnType::Date => decode_date(bytes).map(Value::Date),
        ColumnType::DateTime | ColumnType::Timestamp => {
            decode_datetime(bytes).map(Value::DateTime)
        }
        ColumnType::Time => decode_time(bytes).map(Value::Time),
        t if t.is_string_like() && column.is_binary() => Ok(Value::Bytes(bytes.clone())),
        ColumnType::Varchar
        | ColumnType::VarString
        | ColumnType::String
        | ColumnType::TinyBlob
        | ColumnType::MediumBlob
        | ColumnType::LongBlob
        | ColumnType::Blob
        | ColumnType::Enum
        | ColumnType::Set
        | ColumnType::Json => decode_text(bytes).map(Value::Text),
        ColumnType::Bit | ColumnType::Geometry => Ok(Value::Bytes(bytes.clone())),
        ColumnType::Unsupported(type_code) => {
            return Err(Error::UnsupportedColumnType {
                column: column.name.clone(),
                type_code,
            })
        }
    };

    value.map_err(|e| e.for_column(&column.name))
}

fn decode_text(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| Error::type_conversion(format!("invalid UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::constants::*;
    use crate::protocol::types::ColumnMetadata;
    use chrono::NaiveDate;

    fn column(type_code: u8) -> Column {
        Column::from_metadata(&ColumnMetadata::new("c", type_code), 0)
    }

    #[test]
    fn test_null_for_every_type() {
        for code in [MYSQL_TYPE_LONG, MYSQL_TYPE_BLOB, MYSQL_TYPE_DATE, 200] {
            assert_eq!(
                decode_field(&RawField::null(), &column(code)).unwrap(),
                Value::Null
            );
        }
    }

    #[test]
    fn test_null_type_rejects_payload() {
        match decode_field(&RawField::from("x"), &column(MYSQL_TYPE_NULL)) {
            Err(Error::InvalidField { column, message }) => {
                assert_eq!(column, "c");
                assert_eq!(message, "non-NULL payload for NULL column");
            }
            other => panic!("Expected InvalidField, got {:?}", other),
        }
        assert_eq!(
            decode_field(&RawField::null(), &column(MYSQL_TYPE_NULL)).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_decode_integers() {
        let raw = RawField::from("-42");
        assert_eq!(
            decode_field(&raw, &column(MYSQL_TYPE_TINY)).unwrap(),
            Value::Integer(-42)
        );
        assert_eq!(
            decode_field(&RawField::from("2024"), &column(MYSQL_TYPE_YEAR)).unwrap(),
            Value::Integer(2024)
        );
    }

    #[test]
    fn test_decode_unsigned_bigint() {
        let col = Column::from_metadata(
            &ColumnMetadata::new("c", MYSQL_TYPE_LONGLONG).with_flags(UNSIGNED_FLAG),
            0,
        );
        assert_eq!(
            decode_field(&RawField::from("18446744073709551615"), &col).unwrap(),
            Value::UnsignedInteger(u64::MAX)
        );
    }

    #[test]
    fn test_decode_text_and_binary() {
        let raw = RawField::from("héllo");
        assert_eq!(
            decode_field(&raw, &column(MYSQL_TYPE_VAR_STRING)).unwrap(),
            Value::Text("héllo".to_string())
        );

        let binary = Column::from_metadata(
            &ColumnMetadata::new("c", MYSQL_TYPE_BLOB).with_charset(CHARSET_BINARY),
            0,
        );
        let raw = RawField::new(vec![0xffu8, 0x00, 0x10]);
        match decode_field(&raw, &binary).unwrap() {
            Value::Bytes(b) => assert_eq!(&b[..], &[0xffu8, 0x00, 0x10]),
            other => panic!("Expected Bytes, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_invalid_utf8_text() {
        let raw = RawField::new(vec![0xffu8, 0xfe]);
        match decode_field(&raw, &column(MYSQL_TYPE_STRING)) {
            Err(Error::InvalidField { column, .. }) => assert_eq!(column, "c"),
            other => panic!("Expected InvalidField, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_temporal() {
        assert_eq!(
            decode_field(&RawField::from("2024-01-15"), &column(MYSQL_TYPE_NEWDATE)).unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
        let dt = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert_eq!(
            decode_field(&RawField::from("2024-01-15 08:00:00"), &column(MYSQL_TYPE_TIMESTAMP))
                .unwrap(),
            Value::DateTime(dt)
        );
    }

    #[test]
    fn test_decode_bit_is_bytes() {
        let raw = RawField::new(vec![0x01u8]);
        assert!(matches!(
            decode_field(&raw, &column(MYSQL_TYPE_BIT)).unwrap(),
            Value::Bytes(_)
        ));
    }

    #[test]
    fn test_decode_unsupported_type() {
        match decode_field(&RawField::from("x"), &column(200)) {
            Err(Error::UnsupportedColumnType { column, type_code }) => {
                assert_eq!(column, "c");
                assert_eq!(type_code, 200);
            }
            other => panic!("Expected UnsupportedColumnType, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_malformed_number_names_column() {
        match decode_field(&RawField::from("abc"), &column(MYSQL_TYPE_LONG)) {
            Err(Error::InvalidField { column, message }) => {
                assert_eq!(column, "c");
                assert!(message.contains("abc"));
            }
            other => panic!("Expected InvalidField, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_is_idempotent() {
        let raw = RawField::from("3.25");
        let col = column(MYSQL_TYPE_DOUBLE);
        let first = decode_field(&raw, &col).unwrap();
        let second = decode_field(&raw, &col).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, Value::Float(3.25));
    }
}
