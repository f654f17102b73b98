//! MariaDB column type enum.
//!
//! Built from the raw `enum_field_types` code of a column definition.
//! Codes this crate does not know are kept as `Unsupported` so the rest of
//! the result stays readable; decoding such a column fails.

use crate::protocol::constants::*;

/// MariaDB wire column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// DECIMAL / NEWDECIMAL - exact numeric.
    Decimal,
    /// TINYINT.
    Tiny,
    /// SMALLINT.
    Short,
    /// INT.
    Long,
    /// FLOAT.
    Float,
    /// DOUBLE.
    Double,
    /// NULL literal column (e.g. `SELECT NULL`).
    Null,
    /// TIMESTAMP.
    Timestamp,
    /// BIGINT.
    LongLong,
    /// MEDIUMINT.
    Int24,
    /// DATE / NEWDATE.
    Date,
    /// TIME.
    Time,
    /// DATETIME.
    DateTime,
    /// YEAR.
    Year,
    /// VARCHAR.
    Varchar,
    /// BIT(n).
    Bit,
    /// JSON.
    Json,
    /// ENUM.
    Enum,
    /// SET.
    Set,
    /// TINYBLOB / TINYTEXT.
    TinyBlob,
    /// MEDIUMBLOB / MEDIUMTEXT.
    MediumBlob,
    /// LONGBLOB / LONGTEXT.
    LongBlob,
    /// BLOB / TEXT.
    Blob,
    /// VARCHAR / VARBINARY as sent by the server.
    VarString,
    /// CHAR / BINARY.
    String,
    /// Spatial types.
    Geometry,
    /// A type code this crate cannot decode.
    Unsupported(u8),
}

impl ColumnType {
    /// Create from a raw type code.
    pub fn from_raw(type_code: u8) -> Self {
        match type_code {
            MYSQL_TYPE_DECIMAL | MYSQL_TYPE_NEWDECIMAL => ColumnType::Decimal,
            MYSQL_TYPE_TINY => ColumnType::Tiny,
            MYSQL_TYPE_SHORT => ColumnType::Short,
            MYSQL_TYPE_LONG => ColumnType::Long,
            MYSQL_TYPE_FLOAT => ColumnType::Float,
            MYSQL_TYPE_DOUBLE => ColumnType::Double,
            MYSQL_TYPE_NULL => ColumnType::Null,
            MYSQL_TYPE_TIMESTAMP => ColumnType::Timestamp,
            MYSQL_TYPE_LONGLONG => ColumnType::LongLong,
            MYSQL_TYPE_INT24 => ColumnType::Int24,
            MYSQL_TYPE_DATE | MYSQL_TYPE_NEWDATE => ColumnType::Date,
            MYSQL_TYPE_TIME => ColumnType::Time,
            MYSQL_TYPE_DATETIME => ColumnType::DateTime,
            MYSQL_TYPE_YEAR => ColumnType::Year,
            MYSQL_TYPE_VARCHAR => ColumnType::Varchar,
            MYSQL_TYPE_BIT => ColumnType::Bit,
            MYSQL_TYPE_JSON => ColumnType::Json,
            MYSQL_TYPE_ENUM => ColumnType::Enum,
            MYSQL_TYPE_SET => ColumnType::Set,
            MYSQL_TYPE_TINY_BLOB => ColumnType::TinyBlob,
            MYSQL_TYPE_MEDIUM_BLOB => ColumnType::MediumBlob,
            MYSQL_TYPE_LONG_BLOB => ColumnType::LongBlob,
            MYSQL_TYPE_BLOB => ColumnType::Blob,
            MYSQL_TYPE_VAR_STRING => ColumnType::VarString,
            MYSQL_TYPE_STRING => ColumnType::String,
            MYSQL_TYPE_GEOMETRY => ColumnType::Geometry,
            other => ColumnType::Unsupported(other),
        }
    }

    /// Get the raw type code.
    pub fn type_code(&self) -> u8 {
        match self {
            ColumnType::Decimal => MYSQL_TYPE_NEWDECIMAL,
            ColumnType::Tiny => MYSQL_TYPE_TINY,
            ColumnType::Short => MYSQL_TYPE_SHORT,
            ColumnType::Long => MYSQL_TYPE_LONG,
            ColumnType::Float => MYSQL_TYPE_FLOAT,
            ColumnType::Double => MYSQL_TYPE_DOUBLE,
            ColumnType::Null => MYSQL_TYPE_NULL,
            ColumnType::Timestamp => MYSQL_TYPE_TIMESTAMP,
            ColumnType::LongLong => MYSQL_TYPE_LONGLONG,
            ColumnType::Int24 => MYSQL_TYPE_INT24,
            ColumnType::Date => MYSQL_TYPE_DATE,
            ColumnType::Time => MYSQL_TYPE_TIME,
            ColumnType::DateTime => MYSQL_TYPE_DATETIME,
            ColumnType::Year => MYSQL_TYPE_YEAR,
            ColumnType::Varchar => MYSQL_TYPE_VARCHAR,
            ColumnType::Bit => MYSQL_TYPE_BIT,
            ColumnType::Json => MYSQL_TYPE_JSON,
            ColumnType::Enum => MYSQL_TYPE_ENUM,
            ColumnType::Set => MYSQL_TYPE_SET,
            ColumnType::TinyBlob => MYSQL_TYPE_TINY_BLOB,
            ColumnType::MediumBlob => MYSQL_TYPE_MEDIUM_BLOB,
            ColumnType::LongBlob => MYSQL_TYPE_LONG_BLOB,
            ColumnType::Blob => MYSQL_TYPE_BLOB,
            ColumnType::VarString => MYSQL_TYPE_VAR_STRING,
            ColumnType::String => MYSQL_TYPE_STRING,
            ColumnType::Geometry => MYSQL_TYPE_GEOMETRY,
            ColumnType::Unsupported(code) => *code,
        }
    }

    /// Integer types (including YEAR).
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ColumnType::Tiny
                | ColumnType::Short
                | ColumnType::Long
                | ColumnType::Int24
                | ColumnType::LongLong
                | ColumnType::Year
        )
    }

    /// Character or binary string types whose payload depends on charset.
    pub fn is_string_like(&self) -> bool {
        matches!(
            self,
            ColumnType::Varchar
                | ColumnType::VarString
                | ColumnType::String
                | ColumnType::TinyBlob
                | ColumnType::MediumBlob
                | ColumnType::LongBlob
                | ColumnType::Blob
        )
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::Decimal => write!(f, "DECIMAL"),
            ColumnType::Tiny => write!(f, "TINYINT"),
            ColumnType::Short => write!(f, "SMALLINT"),
            ColumnType::Long => write!(f, "INT"),
            ColumnType::Float => write!(f, "FLOAT"),
            ColumnType::Double => write!(f, "DOUBLE"),
            ColumnType::Null => write!(f, "NULL"),
            ColumnType::Timestamp => write!(f, "TIMESTAMP"),
            ColumnType::LongLong => write!(f, "BIGINT"),
            ColumnType::Int24 => write!(f, "MEDIUMINT"),
            ColumnType::Date => write!(f, "DATE"),
            ColumnType::Time => write!(f, "TIME"),
            ColumnType::DateTime => write!(f, "DATETIME"),
            ColumnType::Year => write!(f, "YEAR"),
            ColumnType::Varchar | ColumnType::VarString => write!(f, "VARCHAR"),
            ColumnType::Bit => write!(f, "BIT"),
            ColumnType::Json => write!(f, "JSON"),
            ColumnType::Enum => write!(f, "ENUM"),
            ColumnType::Set => write!(f, "SET"),
            ColumnType::TinyBlob => write!(f, "TINYBLOB"),
            ColumnType::MediumBlob => write!(f, "MEDIUMBLOB"),
            ColumnType::LongBlob => write!(f, "LONGBLOB"),
            ColumnType::Blob => write!(f, "BLOB"),
            ColumnType::String => write!(f, "CHAR"),
            ColumnType::Geometry => write!(f, "GEOMETRY"),
            ColumnType::Unsupported(code) => write!(f, "UNSUPPORTED({})", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_integer_types() {
        assert_eq!(ColumnType::from_raw(MYSQL_TYPE_LONG), ColumnType::Long);
        assert_eq!(ColumnType::from_raw(MYSQL_TYPE_LONGLONG), ColumnType::LongLong);
        assert!(ColumnType::from_raw(MYSQL_TYPE_YEAR).is_integer());
        assert!(!ColumnType::from_raw(MYSQL_TYPE_DOUBLE).is_integer());
    }

    #[test]
    fn test_from_raw_aliases() {
        assert_eq!(ColumnType::from_raw(MYSQL_TYPE_NEWDECIMAL), ColumnType::Decimal);
        assert_eq!(ColumnType::from_raw(MYSQL_TYPE_DECIMAL), ColumnType::Decimal);
        assert_eq!(ColumnType::from_raw(MYSQL_TYPE_NEWDATE), ColumnType::Date);
    }

    #[test]
    fn test_from_raw_unsupported() {
        let t = ColumnType::from_raw(200);
        assert_eq!(t, ColumnType::Unsupported(200));
        assert_eq!(t.type_code(), 200);
        assert_eq!(format!("{}", t), "UNSUPPORTED(200)");
    }

    #[test]
    fn test_type_code_round_trip_for_known_codes() {
        for code in [
            MYSQL_TYPE_TINY,
            MYSQL_TYPE_VAR_STRING,
            MYSQL_TYPE_BLOB,
            MYSQL_TYPE_DATETIME,
            MYSQL_TYPE_GEOMETRY,
        ] {
            assert_eq!(ColumnType::from_raw(code).type_code(), code);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ColumnType::Long), "INT");
        assert_eq!(format!("{}", ColumnType::LongLong), "BIGINT");
        assert_eq!(format!("{}", ColumnType::DateTime), "DATETIME");
    }
}
