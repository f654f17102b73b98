//! MariaDB column definitions, values and text-protocol field decoding.

pub mod constants;
pub mod decode;
pub mod types;

pub use decode::decode_field;
pub use types::{
    Column, ColumnCatalog, ColumnMetadata, ColumnType, FromValue, RawField, RawRow, Record, Value,
};
