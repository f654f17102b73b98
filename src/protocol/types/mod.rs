//! MariaDB data types for query results.

mod column;
mod column_type;
mod field;
mod metadata;
mod record;
mod value;

pub use column::{Column, ColumnCatalog};
pub use column_type::ColumnType;
pub use field::{RawField, RawRow};
pub use metadata::ColumnMetadata;
pub use record::Record;
pub use value::{FromValue, Value};
