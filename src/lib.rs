//! Result sets for MariaDB client drivers
//!
//! Turns the raw, statement-scoped output of a MariaDB/MySQL driver (column
//! definitions plus rows of undecoded text-protocol fields) into a cursor
//! that can be iterated, indexed by column name or ordinal, and
//! materialized into records.
//!
//! Network transport, authentication and statement execution belong to
//! the driver; this crate starts where the driver hands over an
//! [`Execution`].
//!
//! # Example
//!
//! ```
//! use mariadb_resultset::protocol::constants::{MYSQL_TYPE_LONG, MYSQL_TYPE_VAR_STRING};
//! use mariadb_resultset::{
//!     ColumnMetadata, Execution, IterRowStream, RawRow, ResultSet, ResultSetOptions, RowSource,
//!     Value,
//! };
//!
//! fn main() -> mariadb_resultset::Result<()> {
//!     let rows: Vec<RawRow> = vec![
//!         [Some("1"), Some("alice")].into_iter().collect(),
//!         [Some("2"), None].into_iter().collect(),
//!     ];
//!
//!     // What a driver hands back after executing a SELECT
//!     let execution = Execution::Rows {
//!         columns: vec![
//!             ColumnMetadata::new("id", MYSQL_TYPE_LONG),
//!             ColumnMetadata::new("name", MYSQL_TYPE_VAR_STRING),
//!         ],
//!         rows: RowSource::stream(IterRowStream::from_rows(rows)),
//!     };
//!
//!     let mut rs = ResultSet::new(execution, &ResultSetOptions::streaming())?;
//!     while rs.advance_row()? {
//!         if rs.column_is_null("name")? {
//!             continue;
//!         }
//!         assert_eq!(rs.value_at("name")?, Value::Text("alice".to_string()));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod cursor;
pub mod driver;
pub mod error;
pub mod protocol;
pub mod result_set;

// Re-export main types
pub use config::{FetchMode, ResultSetOptions};
pub use cursor::{CursorState, RowCursor};
pub use driver::{Execution, IterRowStream, RowSource, RowStream};
pub use error::{DriverError, Error, Result};
pub use protocol::types::{
    Column, ColumnCatalog, ColumnMetadata, ColumnType, FromValue, RawField, RawRow, Record, Value,
};
pub use result_set::{ColumnIndex, Records, ResultSet};
