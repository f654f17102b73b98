//! Result set facade.
//!
//! A `ResultSet` combines the column catalog of one executed statement with
//! a cursor over its rows, and decodes fields on access.
//!
//! Two modes are supported, chosen when the result set is built:
//!
//! - **Buffered**: every row is fetched upfront. `row_count` is exact and
//!   the rows can be replayed with `reset`/`seek` or collected with
//!   `all_rows`. Driver errors can only surface during construction.
//! - **Streaming**: rows are pulled from the driver on each `advance_row`.
//!   Single pass; `row_count` reports rows fetched so far, and a driver
//!   failure is returned from `advance_row` and ends the stream.
//!
//! # Example
//!
//! ```
//! use mariadb_resultset::protocol::constants::{MYSQL_TYPE_LONG, MYSQL_TYPE_VAR_STRING};
//! use mariadb_resultset::{ColumnMetadata, RawRow, ResultSet};
//!
//! # fn main() -> mariadb_resultset::Result<()> {
//! let columns = vec![
//!     ColumnMetadata::new("id", MYSQL_TYPE_LONG),
//!     ColumnMetadata::new("name", MYSQL_TYPE_VAR_STRING),
//! ];
//! let rows: Vec<RawRow> = vec![
//!     [Some("1"), Some("a")].into_iter().collect(),
//!     [Some("2"), None].into_iter().collect(),
//! ];
//!
//! let mut rs = ResultSet::buffered(columns, rows)?;
//! while rs.advance_row()? {
//!     let id: i64 = rs.get("id")?;
//!     let name: Option<String> = rs.get("name")?;
//!     println!("{} {:?}", id, name);
//! }
//! assert_eq!(rs.row_count(), 2);
//! # Ok(())
//! # }
//! ```

use crate::config::{FetchMode, ResultSetOptions};
use crate::cursor::{CursorState, RowCursor};
use crate::driver::{Execution, IterRowStream, RowSource, RowStream};
use crate::error::{Error, Result};
use crate::protocol::decode::decode_field;
use crate::protocol::types::{ColumnCatalog, ColumnMetadata, FromValue, RawRow, Record, Value};

/// A column reference: ordinal (`usize`) or name (`&str`, `String`).
pub trait ColumnIndex {
    /// Resolve to an ordinal within `catalog`.
    fn resolve(&self, catalog: &ColumnCatalog) -> Result<usize>;
}

impl ColumnIndex for usize {
    fn resolve(&self, catalog: &ColumnCatalog) -> Result<usize> {
        catalog.column(*self).map(|c| c.ordinal)
    }
}

impl ColumnIndex for str {
    fn resolve(&self, catalog: &ColumnCatalog) -> Result<usize> {
        catalog.index_of(self)
    }
}

impl ColumnIndex for String {
    fn resolve(&self, catalog: &ColumnCatalog) -> Result<usize> {
        catalog.index_of(self)
    }
}

impl<T: ColumnIndex + ?Sized> ColumnIndex for &T {
    fn resolve(&self, catalog: &ColumnCatalog) -> Result<usize> {
        (**self).resolve(catalog)
    }
}

/// Rows and columns of one executed statement.
///
/// Owns its row source exclusively; dropping the result set (or calling
/// `close`) releases the driver stream.
#[derive(Debug)]
pub struct ResultSet {
    catalog: ColumnCatalog,
    cursor: RowCursor,
    affected_rows: Option<u64>,
}

impl ResultSet {
    /// Build a result set from a driver execution.
    ///
    /// A materialized source consumed in streaming mode is replayed as a
    /// stream; a stream consumed in buffered mode is drained here, and any
    /// driver failure while draining is returned as `Error::Driver`.
    pub fn new(execution: Execution, options: &ResultSetOptions) -> Result<Self> {
        let (columns, rows) = match execution {
            Execution::Command { affected_rows } => return Ok(Self::from_command(affected_rows)),
            Execution::Rows { columns, rows } => (columns, rows),
        };

        let catalog = match ColumnCatalog::new(&columns) {
            Ok(catalog) => catalog,
            Err(e) => {
                if let RowSource::Stream(mut stream) = rows {
                    stream.close();
                }
                return Err(e);
            }
        };
        let width = catalog.len();

        let cursor = match (options.mode, rows) {
            (FetchMode::Buffered, RowSource::Materialized(rows)) => {
                check_buffer_limit(rows.len(), options.max_buffered_rows)?;
                RowCursor::buffered(rows, width)?
            }
            (FetchMode::Buffered, RowSource::Stream(stream)) => {
                let rows = drain(stream, options.max_buffered_rows)?;
                RowCursor::buffered(rows, width)?
            }
            (FetchMode::Streaming, RowSource::Stream(stream)) => {
                RowCursor::streaming(stream, width)
            }
            (FetchMode::Streaming, RowSource::Materialized(rows)) => RowCursor::streaming(
                Box::new(IterRowStream::from_rows(rows)),
                width,
            ),
        };

        tracing::debug!(
            mode = %options.mode,
            columns = width,
            rows = cursor.rows_seen(),
            "opened result set"
        );

        Ok(Self {
            catalog,
            cursor,
            affected_rows: None,
        })
    }

    /// Buffered result set over rows already in memory.
    pub fn buffered(columns: Vec<ColumnMetadata>, rows: Vec<RawRow>) -> Result<Self> {
        Self::new(
            Execution::Rows {
                columns,
                rows: RowSource::Materialized(rows),
            },
            &ResultSetOptions::buffered(),
        )
    }

    /// Streaming result set pulling rows from `stream`.
    pub fn streaming(
        columns: Vec<ColumnMetadata>,
        stream: impl RowStream + Send + 'static,
    ) -> Result<Self> {
        Self::new(
            Execution::Rows {
                columns,
                rows: RowSource::stream(stream),
            },
            &ResultSetOptions::streaming(),
        )
    }

    /// Empty result of a statement that produced no rows.
    pub fn from_command(affected_rows: u64) -> Self {
        Self {
            catalog: ColumnCatalog::empty(),
            cursor: RowCursor::empty(),
            affected_rows: Some(affected_rows),
        }
    }

    /// Get the fetch mode.
    pub fn mode(&self) -> FetchMode {
        self.cursor.mode()
    }

    /// Get the cursor state.
    pub fn state(&self) -> CursorState {
        self.cursor.state()
    }

    /// Get the column catalog.
    pub fn columns(&self) -> &ColumnCatalog {
        &self.catalog
    }

    /// Get column names in ordinal order.
    pub fn column_names(&self) -> Vec<&str> {
        self.catalog.names()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.catalog.len()
    }

    /// Rows affected by a command, `None` for row-producing statements.
    pub fn affected_rows(&self) -> Option<u64> {
        self.affected_rows
    }

    /// Number of rows.
    ///
    /// Exact in buffered mode. In streaming mode the total is not known
    /// upfront, so this reports the rows fetched so far.
    pub fn row_count(&self) -> u64 {
        self.cursor.rows_seen()
    }

    /// Move to the next row.
    ///
    /// `Ok(false)` means there are no more rows. `Err(Error::Driver)` means
    /// fetching the next row failed (streaming mode only); the result set is
    /// exhausted afterwards.
    pub fn advance_row(&mut self) -> Result<bool> {
        self.cursor.advance()
    }

    /// Check whether a column of the current row is NULL.
    pub fn column_is_null<I: ColumnIndex>(&self, index: I) -> Result<bool> {
        let ordinal = index.resolve(&self.catalog)?;
        Ok(self.cursor.field_at(ordinal)?.is_null())
    }

    /// Decode a column of the current row.
    pub fn value_at<I: ColumnIndex>(&self, index: I) -> Result<Value> {
        let ordinal = index.resolve(&self.catalog)?;
        let column = self.catalog.column(ordinal)?;
        decode_field(self.cursor.field_at(ordinal)?, column)
    }

    /// Decode a column of the current row into a concrete type.
    ///
    /// Use `Option<T>` for nullable columns; NULL into a plain `T` fails
    /// with `Error::NullValue`.
    pub fn get<T: FromValue, I: ColumnIndex>(&self, index: I) -> Result<T> {
        let ordinal = index.resolve(&self.catalog)?;
        let name = &self.catalog.column(ordinal)?.name;
        let value = self.value_at(ordinal)?;
        T::from_value(value).map_err(|e| e.for_column(name))
    }

    /// Materialize the current row as a record.
    ///
    /// Fails if any field of the row fails to decode, e.g. a zero date.
    pub fn current_row_as_record(&self) -> Result<Record> {
        self.record_from(self.cursor.current_row()?)
    }

    /// Materialize every row. Buffered only; the cursor does not move.
    ///
    /// All or nothing: a single undecodable field anywhere in the result
    /// (such as a `0000-00-00` date, which is rejected) fails the whole
    /// call. Walk the rows with `value_at` to skip past such fields.
    pub fn all_rows(&self) -> Result<Vec<Record>> {
        let rows = self
            .cursor
            .buffered_rows()
            .ok_or(Error::UnsupportedOperation {
                operation: "all_rows",
                mode: FetchMode::Streaming,
            })?;
        rows.iter().map(|row| self.record_from(row)).collect()
    }

    /// Return to before the first row. Buffered only.
    pub fn reset(&mut self) -> Result<()> {
        self.cursor.reset()
    }

    /// Position on the row at `index`. Buffered only.
    pub fn seek(&mut self, index: usize) -> Result<()> {
        self.cursor.seek(index)
    }

    /// Iterate over the remaining rows as records.
    ///
    /// Advances the cursor. Stops after the first error.
    pub fn records(&mut self) -> Records<'_> {
        Records {
            result_set: self,
            done: false,
        }
    }

    /// Release the row source now instead of at drop.
    pub fn close(mut self) {
        self.cursor.close();
    }

    fn record_from(&self, row: &RawRow) -> Result<Record> {
        self.catalog
            .iter()
            .zip(row.fields())
            .map(|(column, raw)| decode_field(raw, column).map(|v| (column.name.clone(), v)))
            .collect::<Result<Vec<_>>>()
            .map(Record::new)
    }
}

/// Iterator over the remaining rows of a result set, see `ResultSet::records`.
pub struct Records<'a> {
    result_set: &'a mut ResultSet,
    done: bool,
}

impl Iterator for Records<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = match self.result_set.advance_row() {
            Ok(true) => self.result_set.current_row_as_record(),
            Ok(false) => {
                self.done = true;
                return None;
            }
            Err(e) => Err(e),
        };
        self.done = item.is_err();
        Some(item)
    }
}

fn check_buffer_limit(rows: usize, limit: Option<usize>) -> Result<()> {
    match limit {
        Some(limit) if rows > limit => Err(Error::BufferLimitExceeded { limit }),
        _ => Ok(()),
    }
}

/// Pull every row out of a driver stream, closing it afterwards.
fn drain(mut stream: Box<dyn RowStream + Send>, limit: Option<usize>) -> Result<Vec<RawRow>> {
    let mut rows = Vec::new();
    let outcome = loop {
        match stream.next_row() {
            Ok(Some(row)) => {
                rows.push(row);
                if let Err(e) = check_buffer_limit(rows.len(), limit) {
                    break Err(e);
                }
            }
            Ok(None) => break Ok(()),
            Err(e) => break Err(Error::Driver(e)),
        }
    };
    stream.close();

    match outcome {
        Ok(()) => {
            tracing::debug!(rows = rows.len(), "buffered driver stream");
            Ok(rows)
        }
        Err(e) => {
            tracing::warn!(error = %e, rows = rows.len(), "failed to buffer driver stream");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::constants::*;

    fn columns() -> Vec<ColumnMetadata> {
        vec![
            ColumnMetadata::new("id", MYSQL_TYPE_LONG),
            ColumnMetadata::new("name", MYSQL_TYPE_VAR_STRING),
        ]
    }

    fn rows() -> Vec<RawRow> {
        vec![
            [Some("1"), Some("a")].into_iter().collect(),
            [Some("2"), None].into_iter().collect(),
            [Some("3"), Some("c")].into_iter().collect(),
        ]
    }

    #[test]
    fn test_column_index_resolution() {
        let rs = ResultSet::buffered(columns(), rows()).unwrap();
        let catalog = rs.columns();
        assert_eq!(1usize.resolve(catalog).unwrap(), 1);
        assert_eq!("name".resolve(catalog).unwrap(), 1);
        assert_eq!(String::from("id").resolve(catalog).unwrap(), 0);
        assert!(matches!(
            5usize.resolve(catalog),
            Err(Error::IndexOutOfRange { index: 5, count: 2 })
        ));
    }

    #[test]
    fn test_get_typed() {
        let mut rs = ResultSet::buffered(columns(), rows()).unwrap();
        rs.seek(1).unwrap();
        assert_eq!(rs.get::<i64, _>("id").unwrap(), 2);
        assert_eq!(rs.get::<Option<String>, _>("name").unwrap(), None);
        match rs.get::<String, _>("name") {
            Err(Error::NullValue { column }) => assert_eq!(column, "name"),
            other => panic!("Expected NullValue, got {:?}", other),
        }
        match rs.get::<chrono::NaiveDate, _>(0) {
            Err(Error::InvalidField { column, .. }) => assert_eq!(column, "id"),
            other => panic!("Expected InvalidField, got {:?}", other),
        }
    }

    #[test]
    fn test_buffer_limit() {
        let err = ResultSet::new(
            Execution::Rows {
                columns: columns(),
                rows: RowSource::Materialized(rows()),
            },
            &ResultSetOptions::buffered().with_max_buffered_rows(2),
        )
        .unwrap_err();
        assert!(matches!(err, Error::BufferLimitExceeded { limit: 2 }));

        let err = ResultSet::new(
            Execution::Rows {
                columns: columns(),
                rows: RowSource::stream(IterRowStream::from_rows(rows())),
            },
            &ResultSetOptions::buffered().with_max_buffered_rows(1),
        )
        .unwrap_err();
        assert!(matches!(err, Error::BufferLimitExceeded { limit: 1 }));
    }

    #[test]
    fn test_command_result() {
        let mut rs = ResultSet::new(
            Execution::Command { affected_rows: 4 },
            &ResultSetOptions::default(),
        )
        .unwrap();
        assert_eq!(rs.affected_rows(), Some(4));
        assert_eq!(rs.column_count(), 0);
        assert_eq!(rs.row_count(), 0);
        assert!(!rs.advance_row().unwrap());
        assert!(rs.all_rows().unwrap().is_empty());
    }

    #[test]
    fn test_empty_metadata_for_row_result_is_malformed() {
        let err = ResultSet::buffered(Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, Error::MalformedMetadata { .. }));
    }
}
