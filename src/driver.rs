//! Interface to the upstream driver.
//!
//! A driver executes a statement and hands back an `Execution`: either the
//! outcome of a command that produced no rows, or column metadata plus a
//! row source. Row sources are fully materialized (`Vec<RawRow>`) or pulled
//! on demand through the `RowStream` trait.

use crate::error::DriverError;
use crate::protocol::types::{ColumnMetadata, RawRow};

/// Pull-based row source backed by the driver.
///
/// # Example
///
/// ```
/// use mariadb_resultset::{DriverError, RawRow, RowStream};
///
/// struct Countdown(u32);
///
/// impl RowStream for Countdown {
///     fn next_row(&mut self) -> Result<Option<RawRow>, DriverError> {
///         if self.0 == 0 {
///             return Ok(None);
///         }
///         self.0 -= 1;
///         let text = self.0.to_string();
///         Ok(Some([Some(text.as_str())].into_iter().collect()))
///     }
/// }
/// ```
pub trait RowStream {
    /// Fetch the next row.
    ///
    /// Returns `Ok(None)` at end of data. An `Err` reports a transport or
    /// execution failure; the result set treats it as terminal.
    fn next_row(&mut self) -> Result<Option<RawRow>, DriverError>;

    /// Release driver resources (buffers, server-side cursor).
    ///
    /// Called at most once, when the stream ends, fails, or its result set
    /// is closed or dropped.
    fn close(&mut self) {}
}

/// Rows of one execution as delivered by the driver.
pub enum RowSource {
    /// All rows already in memory.
    Materialized(Vec<RawRow>),
    /// Rows pulled one at a time.
    Stream(Box<dyn RowStream + Send>),
}

impl RowSource {
    /// Wrap a driver stream.
    pub fn stream(stream: impl RowStream + Send + 'static) -> Self {
        RowSource::Stream(Box::new(stream))
    }
}

impl std::fmt::Debug for RowSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowSource::Materialized(rows) => {
                f.debug_tuple("Materialized").field(&rows.len()).finish()
            }
            RowSource::Stream(_) => f.write_str("Stream"),
        }
    }
}

/// Outcome of executing one statement.
#[derive(Debug)]
pub enum Execution {
    /// Statement produced no result set (DDL, INSERT, UPDATE, ...).
    Command { affected_rows: u64 },
    /// Statement produced a result set.
    Rows {
        columns: Vec<ColumnMetadata>,
        rows: RowSource,
    },
}

/// `RowStream` over any iterator of fetch results.
///
/// Useful for drivers that already expose an iterator, and for feeding
/// canned rows in tests.
pub struct IterRowStream<I> {
    iter: I,
}

impl<I> IterRowStream<I>
where
    I: Iterator<Item = Result<RawRow, DriverError>>,
{
    /// Create a stream from an iterator.
    pub fn new(iter: I) -> Self {
        Self { iter }
    }
}

type MaterializedRows =
    std::iter::Map<std::vec::IntoIter<RawRow>, fn(RawRow) -> Result<RawRow, DriverError>>;

impl IterRowStream<MaterializedRows> {
    /// Stream rows that are already in memory.
    pub fn from_rows(rows: Vec<RawRow>) -> Self {
        let ok: fn(RawRow) -> Result<RawRow, DriverError> = Ok;
        Self::new(rows.into_iter().map(ok))
    }
}

impl<I> RowStream for IterRowStream<I>
where
    I: Iterator<Item = Result<RawRow, DriverError>>,
{
    fn next_row(&mut self) -> Result<Option<RawRow>, DriverError> {
        self.iter.next().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_stream_yields_then_ends() {
        let rows: Vec<RawRow> = vec![
            [Some("1")].into_iter().collect(),
            [Some("2")].into_iter().collect(),
        ];
        let mut stream = IterRowStream::from_rows(rows.clone());
        assert_eq!(stream.next_row().unwrap(), Some(rows[0].clone()));
        assert_eq!(stream.next_row().unwrap(), Some(rows[1].clone()));
        assert_eq!(stream.next_row().unwrap(), None);
    }

    #[test]
    fn test_iter_stream_passes_errors() {
        let items: Vec<Result<RawRow, DriverError>> = vec![Err("connection lost".into())];
        let mut stream = IterRowStream::new(items.into_iter());
        let err = stream.next_row().unwrap_err();
        assert_eq!(err.to_string(), "connection lost");
    }
}
