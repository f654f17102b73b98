//! Cursor over the rows of one result.
//!
//! `RowCursor` tracks the current row of either a buffered (in-memory,
//! replayable) or a streaming (single-pass, driver-backed) row source.
//!
//! ```text
//! NotStarted --advance--> Positioned --advance--> Positioned ... --> Exhausted
//!      ^                                                                |
//!      +------------------------ reset (buffered only) -----------------+
//! ```

use crate::config::FetchMode;
use crate::driver::RowStream;
use crate::error::{Error, Result};
use crate::protocol::types::{RawField, RawRow};

/// Position of a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// No row has been fetched yet.
    NotStarted,
    /// On a row.
    Positioned,
    /// Past the last row. Terminal for streaming cursors.
    Exhausted,
}

enum RowBuffer {
    Buffered {
        rows: Vec<RawRow>,
        /// Index of the current row; meaningful only when positioned.
        pos: usize,
    },
    Streaming {
        stream: Box<dyn RowStream + Send>,
        current: Option<RawRow>,
        /// Whether `RowStream::close` has been called.
        closed: bool,
    },
}

/// Row-by-row cursor.
///
/// Owns its row source. A streaming cursor closes the driver stream when
/// the stream ends, fails, or the cursor is closed or dropped.
pub struct RowCursor {
    source: RowBuffer,
    state: CursorState,
    /// Expected fields per row.
    width: usize,
    /// Total rows when buffered, rows fetched so far when streaming.
    rows_seen: u64,
}

impl RowCursor {
    /// Create a cursor over rows already in memory.
    ///
    /// Returns `Error::MalformedRow` if any row's width differs from `width`.
    pub fn buffered(rows: Vec<RawRow>, width: usize) -> Result<Self> {
        if let Some(bad) = rows.iter().find(|r| r.len() != width) {
            return Err(Error::MalformedRow {
                expected: width,
                actual: bad.len(),
            });
        }
        Ok(Self {
            rows_seen: rows.len() as u64,
            source: RowBuffer::Buffered { rows, pos: 0 },
            state: CursorState::NotStarted,
            width,
        })
    }

    /// Cursor with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            source: RowBuffer::Buffered {
                rows: Vec::new(),
                pos: 0,
            },
            state: CursorState::NotStarted,
            width: 0,
            rows_seen: 0,
        }
    }

    /// Create a cursor that pulls rows from a driver stream.
    pub fn streaming(stream: Box<dyn RowStream + Send>, width: usize) -> Self {
        Self {
            source: RowBuffer::Streaming {
                stream,
                current: None,
                closed: false,
            },
            state: CursorState::NotStarted,
            width,
            rows_seen: 0,
        }
    }

    /// Get the fetch mode.
    pub fn mode(&self) -> FetchMode {
        match self.source {
            RowBuffer::Buffered { .. } => FetchMode::Buffered,
            RowBuffer::Streaming { .. } => FetchMode::Streaming,
        }
    }

    /// Get the cursor state.
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Rows known so far: all rows when buffered, rows fetched when streaming.
    pub fn rows_seen(&self) -> u64 {
        self.rows_seen
    }

    /// All rows of a buffered cursor, `None` when streaming.
    pub fn buffered_rows(&self) -> Option<&[RawRow]> {
        match &self.source {
            RowBuffer::Buffered { rows, .. } => Some(rows),
            RowBuffer::Streaming { .. } => None,
        }
    }

    /// Move to the next row.
    ///
    /// Returns `Ok(false)` once there are no more rows. In streaming mode a
    /// driver failure is returned as `Error::Driver` and ends the cursor;
    /// every later call returns `Ok(false)`.
    pub fn advance(&mut self) -> Result<bool> {
        if self.state == CursorState::Exhausted {
            return Ok(false);
        }

        match &mut self.source {
            RowBuffer::Buffered { rows, pos } => {
                let next = match self.state {
                    CursorState::NotStarted => 0,
                    _ => *pos + 1,
                };
                if next < rows.len() {
                    *pos = next;
                    self.state = CursorState::Positioned;
                    Ok(true)
                } else {
                    self.state = CursorState::Exhausted;
                    Ok(false)
                }
            }
            RowBuffer::Streaming { stream, current, .. } => {
                *current = None;
                match stream.next_row() {
                    Ok(Some(row)) if row.len() == self.width => {
                        *current = Some(row);
                        self.rows_seen += 1;
                        self.state = CursorState::Positioned;
                        tracing::trace!(row = self.rows_seen, "fetched row");
                        Ok(true)
                    }
                    Ok(Some(row)) => {
                        let err = Error::MalformedRow {
                            expected: self.width,
                            actual: row.len(),
                        };
                        tracing::warn!(error = %err, "stream yielded malformed row");
                        self.finish();
                        Err(err)
                    }
                    Ok(None) => {
                        tracing::debug!(rows = self.rows_seen, "stream exhausted");
                        self.finish();
                        Ok(false)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, rows = self.rows_seen, "driver failed mid-stream");
                        self.finish();
                        Err(Error::Driver(e))
                    }
                }
            }
        }
    }

    /// Get the current row.
    pub fn current_row(&self) -> Result<&RawRow> {
        if self.state != CursorState::Positioned {
            return Err(Error::CursorNotPositioned);
        }
        let row = match &self.source {
            RowBuffer::Buffered { rows, pos } => rows.get(*pos),
            RowBuffer::Streaming { current, .. } => current.as_ref(),
        };
        row.ok_or(Error::CursorNotPositioned)
    }

    /// Get a field of the current row by ordinal.
    pub fn field_at(&self, ordinal: usize) -> Result<&RawField> {
        let row = self.current_row()?;
        row.get(ordinal).ok_or(Error::IndexOutOfRange {
            index: ordinal,
            count: self.width,
        })
    }

    /// Return to before the first row. Buffered only; no data is discarded.
    pub fn reset(&mut self) -> Result<()> {
        match &mut self.source {
            RowBuffer::Buffered { pos, .. } => {
                *pos = 0;
                self.state = CursorState::NotStarted;
                Ok(())
            }
            RowBuffer::Streaming { .. } => Err(Error::UnsupportedOperation {
                operation: "reset",
                mode: FetchMode::Streaming,
            }),
        }
    }

    /// Position directly on a row. Buffered only.
    pub fn seek(&mut self, index: usize) -> Result<()> {
        match &mut self.source {
            RowBuffer::Buffered { rows, pos } => {
                if index >= rows.len() {
                    return Err(Error::RowOutOfRange {
                        index,
                        count: rows.len(),
                    });
                }
                *pos = index;
                self.state = CursorState::Positioned;
                Ok(())
            }
            RowBuffer::Streaming { .. } => Err(Error::UnsupportedOperation {
                operation: "seek",
                mode: FetchMode::Streaming,
            }),
        }
    }

    /// Release the driver stream. Idempotent; a no-op for buffered cursors.
    pub fn close(&mut self) {
        if let RowBuffer::Streaming { .. } = self.source {
            self.finish();
        }
    }

    /// Mark a streaming cursor exhausted and close its stream once.
    fn finish(&mut self) {
        self.state = CursorState::Exhausted;
        if let RowBuffer::Streaming {
            stream,
            current,
            closed,
        } = &mut self.source
        {
            *current = None;
            if !*closed {
                *closed = true;
                stream.close();
                tracing::debug!(rows = self.rows_seen, "closed row stream");
            }
        }
    }
}

impl Drop for RowCursor {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for RowCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowCursor")
            .field("mode", &self.mode())
            .field("state", &self.state)
            .field("width", &self.width)
            .field("rows_seen", &self.rows_seen)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::IterRowStream;
    use crate::error::DriverError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn rows() -> Vec<RawRow> {
        vec![
            [Some("1"), Some("a")].into_iter().collect(),
            [Some("2"), None].into_iter().collect(),
        ]
    }

    struct CountingStream {
        inner: Box<dyn RowStream + Send>,
        closes: Arc<AtomicUsize>,
    }

    impl RowStream for CountingStream {
        fn next_row(&mut self) -> std::result::Result<Option<RawRow>, DriverError> {
            self.inner.next_row()
        }

        fn close(&mut self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counting(
        items: Vec<std::result::Result<RawRow, DriverError>>,
    ) -> (RowCursor, Arc<AtomicUsize>) {
        let closes = Arc::new(AtomicUsize::new(0));
        let stream = CountingStream {
            inner: Box::new(IterRowStream::new(items.into_iter())),
            closes: closes.clone(),
        };
        (RowCursor::streaming(Box::new(stream), 2), closes)
    }

    #[test]
    fn test_buffered_walk() {
        let mut cursor = RowCursor::buffered(rows(), 2).unwrap();
        assert_eq!(cursor.state(), CursorState::NotStarted);
        assert!(matches!(cursor.current_row(), Err(Error::CursorNotPositioned)));

        assert!(cursor.advance().unwrap());
        assert_eq!(cursor.field_at(1).unwrap(), &RawField::from("a"));
        assert!(cursor.advance().unwrap());
        assert!(cursor.field_at(1).unwrap().is_null());
        assert!(!cursor.advance().unwrap());
        assert_eq!(cursor.state(), CursorState::Exhausted);
        assert!(!cursor.advance().unwrap());
        assert!(matches!(cursor.field_at(0), Err(Error::CursorNotPositioned)));
        assert_eq!(cursor.rows_seen(), 2);
    }

    #[test]
    fn test_buffered_reset_and_seek() {
        let mut cursor = RowCursor::buffered(rows(), 2).unwrap();
        while cursor.advance().unwrap() {}

        cursor.reset().unwrap();
        assert_eq!(cursor.state(), CursorState::NotStarted);
        assert!(cursor.advance().unwrap());
        assert_eq!(cursor.field_at(0).unwrap(), &RawField::from("1"));

        cursor.seek(1).unwrap();
        assert_eq!(cursor.field_at(0).unwrap(), &RawField::from("2"));
        assert!(!cursor.advance().unwrap());

        assert!(matches!(
            cursor.seek(2),
            Err(Error::RowOutOfRange { index: 2, count: 2 })
        ));
    }

    #[test]
    fn test_field_out_of_range() {
        let mut cursor = RowCursor::buffered(rows(), 2).unwrap();
        cursor.advance().unwrap();
        assert!(matches!(
            cursor.field_at(2),
            Err(Error::IndexOutOfRange { index: 2, count: 2 })
        ));
    }

    #[test]
    fn test_buffered_rejects_malformed_row() {
        let mut bad = rows();
        bad.push([Some("3")].into_iter().collect());
        assert!(matches!(
            RowCursor::buffered(bad, 2),
            Err(Error::MalformedRow {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_streaming_walk_closes_once() {
        let (mut cursor, closes) = counting(rows().into_iter().map(Ok).collect());
        assert_eq!(cursor.mode(), FetchMode::Streaming);
        assert!(cursor.buffered_rows().is_none());

        assert!(cursor.advance().unwrap());
        assert_eq!(cursor.rows_seen(), 1);
        assert!(cursor.advance().unwrap());
        assert!(!cursor.advance().unwrap());
        assert_eq!(closes.load(Ordering::SeqCst), 1);

        assert!(!cursor.advance().unwrap());
        drop(cursor);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_streaming_error_is_terminal() {
        let (mut cursor, closes) = counting(vec![
            Ok(rows()[0].clone()),
            Err("connection reset".into()),
            Ok(rows()[1].clone()),
        ]);

        assert!(cursor.advance().unwrap());
        assert!(matches!(cursor.advance(), Err(Error::Driver(_))));
        assert_eq!(cursor.state(), CursorState::Exhausted);
        assert!(!cursor.advance().unwrap());
        assert!(matches!(cursor.current_row(), Err(Error::CursorNotPositioned)));
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_streaming_malformed_row_is_terminal() {
        let (mut cursor, _) = counting(vec![Ok([Some("1")].into_iter().collect())]);
        assert!(matches!(cursor.advance(), Err(Error::MalformedRow { .. })));
        assert!(!cursor.advance().unwrap());
    }

    #[test]
    fn test_streaming_rejects_replay() {
        let (mut cursor, _) = counting(Vec::new());
        assert!(matches!(
            cursor.reset(),
            Err(Error::UnsupportedOperation { operation: "reset", .. })
        ));
        assert!(matches!(
            cursor.seek(0),
            Err(Error::UnsupportedOperation { operation: "seek", .. })
        ));
    }

    #[test]
    fn test_drop_closes_unfinished_stream() {
        let (mut cursor, closes) = counting(rows().into_iter().map(Ok).collect());
        assert!(cursor.advance().unwrap());
        drop(cursor);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }
}
