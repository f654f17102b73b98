//! Result set construction options.

use std::fmt;

/// How a result set consumes rows from the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// All rows fetched upfront and held in memory. Supports replay.
    #[default]
    Buffered,
    /// Rows pulled one at a time. Single forward pass.
    Streaming,
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchMode::Buffered => write!(f, "buffered"),
            FetchMode::Streaming => write!(f, "streaming"),
        }
    }
}

/// Options applied when building a `ResultSet`.
#[derive(Debug, Clone, Default)]
pub struct ResultSetOptions {
    /// Fetch mode (default: buffered).
    pub mode: FetchMode,
    /// Upper bound on rows held by a buffered result (default: unbounded).
    pub max_buffered_rows: Option<usize>,
}

impl ResultSetOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a buffered, replayable result.
    pub fn buffered() -> Self {
        Self::new().with_mode(FetchMode::Buffered)
    }

    /// Options for a forward-only streaming result.
    pub fn streaming() -> Self {
        Self::new().with_mode(FetchMode::Streaming)
    }

    /// Set the fetch mode.
    pub fn with_mode(mut self, mode: FetchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Limit how many rows a buffered result may hold.
    ///
    /// Construction fails with `Error::BufferLimitExceeded` when the driver
    /// yields more rows than this. Ignored in streaming mode.
    ///
    /// # Example
    ///
    /// ```
    /// use mariadb_resultset::ResultSetOptions;
    ///
    /// let options = ResultSetOptions::buffered().with_max_buffered_rows(10_000);
    /// assert_eq!(options.max_buffered_rows, Some(10_000));
    /// ```
    pub fn with_max_buffered_rows(mut self, limit: usize) -> Self {
        self.max_buffered_rows = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_buffered_unbounded() {
        let options = ResultSetOptions::default();
        assert_eq!(options.mode, FetchMode::Buffered);
        assert_eq!(options.max_buffered_rows, None);
    }

    #[test]
    fn test_builder() {
        let options = ResultSetOptions::streaming().with_max_buffered_rows(5);
        assert_eq!(options.mode, FetchMode::Streaming);
        assert_eq!(options.max_buffered_rows, Some(5));
    }
}
