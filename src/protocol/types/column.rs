//! Column and ColumnCatalog types for user-facing API.
//!
//! These types provide a clean interface for accessing column information
//! from a result, derived from the driver's `ColumnMetadata`.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::protocol::constants::{CHARSET_BINARY, NOT_NULL_FLAG, UNSIGNED_FLAG};

use super::column_type::ColumnType;
use super::metadata::ColumnMetadata;

/// A column in a result set (user-facing representation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Position of the column in every row.
    pub ordinal: usize,
    /// Column data type.
    pub column_type: ColumnType,
    /// Source table name, empty for computed columns.
    pub table: String,
    /// Character set number.
    pub charset: u16,
    /// Column flag bits.
    pub flags: u16,
    /// Maximum display length.
    pub length: u32,
    /// Number of decimals.
    pub decimals: u8,
}

impl Column {
    /// Create a column from metadata at the given ordinal.
    pub fn from_metadata(meta: &ColumnMetadata, ordinal: usize) -> Self {
        Self {
            name: meta.name.clone(),
            ordinal,
            column_type: ColumnType::from_raw(meta.type_code),
            table: meta.table.clone(),
            charset: meta.charset,
            flags: meta.flags,
            length: meta.length,
            decimals: meta.decimals,
        }
    }

    /// Whether string payloads are binary rather than text.
    pub fn is_binary(&self) -> bool {
        self.charset == CHARSET_BINARY
    }

    /// Whether the column is an unsigned integer.
    pub fn is_unsigned(&self) -> bool {
        self.flags & UNSIGNED_FLAG != 0
    }

    /// Whether NULL values are allowed.
    pub fn is_nullable(&self) -> bool {
        self.flags & NOT_NULL_FLAG == 0
    }
}

/// Ordered columns of one executed statement with name lookup.
///
/// Column names are not unique in SQL (`SELECT a.id, b.id ...`); a name
/// resolves to its first occurrence.
#[derive(Debug, Clone, Default)]
pub struct ColumnCatalog {
    columns: Vec<Column>,
    by_name: HashMap<String, usize>,
}

impl ColumnCatalog {
    /// Build a catalog from driver metadata.
    ///
    /// Returns `Error::MalformedMetadata` if `metadata` is empty; a
    /// row-producing statement always has at least one column.
    pub fn new(metadata: &[ColumnMetadata]) -> Result<Self> {
        if metadata.is_empty() {
            return Err(Error::malformed_metadata(
                "row-producing statement has no columns",
            ));
        }

        let columns: Vec<Column> = metadata
            .iter()
            .enumerate()
            .map(|(ordinal, meta)| Column::from_metadata(meta, ordinal))
            .collect();

        let mut by_name = HashMap::with_capacity(columns.len());
        for col in &columns {
            by_name.entry(col.name.clone()).or_insert(col.ordinal);
        }

        Ok(Self { columns, by_name })
    }

    /// Catalog of a statement that produced no result set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Find a column ordinal by name (case-sensitive, first match).
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownColumn {
                name: name.to_string(),
            })
    }

    /// Get the column name at an ordinal.
    pub fn name_at(&self, ordinal: usize) -> Result<&str> {
        self.column(ordinal).map(|c| c.name.as_str())
    }

    /// Get the column at an ordinal.
    pub fn column(&self, ordinal: usize) -> Result<&Column> {
        self.columns.get(ordinal).ok_or(Error::IndexOutOfRange {
            index: ordinal,
            count: self.columns.len(),
        })
    }

    /// Get column by ordinal.
    pub fn get(&self, ordinal: usize) -> Option<&Column> {
        self.columns.get(ordinal)
    }

    /// Get column names in ordinal order.
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate over columns in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }
}
