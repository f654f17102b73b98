//! Column metadata as delivered by the driver.
//!
//! This struct preserves the raw column definition fields.
//! For the resolved, user-facing view use `Column`.

use crate::protocol::constants::CHARSET_UTF8MB4_GENERAL_CI;

/// Raw column definition from the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMetadata {
    /// Column name (alias if one was given).
    pub name: String,
    /// Source table name, empty for computed columns.
    pub table: String,
    /// Raw `enum_field_types` code.
    pub type_code: u8,
    /// Character set number (63 = binary).
    pub charset: u16,
    /// Column flag bits.
    pub flags: u16,
    /// Maximum display length.
    pub length: u32,
    /// Number of decimals.
    pub decimals: u8,
}

impl ColumnMetadata {
    /// Create column metadata with minimal info.
    ///
    /// Defaults to the utf8mb4 character set and no flags.
    pub fn new(name: impl Into<String>, type_code: u8) -> Self {
        Self {
            name: name.into(),
            table: String::new(),
            type_code,
            charset: CHARSET_UTF8MB4_GENERAL_CI,
            flags: 0,
            length: 0,
            decimals: 0,
        }
    }

    /// Set the character set.
    pub fn with_charset(mut self, charset: u16) -> Self {
        self.charset = charset;
        self
    }

    /// Set the flag bits.
    pub fn with_flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    /// Set the source table name.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }
}
