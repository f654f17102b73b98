//! Raw (undecoded) fields and rows handed up by the driver.

use bytes::Bytes;

/// One undecoded field: wire bytes, or the NULL marker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawField {
    bytes: Option<Bytes>,
}

impl RawField {
    /// A NULL field.
    pub fn null() -> Self {
        Self { bytes: None }
    }

    /// A non-NULL field with the given payload.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: Some(bytes.into()),
        }
    }

    /// Check if the field is NULL.
    pub fn is_null(&self) -> bool {
        self.bytes.is_none()
    }

    /// Get the payload, `None` if NULL.
    pub fn bytes(&self) -> Option<&Bytes> {
        self.bytes.as_ref()
    }
}

impl From<&str> for RawField {
    fn from(s: &str) -> Self {
        RawField::new(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<Option<&str>> for RawField {
    fn from(s: Option<&str>) -> Self {
        s.map(RawField::from).unwrap_or_default()
    }
}

/// One undecoded row, fields in column ordinal order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    fields: Vec<RawField>,
}

impl RawRow {
    /// Create a row from its fields.
    pub fn new(fields: Vec<RawField>) -> Self {
        Self { fields }
    }

    /// Get field by ordinal.
    pub fn get(&self, ordinal: usize) -> Option<&RawField> {
        self.fields.get(ordinal)
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get all fields.
    pub fn fields(&self) -> &[RawField] {
        &self.fields
    }
}

impl From<Vec<RawField>> for RawRow {
    fn from(fields: Vec<RawField>) -> Self {
        Self::new(fields)
    }
}

impl<F: Into<RawField>> FromIterator<F> for RawRow {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_field() {
        let field = RawField::null();
        assert!(field.is_null());
        assert_eq!(field.bytes(), None);
        assert_eq!(RawField::from(None::<&str>), field);
    }

    #[test]
    fn test_text_field() {
        let field = RawField::from("42");
        assert!(!field.is_null());
        assert_eq!(field.bytes().map(|b| &b[..]), Some(&b"42"[..]));
    }

    #[test]
    fn test_row_from_iter() {
        let row: RawRow = [Some("1"), None, Some("c")].into_iter().collect();
        assert_eq!(row.len(), 3);
        assert!(row.get(1).unwrap().is_null());
        assert_eq!(row.get(3), None);
    }
}
