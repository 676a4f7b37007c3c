//! Output buffer: the row-oriented sink the pipeline reads downstream

use crate::config::OutputColumn;

/// A sink of fixed-schema string records
///
/// The extraction driver calls [`add_row`](OutputBuffer::add_row) once per data
/// row and then assigns every configured field of that row.
pub trait OutputBuffer {
    /// Whether the schema has a field named `field`
    fn has_field(&self, field: &str) -> bool;

    /// Append a new record; all fields start out empty
    fn add_row(&mut self);

    /// Assign a field of the most recently added record
    fn set_field(&mut self, field: &str, value: String);
}

/// One output record: a value per schema field, never absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    values: Vec<String>,
}

impl OutputRecord {
    fn empty(width: usize) -> Self {
        Self {
            values: vec![String::new(); width],
        }
    }

    /// Field values in schema order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Value at schema position `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }
}

/// In-memory [`OutputBuffer`]
#[derive(Debug, Clone, Default)]
pub struct RecordBuffer {
    schema: Vec<String>,
    records: Vec<OutputRecord>,
}

impl RecordBuffer {
    /// Create a buffer with the given field names
    pub fn new<S: Into<String>>(schema: impl IntoIterator<Item = S>) -> Self {
        Self {
            schema: schema.into_iter().map(Into::into).collect(),
            records: Vec::new(),
        }
    }

    /// Create a buffer whose schema is the columns' field names
    pub fn for_columns(columns: &[OutputColumn]) -> Self {
        Self::new(columns.iter().map(|c| c.field.clone()))
    }

    /// Field names in schema order
    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    /// Records in insertion order
    pub fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    /// Consume the buffer, returning its records
    pub fn into_records(self) -> Vec<OutputRecord> {
        self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records were added
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Value of `field` in record `row`
    pub fn value(&self, row: usize, field: &str) -> Option<&str> {
        let index = self.field_index(field)?;
        self.records.get(row)?.get(index)
    }

    fn field_index(&self, field: &str) -> Option<usize> {
        self.schema.iter().position(|f| f == field)
    }
}

impl OutputBuffer for RecordBuffer {
    fn has_field(&self, field: &str) -> bool {
        self.field_index(field).is_some()
    }

    fn add_row(&mut self) {
        self.records.push(OutputRecord::empty(self.schema.len()));
    }

    fn set_field(&mut self, field: &str, value: String) {
        // Unknown fields and assignments before the first add_row are ignored
        if let Some(index) = self.field_index(field) {
            if let Some(record) = self.records.last_mut() {
                record.values[index] = value;
            }
        }
    }
}
