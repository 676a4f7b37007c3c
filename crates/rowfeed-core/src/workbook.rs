//! Workbook type - the parsed document

use crate::shared_strings::SharedStringTable;
use crate::worksheet::Worksheet;

/// A parsed workbook
///
/// Holds the worksheets in document order and the shared string table, if the
/// file has one. A workbook may have no worksheets at all.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    /// Worksheets in document order
    sheets: Vec<Worksheet>,
    /// Shared string table (absent when the file has none)
    shared_strings: Option<SharedStringTable>,
}

impl Workbook {
    /// Create an empty workbook with no worksheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Worksheets in document order
    pub fn sheets(&self) -> &[Worksheet] {
        &self.sheets
    }

    /// Get a worksheet by index
    pub fn sheet(&self, index: usize) -> Option<&Worksheet> {
        self.sheets.get(index)
    }

    /// Get a mutable worksheet by index
    pub fn sheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.sheets.get_mut(index)
    }

    /// Index of the first worksheet whose name equals `name` exactly
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|s| s.name() == name)
    }

    /// Shared string table, if present
    pub fn shared_strings(&self) -> Option<&SharedStringTable> {
        self.shared_strings.as_ref()
    }

    /// Append a worksheet
    pub fn add_sheet(&mut self, sheet: Worksheet) -> usize {
        self.sheets.push(sheet);
        self.sheets.len() - 1
    }

    /// Set the shared string table
    pub fn set_shared_strings(&mut self, table: SharedStringTable) {
        self.shared_strings = Some(table);
    }
}
