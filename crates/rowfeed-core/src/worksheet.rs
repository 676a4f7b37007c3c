//! Worksheet, sheet data and row types

use crate::cell::Cell;

/// A row of cells in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    /// Row number from the `r` attribute (1-based), if present
    pub index: Option<u32>,
    /// Cells in document order
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create an empty row
    pub fn new(index: Option<u32>) -> Self {
        Self {
            index,
            cells: Vec::new(),
        }
    }

    /// Create a row from its cells
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self { index: None, cells }
    }

    /// First cell whose reference starts with `prefix`.
    ///
    /// This is a plain string-prefix match, so "A" also matches "AB7". Later
    /// cells with a matching reference are ignored.
    pub fn cell_starting_with(&self, prefix: &str) -> Option<&Cell> {
        self.cells.iter().find(|c| c.reference_starts_with(prefix))
    }
}

/// The `<sheetData>` of a worksheet: its rows in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetData {
    rows: Vec<Row>,
}

impl SheetData {
    /// Create empty sheet data
    pub fn new() -> Self {
        Self::default()
    }

    /// Create sheet data from rows
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Append a row
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Rows in document order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A worksheet entry of a workbook
///
/// Row data is loaded separately from the entry itself, so a workbook can list
/// its worksheets without parsing any of them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Worksheet {
    name: String,
    part_path: Option<String>,
    data: Option<SheetData>,
}

impl Worksheet {
    /// Create a worksheet with no row data
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            part_path: None,
            data: None,
        }
    }

    /// Create a worksheet holding `data`
    pub fn with_data(name: &str, data: SheetData) -> Self {
        Self {
            data: Some(data),
            ..Self::new(name)
        }
    }

    /// Set the package path of the worksheet part (e.g. `xl/worksheets/sheet1.xml`)
    pub fn with_part_path(mut self, path: Option<String>) -> Self {
        self.part_path = path;
        self
    }

    /// Replace the row data
    pub fn set_data(&mut self, data: Option<SheetData>) {
        self.data = data;
    }

    /// Sheet name as shown on the tab
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Package path of the worksheet part; `None` when the workbook has no
    /// relationship for this sheet
    pub fn part_path(&self) -> Option<&str> {
        self.part_path.as_deref()
    }

    /// Row data, or `None` when it was not loaded or the worksheet part or its
    /// `<sheetData>` is missing
    pub fn data(&self) -> Option<&SheetData> {
        self.data.as_ref()
    }
}
