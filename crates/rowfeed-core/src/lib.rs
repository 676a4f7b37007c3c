//! # rowfeed-core
//!
//! Read-only document model for the rowfeed spreadsheet source.
//!
//! This crate provides the types a parsed workbook is made of:
//! - [`Workbook`] - worksheets plus the optional [`SharedStringTable`]
//! - [`Worksheet`], [`SheetData`], [`Row`] - the sheet/row graph in document order
//! - [`Cell`] and [`CellType`] - a cell's reference, type tag and raw payload
//! - [`letters_to_column`] - column letter validation
//!
//! Values are kept exactly as stored in the file. Nothing here converts numbers,
//! dates or booleans; that is left to whoever consumes the raw text.
//!
//! ## Example
//!
//! ```rust
//! use rowfeed_core::{Cell, Row, SheetData, Workbook, Worksheet};
//!
//! let mut workbook = Workbook::new();
//! workbook.add_sheet(Worksheet::with_data(
//!     "People",
//!     SheetData::from_rows(vec![
//!         Row::from_cells(vec![Cell::number("A1", "42")]),
//!     ]),
//! ));
//!
//! let index = workbook.sheet_index("People").unwrap();
//! let sheet = workbook.sheet(index).unwrap();
//! assert_eq!(sheet.data().unwrap().row_count(), 1);
//! ```

pub mod address;
pub mod cell;
pub mod error;
pub mod shared_strings;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use address::letters_to_column;
pub use cell::{Cell, CellType};
pub use error::{Error, Result};
pub use shared_strings::{SharedStringItem, SharedStringTable};
pub use workbook::Workbook;
pub use worksheet::{Row, SheetData, Worksheet};

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;
