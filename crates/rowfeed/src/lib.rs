//! # rowfeed
//!
//! A pipeline source component that reads the rows of one worksheet from an
//! XLSX file and feeds their cell values, column by column, into an output
//! buffer.
//!
//! The component is a single linear pass:
//! - the worksheet is picked by name, falling back to the first worksheet
//! - the first row is treated as a header and skipped
//! - every following row becomes one output record, with one string field per
//!   configured column
//!
//! Cell values are passed through as stored. Shared strings are looked up,
//! inline strings unwrapped, and everything else (numbers, booleans, date
//! serials, error codes) is handed over as raw text.
//!
//! Failures never escape as panics. They are reported once through the host's
//! [`ErrorReporter`] and returned as a [`SourceError`] value.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rowfeed::prelude::*;
//!
//! let mut vars = HostVariables::new();
//! vars.set(EXCEL_FILE_PATH, "people.xlsx");
//! vars.set(EXCEL_SHEET_NAME, "People");
//!
//! let source = ExcelSource::new(SourceConfig::from_variables(&vars));
//! let mut buffer = RecordBuffer::for_columns(&source.config().columns);
//! let mut reporter = LogReporter::new(ReportPolicy::Continue);
//!
//! if let Ok(summary) = source.extract(&mut buffer, &mut reporter) {
//!     println!("{} rows from '{}'", summary.rows_emitted, summary.sheet_name);
//! }
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod prelude;
pub mod report;
pub mod resolve;
pub mod source;

pub use buffer::{OutputBuffer, OutputRecord, RecordBuffer};
pub use config::{
    HostVariables, OutputColumn, SourceConfig, DEFAULT_SOURCE_LABEL, EXCEL_FILE_PATH,
    EXCEL_SHEET_NAME,
};
pub use error::{ErrorKind, SourceError, SourceResult};
pub use report::{CollectingReporter, ErrorReporter, LogReporter, Report, ReportPolicy, Severity};
pub use resolve::resolve_cell_value;
pub use source::{ExcelSource, ExtractSummary};

// Re-export the document model so hosts can build workbooks in memory
pub use rowfeed_core::{Cell, CellType, Row, SharedStringItem, SharedStringTable, SheetData, Workbook, Worksheet};
pub use rowfeed_xlsx::{XlsxDocument, XlsxError, XlsxReader};
