//! # rowfeed-xlsx
//!
//! Read-only XLSX (Office Open XML) reader for rowfeed.
//!
//! [`XlsxReader::open_file`] reads the worksheet list and shared strings into a
//! [`rowfeed_core::Workbook`]. Worksheet rows are parsed one sheet at a time with
//! [`XlsxDocument::load_sheet_data`], keeping every cell's type tag and raw
//! payload. No value conversion happens here.

pub mod error;
pub mod reader;

pub use error::{XlsxError, XlsxResult};
pub use reader::{XlsxDocument, XlsxReader};
