//! Prelude module - common imports for hosts embedding rowfeed
//!
//! ```rust
//! use rowfeed::prelude::*;
//! ```

pub use crate::{
    // Source
    ExcelSource,
    ExtractSummary,
    // Configuration
    HostVariables,
    OutputColumn,
    SourceConfig,
    EXCEL_FILE_PATH,
    EXCEL_SHEET_NAME,
    // Collaborators
    CollectingReporter,
    ErrorReporter,
    LogReporter,
    OutputBuffer,
    RecordBuffer,
    ReportPolicy,
    Severity,
    // Error types
    SourceError,
    SourceResult,
};
