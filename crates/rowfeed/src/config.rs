//! Source configuration
//!
//! The host resolves its own variables and hands them over explicitly; the
//! component never reads ambient state.

use std::collections::HashMap;
use std::path::Path;

use rowfeed_core::letters_to_column;
use serde::{Deserialize, Serialize};

use crate::error::{SourceError, SourceResult};

/// Host variable holding the workbook path
pub const EXCEL_FILE_PATH: &str = "ExcelFilePath";

/// Host variable holding the worksheet name
pub const EXCEL_SHEET_NAME: &str = "ExcelSheetName";

/// Source label used when reporting, unless configured otherwise
pub const DEFAULT_SOURCE_LABEL: &str = "Excel Row Source";

/// Variables supplied by the host pipeline, by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostVariables(HashMap<String, String>);

impl HostVariables {
    /// Create an empty variable set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of string values
    pub fn from_json_str(json: &str) -> SourceResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SourceError::configuration(format!("Invalid host variables: {}", e)))
    }

    /// Set a variable, replacing any previous value
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        self.0.insert(name.into(), value.into());
    }

    /// Get a variable's value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Merge `other` into this set; values from `other` win
    pub fn extend(&mut self, other: HostVariables) {
        self.0.extend(other.0);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HostVariables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One output field and the worksheet column it is read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputColumn {
    /// Column letter(s) matched as a prefix of cell references
    pub letter: String,
    /// Output field name
    pub field: String,
}

impl OutputColumn {
    /// Create a column with an explicit field name.
    ///
    /// `letter` must be column letters (case-insensitive); it is stored uppercase.
    pub fn new(letter: &str, field: &str) -> SourceResult<Self> {
        letters_to_column(letter).map_err(|e| {
            SourceError::configuration(format!("Invalid output column '{}': {}", letter, e))
        })?;

        Ok(Self {
            letter: letter.to_ascii_uppercase(),
            field: field.to_string(),
        })
    }

    /// Create a column whose field is named `Column<LETTER>`
    pub fn from_letter(letter: &str) -> SourceResult<Self> {
        let field = format!("Column{}", letter.to_ascii_uppercase());
        Self::new(letter, &field)
    }
}

/// Configuration of one extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to the workbook (required)
    #[serde(rename = "ExcelFilePath", default)]
    pub excel_file_path: String,
    /// Worksheet to read; empty or unknown names fall back to the first worksheet
    #[serde(rename = "ExcelSheetName", default)]
    pub excel_sheet_name: String,
    /// Output columns, in output order
    #[serde(default = "default_columns")]
    pub columns: Vec<OutputColumn>,
    /// Label reported as the source of errors
    #[serde(default = "default_source_label")]
    pub source_label: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            excel_file_path: String::new(),
            excel_sheet_name: String::new(),
            columns: default_columns(),
            source_label: default_source_label(),
        }
    }
}

fn default_columns() -> Vec<OutputColumn> {
    ["A", "B", "C"]
        .iter()
        .map(|letter| OutputColumn {
            letter: letter.to_string(),
            field: format!("Column{}", letter),
        })
        .collect()
}

fn default_source_label() -> String {
    DEFAULT_SOURCE_LABEL.to_string()
}

impl SourceConfig {
    /// Create a configuration for `path`, reading columns A, B and C
    pub fn new<P: Into<String>>(path: P) -> Self {
        Self {
            excel_file_path: path.into(),
            ..Self::default()
        }
    }

    /// Build a configuration from host variables.
    ///
    /// Missing variables become empty strings; a missing file path is reported
    /// when extraction runs.
    pub fn from_variables(vars: &HostVariables) -> Self {
        Self {
            excel_file_path: vars.get(EXCEL_FILE_PATH).unwrap_or_default().to_string(),
            excel_sheet_name: vars.get(EXCEL_SHEET_NAME).unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    /// Set the worksheet name
    pub fn with_sheet_name<S: Into<String>>(mut self, name: S) -> Self {
        self.excel_sheet_name = name.into();
        self
    }

    /// Replace the output columns with `Column<LETTER>` fields for `letters`
    pub fn with_columns<S: AsRef<str>>(mut self, letters: &[S]) -> SourceResult<Self> {
        self.columns = letters
            .iter()
            .map(|l| OutputColumn::from_letter(l.as_ref().trim()))
            .collect::<SourceResult<Vec<_>>>()?;
        Ok(self)
    }

    /// Set the label used when reporting
    pub fn with_source_label<S: Into<String>>(mut self, label: S) -> Self {
        self.source_label = label.into();
        self
    }

    /// Output field names, in output order
    pub fn field_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.field.clone()).collect()
    }

    /// Check the configuration before any I/O and return the workbook path
    pub fn validate(&self) -> SourceResult<&Path> {
        let path = Path::new(&self.excel_file_path);
        if self.excel_file_path.is_empty() || !path.is_file() {
            return Err(SourceError::configuration(format!(
                "Excel file path is invalid or file not found: {}",
                self.excel_file_path
            )));
        }

        if self.columns.is_empty() {
            return Err(SourceError::configuration("No output columns configured"));
        }

        Ok(path)
    }
}
