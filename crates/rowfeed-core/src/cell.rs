//! Cell types
//!
//! A [`Cell`] keeps what the worksheet XML stored for one `<c>` element: its
//! reference, its `t` type tag and the raw text of its children.

/// Data-type tag of a cell (the `t` attribute in SpreadsheetML)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellType {
    /// `s` - payload is an index into the shared string table
    SharedString,
    /// `inlineStr` - text stored under an `<is>` element
    InlineString,
    /// `n` - number
    Number,
    /// `b` - boolean stored as "0"/"1"
    Boolean,
    /// `d` - ISO 8601 date
    Date,
    /// `e` - error code such as `#DIV/0!`
    Error,
    /// `str` - string result of a formula
    FormulaString,
    /// Any tag this reader does not know
    Other(String),
}

impl CellType {
    /// Parse a `t` attribute value
    pub fn from_xlsx(tag: &str) -> Self {
        match tag {
            "s" => CellType::SharedString,
            "inlineStr" => CellType::InlineString,
            "n" => CellType::Number,
            "b" => CellType::Boolean,
            "d" => CellType::Date,
            "e" => CellType::Error,
            "str" => CellType::FormulaString,
            other => CellType::Other(other.to_string()),
        }
    }
}

/// A single worksheet cell, as stored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Reference such as "A7" (the `r` attribute; optional in the file format)
    pub reference: Option<String>,
    /// Type tag; `None` means general/number
    pub data_type: Option<CellType>,
    /// Raw text of the `<v>` element, if present
    pub value: Option<String>,
    /// Whether the cell has an `<is>` (inline string) element
    pub has_inline_string: bool,
    /// Text of the first `<t>` element anywhere under the cell
    pub inline_text: Option<String>,
    /// Concatenated text of every descendant node
    pub inner_text: String,
}

impl Cell {
    /// Create a cell with a reference, type tag and raw `<v>` payload
    pub fn new(reference: &str, data_type: Option<CellType>, value: &str) -> Self {
        Self {
            reference: Some(reference.to_string()),
            data_type,
            value: Some(value.to_string()),
            has_inline_string: false,
            inline_text: None,
            inner_text: value.to_string(),
        }
    }

    /// A general (untyped) cell
    pub fn number(reference: &str, value: &str) -> Self {
        Self::new(reference, None, value)
    }

    /// A shared-string cell pointing at `index`
    pub fn shared_string(reference: &str, index: &str) -> Self {
        Self::new(reference, Some(CellType::SharedString), index)
    }

    /// A boolean cell storing "0" or "1"
    pub fn boolean(reference: &str, value: &str) -> Self {
        Self::new(reference, Some(CellType::Boolean), value)
    }

    /// An inline-string cell holding a single `<t>` node
    pub fn inline_string(reference: &str, text: &str) -> Self {
        Self {
            reference: Some(reference.to_string()),
            data_type: Some(CellType::InlineString),
            value: None,
            has_inline_string: true,
            inline_text: Some(text.to_string()),
            inner_text: text.to_string(),
        }
    }

    /// Whether the cell stores anything (`<v>` or `<is>`)
    pub fn has_payload(&self) -> bool {
        self.value.is_some() || self.has_inline_string
    }

    /// Whether the reference starts with `prefix`. Cells without a reference never match.
    pub fn reference_starts_with(&self, prefix: &str) -> bool {
        self.reference
            .as_deref()
            .map_or(false, |r| r.starts_with(prefix))
    }
}
