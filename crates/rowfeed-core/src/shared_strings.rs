//! Shared string table

/// One `<si>` entry of the shared string table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SharedStringItem {
    /// Text of the direct `<t>` child, if the entry is plain text
    pub text: Option<String>,
    /// Raw markup of the entry's children (rich-text runs, phonetic hints, ...)
    pub inner_xml: String,
}

impl SharedStringItem {
    /// A plain-text entry
    pub fn plain(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inner_xml: format!("<t>{}</t>", text),
        }
    }

    /// A rich-text entry with no direct `<t>` child
    pub fn rich(inner_xml: &str) -> Self {
        Self {
            text: None,
            inner_xml: inner_xml.to_string(),
        }
    }
}

/// Workbook-level list of deduplicated strings, addressed by index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SharedStringTable {
    items: Vec<SharedStringItem>,
}

impl SharedStringTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from its entries
    pub fn from_items(items: Vec<SharedStringItem>) -> Self {
        Self { items }
    }

    /// Append an entry
    pub fn push(&mut self, item: SharedStringItem) {
        self.items.push(item);
    }

    /// Entry at `index`
    pub fn get(&self, index: usize) -> Option<&SharedStringItem> {
        self.items.get(index)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
