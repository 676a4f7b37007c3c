//! Cell value resolution

use rowfeed_core::{Cell, CellType, Workbook};

/// Resolve the text a cell carries.
///
/// - shared-string cells look their index up in the workbook's table, using
///   the entry's plain text or, for rich entries, its raw markup
/// - inline-string cells use their first `<t>` text, else all of their text
/// - every other cell passes its stored `<v>` text through unchanged
///
/// Returns `None` for an absent cell, a cell with no payload, or a
/// shared-string index that cannot be resolved.
pub fn resolve_cell_value<'a>(workbook: &'a Workbook, cell: Option<&'a Cell>) -> Option<&'a str> {
    let cell = cell?;
    if !cell.has_payload() {
        return None;
    }

    match cell.data_type {
        Some(CellType::SharedString) => resolve_shared_string(workbook, cell),
        Some(CellType::InlineString) => Some(
            cell.inline_text
                .as_deref()
                .unwrap_or(cell.inner_text.as_str()),
        ),
        _ => cell.value.as_deref(),
    }
}

fn resolve_shared_string<'a>(workbook: &'a Workbook, cell: &'a Cell) -> Option<&'a str> {
    let raw = cell.value.as_deref()?;
    let Ok(index) = raw.trim().parse::<usize>() else {
        log::debug!(
            "Cell {:?}: shared string index '{}' is not a number",
            cell.reference,
            raw
        );
        return None;
    };

    let Some(item) = workbook.shared_strings().and_then(|t| t.get(index)) else {
        log::debug!(
            "Cell {:?}: shared string index {} is out of range",
            cell.reference,
            index
        );
        return None;
    };

    Some(item.text.as_deref().unwrap_or(item.inner_xml.as_str()))
}
