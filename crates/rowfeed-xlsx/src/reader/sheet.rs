//! Worksheet parts (`xl/worksheets/sheetN.xml`)

use std::io::{BufReader, Read, Seek};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use zip::result::ZipError;

use crate::error::{XlsxError, XlsxResult};
use rowfeed_core::{Cell, CellType, Row, SheetData};

/// A `<c>` element being read
struct CellBuilder {
    cell: Cell,
    /// Element depth below `<c>` (0 = direct children)
    depth: usize,
    in_value: bool,
    in_first_text: bool,
}

impl CellBuilder {
    fn from_start(e: &BytesStart) -> Self {
        Self {
            cell: parse_cell_attrs(e),
            depth: 0,
            in_value: false,
            in_first_text: false,
        }
    }

    fn start_child(&mut self, e: &BytesStart) {
        match e.local_name().as_ref() {
            b"v" if self.depth == 0 => {
                self.cell.value = Some(String::new());
                self.in_value = true;
            }
            b"is" if self.depth == 0 => {
                self.cell.has_inline_string = true;
            }
            b"t" if self.cell.inline_text.is_none() => {
                self.cell.inline_text = Some(String::new());
                self.in_first_text = true;
            }
            _ => {}
        }
        self.depth += 1;
    }

    fn end_child(&mut self, local_name: &[u8]) {
        self.depth = self.depth.saturating_sub(1);
        match local_name {
            b"v" if self.depth == 0 => self.in_value = false,
            b"t" => self.in_first_text = false,
            _ => {}
        }
    }

    fn empty_child(&mut self, e: &BytesStart) {
        match e.local_name().as_ref() {
            b"v" if self.depth == 0 => {
                self.cell.value.get_or_insert_with(String::new);
            }
            b"is" if self.depth == 0 => {
                self.cell.has_inline_string = true;
            }
            b"t" => {
                self.cell.inline_text.get_or_insert_with(String::new);
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        self.cell.inner_text.push_str(text);
        if self.in_value {
            if let Some(value) = self.cell.value.as_mut() {
                value.push_str(text);
            }
        }
        if self.in_first_text {
            if let Some(inline) = self.cell.inline_text.as_mut() {
                inline.push_str(text);
            }
        }
    }
}

/// Read the rows of the worksheet part at `path`.
///
/// Returns `Ok(None)` when the part is missing from the package or has no
/// `<sheetData>` element. Cell payloads are kept as raw text.
pub(super) fn read_sheet_data<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    path: &str,
) -> XlsxResult<Option<SheetData>> {
    let file = match archive.by_name(path) {
        Ok(f) => f,
        Err(ZipError::FileNotFound) => {
            log::warn!("Worksheet part '{}' is missing from the package", path);
            return Ok(None);
        }
        Err(e) => return Err(XlsxError::Zip(e)),
    };

    let mut xml_reader = Reader::from_reader(BufReader::new(file));
    xml_reader.trim_text(false);

    let mut buf = Vec::new();

    let mut sheet_data: Option<SheetData> = None;
    let mut in_sheet_data = false;
    let mut current_row: Option<Row> = None;
    let mut current_cell: Option<CellBuilder> = None;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if let Some(cell) = current_cell.as_mut() {
                    cell.start_child(&e);
                } else {
                    match e.local_name().as_ref() {
                        b"sheetData" => {
                            sheet_data = Some(SheetData::new());
                            in_sheet_data = true;
                        }
                        b"row" if in_sheet_data => {
                            current_row = Some(Row::new(parse_row_index(&e)));
                        }
                        b"c" if current_row.is_some() => {
                            current_cell = Some(CellBuilder::from_start(&e));
                        }
                        _ => {}
                    }
                }
            }
            Event::Empty(e) => {
                if let Some(cell) = current_cell.as_mut() {
                    cell.empty_child(&e);
                } else {
                    match e.local_name().as_ref() {
                        b"sheetData" => {
                            sheet_data = Some(SheetData::new());
                        }
                        b"row" if in_sheet_data => {
                            if let Some(data) = sheet_data.as_mut() {
                                data.push_row(Row::new(parse_row_index(&e)));
                            }
                        }
                        b"c" => {
                            if let Some(row) = current_row.as_mut() {
                                row.cells.push(parse_cell_attrs(&e));
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::End(e) => {
                let name = e.local_name();
                let local = name.as_ref();
                let closes_cell = current_cell
                    .as_ref()
                    .map_or(false, |cell| cell.depth == 0 && local == b"c");

                if closes_cell {
                    if let (Some(cell), Some(row)) = (current_cell.take(), current_row.as_mut()) {
                        row.cells.push(cell.cell);
                    }
                } else if let Some(cell) = current_cell.as_mut() {
                    cell.end_child(local);
                } else {
                    match local {
                        b"row" => {
                            if let (Some(row), Some(data)) = (current_row.take(), sheet_data.as_mut())
                            {
                                data.push_row(row);
                            }
                        }
                        b"sheetData" => {
                            in_sheet_data = false;
                        }
                        _ => {}
                    }
                }
            }
            Event::Text(e) => {
                if let Some(cell) = current_cell.as_mut() {
                    if let Ok(text) = e.unescape() {
                        cell.text(&text);
                    }
                }
            }
            Event::CData(e) => {
                if let Some(cell) = current_cell.as_mut() {
                    cell.text(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if sheet_data.is_none() {
        log::warn!("Worksheet part '{}' has no sheetData element", path);
    }

    Ok(sheet_data)
}

fn parse_row_index(e: &BytesStart) -> Option<u32> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"r")
        .and_then(|attr| attr.unescape_value().ok().and_then(|s| s.parse::<u32>().ok()))
}

fn parse_cell_attrs(e: &BytesStart) -> Cell {
    let mut cell = Cell::default();

    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"r" => {
                cell.reference = attr.unescape_value().ok().map(|s| s.to_string());
            }
            b"t" => {
                cell.data_type = attr
                    .unescape_value()
                    .ok()
                    .map(|s| CellType::from_xlsx(&s));
            }
            _ => {}
        }
    }

    cell
}
