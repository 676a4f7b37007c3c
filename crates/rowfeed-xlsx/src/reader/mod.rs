//! XLSX reader

mod shared_strings;
mod sheet;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use rowfeed_core::{SheetData, Workbook, Worksheet};

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const DEFAULT_SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// A `<sheet>` entry of workbook.xml
#[derive(Debug, Clone, PartialEq, Eq)]
struct SheetEntry {
    name: String,
    r_id: Option<String>,
}

/// Relationships of workbook.xml that the reader cares about
#[derive(Debug, Default)]
struct WorkbookRels {
    /// Relationship id -> worksheet part path
    worksheets: HashMap<String, String>,
    /// Shared strings part path, if declared
    shared_strings: Option<String>,
}

/// An open XLSX package
///
/// Holds the archive, and with it the file handle, next to the workbook's
/// worksheet list and shared strings. Worksheet rows are parsed on demand with
/// [`load_sheet_data`](Self::load_sheet_data), so a malformed sheet only fails
/// when it is loaded. Dropping the document closes the file.
pub struct XlsxDocument<R> {
    archive: zip::ZipArchive<R>,
    workbook: Workbook,
}

impl<R: Read + Seek> XlsxDocument<R> {
    /// The workbook read so far
    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    /// Parse the rows of the worksheet at `index` and store them on the workbook.
    ///
    /// Returns `None` when there is no such worksheet, or when its relationship,
    /// part or `<sheetData>` element is missing.
    pub fn load_sheet_data(&mut self, index: usize) -> XlsxResult<Option<&SheetData>> {
        let data = match self.workbook.sheet(index).and_then(|s| s.part_path()) {
            Some(path) => sheet::read_sheet_data(&mut self.archive, path)?,
            None => None,
        };

        match self.workbook.sheet_mut(index) {
            Some(sheet) => {
                if let Some(data) = &data {
                    log::debug!("Sheet '{}': {} rows", sheet.name(), data.row_count());
                }
                sheet.set_data(data);
                Ok(sheet.data())
            }
            None => Ok(None),
        }
    }
}

/// XLSX file reader
///
/// Opens the package read-only and reads the workbook part, its relationships
/// and the shared string table up front.
pub struct XlsxReader;

impl XlsxReader {
    /// Open a workbook from a file path
    pub fn open_file<P: AsRef<Path>>(path: P) -> XlsxResult<XlsxDocument<BufReader<File>>> {
        let file = File::open(path)?;
        Self::open(BufReader::new(file))
    }

    /// Open a workbook from a reader
    pub fn open<R: Read + Seek>(reader: R) -> XlsxResult<XlsxDocument<R>> {
        let mut archive = Self::open_archive(reader)?;

        let sheets = Self::read_workbook_xml(&mut archive)?;
        let rels = Self::read_workbook_rels(&mut archive)?;

        let mut workbook = Workbook::new();

        let shared_strings_part = rels
            .shared_strings
            .as_deref()
            .unwrap_or(DEFAULT_SHARED_STRINGS_PART);
        if let Some(table) = shared_strings::read_shared_strings(&mut archive, shared_strings_part)? {
            log::debug!("Read {} shared strings", table.len());
            workbook.set_shared_strings(table);
        }

        for entry in sheets {
            let path = entry
                .r_id
                .as_ref()
                .and_then(|r_id| rels.worksheets.get(r_id))
                .cloned();

            if path.is_none() {
                log::warn!(
                    "Sheet '{}' has no worksheet relationship ({:?})",
                    entry.name,
                    entry.r_id
                );
            }

            workbook.add_sheet(Worksheet::new(&entry.name).with_part_path(path));
        }

        Ok(XlsxDocument { archive, workbook })
    }

    /// List worksheet names in document order without reading any sheet data
    pub fn sheet_names<P: AsRef<Path>>(path: P) -> XlsxResult<Vec<String>> {
        let file = File::open(path)?;
        let mut archive = Self::open_archive(BufReader::new(file))?;
        let sheets = Self::read_workbook_xml(&mut archive)?;
        Ok(sheets.into_iter().map(|s| s.name).collect())
    }

    fn open_archive<R: Read + Seek>(reader: R) -> XlsxResult<zip::ZipArchive<R>> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an OOXML package
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        Ok(archive)
    }

    /// Read workbook.xml to get sheet names and rIds
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<SheetEntry>> {
        let file = archive
            .by_name(WORKBOOK_PART)
            .map_err(|_| XlsxError::MissingPart(WORKBOOK_PART.into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.local_name().as_ref() == b"sheet" => {
                    if let Some(entry) = Self::parse_sheet_entry(&e) {
                        sheets.push(entry);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    fn parse_sheet_entry(e: &BytesStart) -> Option<SheetEntry> {
        let mut name = None;
        let mut r_id = None;

        for attr in e.attributes().flatten() {
            let key = attr.key;
            match key.local_name().as_ref() {
                b"name" if key.prefix().is_none() => {
                    name = attr.unescape_value().ok().map(|s| s.to_string());
                }
                // r:id (the relationships namespace prefix varies)
                b"id" if key.prefix().is_some() => {
                    r_id = attr.unescape_value().ok().map(|s| s.to_string());
                }
                _ => {}
            }
        }

        name.map(|name| SheetEntry { name, r_id })
    }

    /// Read workbook.xml.rels to get worksheet and shared string part paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<WorkbookRels> {
        let file = archive
            .by_name(WORKBOOK_RELS_PART)
            .map_err(|_| XlsxError::MissingPart(WORKBOOK_RELS_PART.into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = WorkbookRels::default();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut id = None;
                    let mut target = None;
                    let mut rel_type = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => {
                                id = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Target" => {
                                target = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Type" => {
                                rel_type = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            _ => {}
                        }
                    }

                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            rels.worksheets.insert(id, resolve_target(&target));
                        } else if rel_type.ends_with("/sharedStrings") {
                            rels.shared_strings = Some(resolve_target(&target));
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }
}

/// Resolve a relationship target of workbook.xml to a package path.
///
/// Targets are relative to `xl/` unless they start with `/`.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target),
    }
}
