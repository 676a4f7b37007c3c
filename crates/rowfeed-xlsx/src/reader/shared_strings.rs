//! Shared string table part (`xl/sharedStrings.xml`)

use std::io::{BufReader, Read, Seek};

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;
use zip::result::ZipError;

use crate::error::{XlsxError, XlsxResult};
use rowfeed_core::{SharedStringItem, SharedStringTable};

/// One `<si>` being read: its direct `<t>` text and the markup of its children
struct ItemBuilder {
    text: Option<String>,
    in_direct_text: bool,
    /// Element depth below `<si>` (0 = direct children)
    depth: usize,
    markup: Writer<Vec<u8>>,
}

impl ItemBuilder {
    fn new() -> Self {
        Self {
            text: None,
            in_direct_text: false,
            depth: 0,
            markup: Writer::new(Vec::new()),
        }
    }

    fn finish(self) -> XlsxResult<SharedStringItem> {
        let inner_xml = String::from_utf8(self.markup.into_inner())
            .map_err(|e| XlsxError::Parse(format!("Shared string is not valid UTF-8: {}", e)))?;
        Ok(SharedStringItem {
            text: self.text,
            inner_xml,
        })
    }
}

/// Read the shared string table at `path`.
///
/// Returns `Ok(None)` when the package has no such part. Text whitespace is
/// preserved as stored.
pub(super) fn read_shared_strings<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    path: &str,
) -> XlsxResult<Option<SharedStringTable>> {
    let file = match archive.by_name(path) {
        Ok(f) => f,
        Err(ZipError::FileNotFound) => return Ok(None), // No shared strings is valid
        Err(e) => return Err(XlsxError::Zip(e)),
    };

    let mut xml_reader = Reader::from_reader(BufReader::new(file));
    xml_reader.trim_text(false);

    let mut buf = Vec::new();
    let mut table = SharedStringTable::new();
    let mut current: Option<ItemBuilder> = None;

    loop {
        let event = xml_reader.read_event_into(&mut buf)?;

        let closes_item = matches!(&event, Event::End(e) if e.local_name().as_ref() == b"si")
            && current.as_ref().map_or(false, |item| item.depth == 0);
        if closes_item {
            if let Some(item) = current.take() {
                table.push(item.finish()?);
            }
            buf.clear();
            continue;
        }

        match (&event, current.as_mut()) {
            (Event::Eof, _) => break,

            (Event::Start(e), None) if e.local_name().as_ref() == b"si" => {
                current = Some(ItemBuilder::new());
            }
            (Event::Empty(e), None) if e.local_name().as_ref() == b"si" => {
                table.push(SharedStringItem::default());
            }

            (Event::Start(e), Some(item)) => {
                if item.depth == 0 && e.local_name().as_ref() == b"t" && item.text.is_none() {
                    item.text = Some(String::new());
                    item.in_direct_text = true;
                }
                item.depth += 1;
                item.markup.write_event(&event)?;
            }
            (Event::End(e), Some(item)) => {
                item.depth = item.depth.saturating_sub(1);
                if item.depth == 0 && e.local_name().as_ref() == b"t" {
                    item.in_direct_text = false;
                }
                item.markup.write_event(&event)?;
            }
            (Event::Empty(e), Some(item)) => {
                if item.depth == 0 && e.local_name().as_ref() == b"t" && item.text.is_none() {
                    item.text = Some(String::new());
                }
                item.markup.write_event(&event)?;
            }
            (Event::Text(e), Some(item)) => {
                if item.in_direct_text {
                    if let (Ok(text), Some(current_text)) = (e.unescape(), item.text.as_mut()) {
                        current_text.push_str(&text);
                    }
                }
                item.markup.write_event(&event)?;
            }
            (Event::CData(e), Some(item)) => {
                if item.in_direct_text {
                    if let Some(current_text) = item.text.as_mut() {
                        current_text.push_str(&String::from_utf8_lossy(e.as_ref()));
                    }
                }
                item.markup.write_event(&event)?;
            }
            (_, Some(item)) => {
                item.markup.write_event(&event)?;
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(Some(table))
}
