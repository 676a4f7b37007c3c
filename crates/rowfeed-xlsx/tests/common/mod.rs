//! Common utilities for reader tests: minimal XLSX packages built in memory.

use std::io::{Cursor, Write};

/// A worksheet to place in a fixture package
pub struct FixtureSheet<'a> {
    pub name: &'a str,
    /// Full worksheet part XML; `None` leaves the part out of the package
    pub xml: Option<String>,
}

impl<'a> FixtureSheet<'a> {
    /// A sheet whose `<sheetData>` holds `rows_xml`
    pub fn with_rows(name: &'a str, rows_xml: &str) -> Self {
        Self {
            name,
            xml: Some(format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
                rows_xml
            )),
        }
    }

    /// A sheet whose part is declared but absent from the package
    pub fn missing_part(name: &'a str) -> Self {
        Self { name, xml: None }
    }
}

/// Build an XLSX package in memory.
///
/// `shared_strings` holds the `<si>` elements of the shared string part; `None`
/// leaves the part out entirely.
pub fn build_xlsx(sheets: &[FixtureSheet<'_>], shared_strings: Option<&str>) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
        let options = zip::write::SimpleFileOptions::default();

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#).unwrap();

        zip.start_file("_rels/.rels", options).unwrap();
        zip.write_all(br#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#).unwrap();

        let mut sheet_entries = String::new();
        let mut rels = String::new();
        for (i, sheet) in sheets.iter().enumerate() {
            let n = i + 1;
            sheet_entries.push_str(&format!(
                r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                sheet.name, n, n
            ));
            rels.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                n, n
            ));
        }
        if shared_strings.is_some() {
            rels.push_str(r#"<Relationship Id="rIdSst" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#);
        }

        zip.start_file("xl/workbook.xml", options).unwrap();
        zip.write_all(format!(
            r#"<?xml version="1.0"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{}</sheets></workbook>"#,
            sheet_entries
        ).as_bytes()).unwrap();

        zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
        zip.write_all(format!(
            r#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
            rels
        ).as_bytes()).unwrap();

        if let Some(items) = shared_strings {
            zip.start_file("xl/sharedStrings.xml", options).unwrap();
            zip.write_all(format!(
                r#"<?xml version="1.0"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">{}</sst>"#,
                items
            ).as_bytes()).unwrap();
        }

        for (i, sheet) in sheets.iter().enumerate() {
            if let Some(xml) = &sheet.xml {
                zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)
                    .unwrap();
                zip.write_all(xml.as_bytes()).unwrap();
            }
        }

        zip.finish().unwrap();
    }
    buf
}
