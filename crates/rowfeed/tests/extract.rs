//! End-to-end extraction from XLSX files on disk.

#[path = "../../rowfeed-xlsx/tests/common/mod.rs"]
mod common;

use std::path::{Path, PathBuf};

use common::{build_xlsx, FixtureSheet};
use pretty_assertions::assert_eq;
use rowfeed::prelude::*;
use rowfeed::{ErrorKind, Report};
use tempfile::TempDir;

const PEOPLE_STRINGS: &str = "<si><t>Name</t></si><si><t>Age</t></si><si><t>City</t></si>\
    <si><t>Ann</t></si><si><t>NYC</t></si><si><t>Bo</t></si><si><t>LA</t></si>";

const PEOPLE_ROWS: &str = r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c><c r="C1" t="s"><v>2</v></c></row><row r="2"><c r="A2" t="s"><v>3</v></c><c r="B2"><v>30</v></c><c r="C2" t="s"><v>4</v></c></row><row r="3"><c r="A3" t="s"><v>5</v></c><c r="B3"><v>41</v></c><c r="C3" t="s"><v>6</v></c></row>"#;

fn write_book(dir: &TempDir, sheets: &[FixtureSheet<'_>], shared_strings: Option<&str>) -> PathBuf {
    let path = dir.path().join("book.xlsx");
    std::fs::write(&path, build_xlsx(sheets, shared_strings)).unwrap();
    path
}

fn run(path: &Path, sheet: &str) -> (SourceResult<ExtractSummary>, RecordBuffer, Vec<Report>) {
    let mut vars = HostVariables::new();
    vars.set(EXCEL_FILE_PATH, path.to_string_lossy());
    vars.set(EXCEL_SHEET_NAME, sheet);

    let source = ExcelSource::new(SourceConfig::from_variables(&vars));
    let mut buffer = RecordBuffer::for_columns(&source.config().columns);
    let mut reporter = CollectingReporter::new(ReportPolicy::Continue);

    let result = source.extract(&mut buffer, &mut reporter);
    (result, buffer, reporter.reports().to_vec())
}

fn values(buffer: &RecordBuffer) -> Vec<Vec<String>> {
    buffer.records().iter().map(|r| r.values().to_vec()).collect()
}

#[test]
fn test_people_example() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_book(
        &dir,
        &[FixtureSheet::with_rows("People", PEOPLE_ROWS)],
        Some(PEOPLE_STRINGS),
    );

    let (result, buffer, reports) = run(&path, "People");

    let summary = result.unwrap();
    assert_eq!(summary.rows_emitted, 2);
    assert_eq!(buffer.schema(), &["ColumnA", "ColumnB", "ColumnC"]);
    assert_eq!(
        values(&buffer),
        vec![vec!["Ann", "30", "NYC"], vec!["Bo", "41", "LA"]]
    );
    assert_eq!(buffer.value(1, "ColumnC"), Some("LA"));
    assert!(reports.is_empty());
}

#[test]
fn test_record_count_is_rows_minus_header() {
    let dir = tempfile::tempdir().unwrap();
    let rows: String = (1..=6)
        .map(|n| format!(r#"<row r="{n}"><c r="A{n}"><v>{n}</v></c></row>"#))
        .collect();
    let path = write_book(&dir, &[FixtureSheet::with_rows("Sheet1", &rows)], None);

    let (result, buffer, _) = run(&path, "Sheet1");

    assert_eq!(result.unwrap().rows_emitted, 5);
    assert_eq!(buffer.len(), 5);
    assert_eq!(buffer.value(0, "ColumnA"), Some("2"));
}

#[test]
fn test_header_only_and_empty_sheets() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_book(
        &dir,
        &[
            FixtureSheet::with_rows("HeaderOnly", r#"<row r="1"><c r="A1"><v>1</v></c></row>"#),
            FixtureSheet::with_rows("Empty", ""),
        ],
        None,
    );

    let (result, buffer, reports) = run(&path, "HeaderOnly");
    assert_eq!(result.unwrap().rows_emitted, 0);
    assert!(buffer.is_empty());
    assert!(reports.is_empty());

    let (result, buffer, _) = run(&path, "Empty");
    assert_eq!(result.unwrap().rows_emitted, 0);
    assert!(buffer.is_empty());
}

#[test]
fn test_cell_value_kinds() {
    let dir = tempfile::tempdir().unwrap();
    let rows = concat!(
        r#"<row r="1"><c r="A1"><v>h</v></c></row>"#,
        // shared string in range, inline string, boolean
        r#"<row r="2"><c r="A2" t="s"><v>1</v></c><c r="B2" t="inlineStr"><is><t>inline</t></is></c><c r="C2" t="b"><v>1</v></c></row>"#,
        // out-of-range index, non-numeric index, date serial
        r#"<row r="3"><c r="A3" t="s"><v>7</v></c><c r="B3" t="s"><v>x</v></c><c r="C3" s="1"><v>45292</v></c></row>"#,
        // error code, rich shared string, missing C
        r#"<row r="4"><c r="A4" t="e"><v>#N/A</v></c><c r="B4" t="s"><v>2</v></c></row>"#,
    );
    let path = write_book(
        &dir,
        &[FixtureSheet::with_rows("Kinds", rows)],
        Some("<si><t>zero</t></si><si><t>one</t></si><si><r><t>ri</t></r><r><t>ch</t></r></si>"),
    );

    let (result, buffer, reports) = run(&path, "Kinds");

    assert_eq!(result.unwrap().rows_emitted, 3);
    assert!(reports.is_empty());
    assert_eq!(
        values(&buffer),
        vec![
            vec!["one", "inline", "1"],
            vec!["", "", "45292"],
            vec!["#N/A", "<r><t>ri</t></r><r><t>ch</t></r>", ""],
        ]
    );
}

#[test]
fn test_sheet_fallback_matches_first_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_book(
        &dir,
        &[
            FixtureSheet::with_rows("People", PEOPLE_ROWS),
            FixtureSheet::with_rows("Second", r#"<row r="1"/><row r="2"><c r="A2"><v>9</v></c></row>"#),
        ],
        Some(PEOPLE_STRINGS),
    );

    let (explicit, explicit_buffer, _) = run(&path, "People");
    let (fallback, fallback_buffer, reports) = run(&path, "Nope");

    let fallback = fallback.unwrap();
    assert!(fallback.used_fallback);
    assert_eq!(fallback.sheet_name, "People");
    assert_eq!(explicit.unwrap().rows_emitted, fallback.rows_emitted);
    assert_eq!(values(&explicit_buffer), values(&fallback_buffer));

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].severity, Severity::Warning);
    assert_eq!(
        reports[0].message,
        "Sheet 'Nope' not found, using first sheet 'People'"
    );

    // An empty name falls back without a warning
    let (empty, _, reports) = run(&path, "");
    assert_eq!(empty.unwrap().sheet_name, "People");
    assert!(reports.is_empty());
}

#[test]
fn test_missing_path_reports_one_configuration_error() {
    let dir = tempfile::tempdir().unwrap();

    for path in [PathBuf::new(), dir.path().join("absent.xlsx")] {
        let (result, buffer, reports) = run(&path, "");

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Configuration);
        assert!(buffer.is_empty());
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].severity, Severity::Error);
        assert!(reports[0]
            .message
            .starts_with("Excel file path is invalid or file not found: "));
    }
}

#[test]
fn test_missing_worksheet_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_book(&dir, &[FixtureSheet::missing_part("Ghost")], None);

    let (result, buffer, reports) = run(&path, "Ghost");

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert!(buffer.is_empty());
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].message, "Could not find worksheet data.");
}

#[test]
fn test_workbook_without_sheets() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_book(&dir, &[], None);

    let (result, _, reports) = run(&path, "Data");

    assert_eq!(result.unwrap_err().kind(), ErrorKind::Structural);
    assert_eq!(
        reports[0].message,
        "Sheet 'Data' not found and no sheets exist in the workbook."
    );
}

#[test]
fn test_malformed_other_sheet_does_not_block_target() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_book(
        &dir,
        &[
            FixtureSheet::with_rows("People", PEOPLE_ROWS),
            FixtureSheet {
                name: "Broken",
                xml: Some("<worksheet><sheetData><row></sheetData></worksheet>".to_string()),
            },
        ],
        Some(PEOPLE_STRINGS),
    );

    let (result, buffer, reports) = run(&path, "People");
    assert_eq!(result.unwrap().rows_emitted, 2);
    assert_eq!(
        values(&buffer),
        vec![vec!["Ann", "30", "NYC"], vec!["Bo", "41", "LA"]]
    );
    assert!(reports.is_empty());

    // Selecting the malformed sheet itself still fails
    let (result, buffer, reports) = run(&path, "Broken");
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Unexpected);
    assert!(buffer.is_empty());
    assert_eq!(reports.len(), 1);
    assert!(reports[0].message.starts_with("An error occurred: XML error: "));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_io() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = write_book(
        &dir,
        &[FixtureSheet::with_rows("People", PEOPLE_ROWS)],
        Some(PEOPLE_STRINGS),
    );
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read the file regardless of its mode
    if std::fs::File::open(&path).is_ok() {
        return;
    }

    let (result, buffer, reports) = run(&path, "People");

    assert_eq!(result.unwrap_err().kind(), ErrorKind::Io);
    assert!(buffer.is_empty());
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].severity, Severity::Error);
    assert!(reports[0]
        .message
        .starts_with("Error accessing Excel file (might be open?): "));
}

#[test]
fn test_malformed_file_is_unexpected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xlsx");
    std::fs::write(&path, "Name,Age,City\nAnn,30,NYC\n".repeat(10)).unwrap();

    let (result, buffer, reports) = run(&path, "");

    assert_eq!(result.unwrap_err().kind(), ErrorKind::Unexpected);
    assert!(buffer.is_empty());
    assert_eq!(reports.len(), 1);
    assert!(reports[0].message.starts_with("An error occurred: "));
}

#[test]
fn test_stop_after_first_error_policy() {
    let source = ExcelSource::new(SourceConfig::default());
    let mut buffer = RecordBuffer::for_columns(&source.config().columns);
    let mut reporter = CollectingReporter::new(ReportPolicy::StopAfterFirst);

    assert!(source.extract(&mut buffer, &mut reporter).is_err());
    assert!(source.extract(&mut buffer, &mut reporter).is_err());

    assert_eq!(reporter.reports().len(), 1);
}

#[test]
fn test_custom_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_book(
        &dir,
        &[FixtureSheet::with_rows("People", PEOPLE_ROWS)],
        Some(PEOPLE_STRINGS),
    );

    let config = SourceConfig::new(path.to_string_lossy())
        .with_columns(&["C", "A"])
        .unwrap();
    let source = ExcelSource::new(config);
    let mut buffer = RecordBuffer::for_columns(&source.config().columns);
    let mut reporter = CollectingReporter::new(ReportPolicy::Continue);

    source.extract(&mut buffer, &mut reporter).unwrap();

    assert_eq!(buffer.schema(), &["ColumnC", "ColumnA"]);
    assert_eq!(values(&buffer), vec![vec!["NYC", "Ann"], vec!["LA", "Bo"]]);
}
