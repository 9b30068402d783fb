//! Text files -> xlsx -> rows -> archive

use tempfile::TempDir;
use txtsheet_archive::TextArchive;
use txtsheet_core::config::{ExportSettings, SheetSettings};
use txtsheet_core::{
    codes, export_spreadsheet, map_grid, package_rows, write_archive, Ingestor, SheetSession,
    SourceFile,
};
use txtsheet_data::{parse_spreadsheet_bytes, SheetFormat};

#[test]
fn test_text_files_survive_round_trip() {
    let files = vec![
        SourceFile::in_memory("alpha.txt", "first body".as_bytes()),
        SourceFile::in_memory("beta.txt", "second\nbody".as_bytes()),
        SourceFile::in_memory("ignored.md", "nope".as_bytes()),
    ];
    let ingested = Ingestor::default().read_files(&files).data;
    assert_eq!(ingested.records.len(), 2);

    let bytes = export_spreadsheet(&ingested.records, &SheetSettings::default())
        .unwrap()
        .data
        .unwrap();
    let parsed = parse_spreadsheet_bytes(bytes, SheetFormat::Workbook).unwrap();
    assert_eq!(parsed.sheet, "TXT");

    let mapped = map_grid(&parsed.grid);
    assert!(mapped.notices.iter().any(|n| n.has_code(codes::NARROW_SHEET)));

    let mut session = SheetSession::new();
    session.load(mapped.data);
    assert_eq!(session.headers().title_column_count, 1);
    session.select_all(0).unwrap();

    let archive = package_rows(session.rows(), &ExportSettings::default())
        .unwrap()
        .data
        .unwrap();
    assert_eq!(archive.get_string("alpha.txt").as_deref(), Some("first body"));
    assert_eq!(archive.get_string("beta.txt").as_deref(), Some("second\nbody"));

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("txt_files.zip");
    write_archive(&archive, &path).unwrap();

    let reopened = TextArchive::open(&path).unwrap();
    let names: Vec<&str> = reopened.file_list().collect();
    assert_eq!(names, vec!["alpha.txt", "beta.txt"]);
}

#[test]
fn test_invalid_rows_block_whole_export() {
    let grid: Vec<Vec<String>> = [
        ["Short", "Long", "Spare", "Content"],
        ["a", "aaa", "", "body a"],
        ["b", "bbb", "", "body b"],
    ]
    .iter()
    .map(|r| r.iter().map(|c| c.to_string()).collect())
    .collect();

    let mut session = SheetSession::new();
    session.load(map_grid(&grid).data);
    session.select_title(0, 1).unwrap();
    session.select_title(1, 2).unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("txt_files.zip");

    let err = package_rows(session.rows(), &ExportSettings::default()).unwrap_err();
    let violations = err.violations();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].row, Some(2));
    assert!(violations[0].message.contains("Row 2"));
    assert!(violations[0].message.contains("title"));
    assert!(!path.exists());
}

#[test]
fn test_csv_row_wider_than_header_keeps_last_cell_as_content() {
    let parsed =
        parse_spreadsheet_bytes(b"T1,Content\na,b,the body\n".to_vec(), SheetFormat::Csv).unwrap();
    let mapped = map_grid(&parsed.grid).data;

    assert_eq!(mapped.headers.total_columns, 3);
    assert_eq!(mapped.rows.len(), 1);
    assert_eq!(mapped.rows[0].content, "the body");
    assert_eq!(mapped.rows[0].titles[0], "a");
    assert_eq!(mapped.rows[0].titles[1], "b");
}
