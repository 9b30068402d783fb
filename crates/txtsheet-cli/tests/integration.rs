//! Integration tests for txtsheet CLI
//!
//! These tests drive the command functions end to end:
//! text files -> xlsx -> zip of text files

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;
use txtsheet_archive::CollisionPolicy;
use txtsheet_cli::{
    inspect_command, to_sheet_command, to_txt_command, OutputFormat, RowChoice, SelectionArgs,
};
use txtsheet_core::config::Settings;
use txtsheet_core::ExportError;
use zip::ZipArchive;

/// Write a sheet with the given rows (first row is the header)
fn create_sheet(path: &Path, rows: &[&[&str]]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                worksheet
                    .write_string(r as u32, c as u16, *value)
                    .unwrap();
            }
        }
    }
    workbook.save(path).unwrap();
}

/// Entry names and contents of a zip, in archive order
fn read_zip(path: &Path) -> Vec<(String, String)> {
    let mut zip = ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..zip.len())
        .map(|i| {
            let mut entry = zip.by_index(i).unwrap();
            let mut contents = String::new();
            entry.read_to_string(&mut contents).unwrap();
            (entry.name().to_string(), contents)
        })
        .collect()
}

#[test]
fn test_directory_to_sheet_and_back() {
    let temp = TempDir::new().unwrap();
    let notes = temp.path().join("notes");
    fs::create_dir_all(notes.join("sub")).unwrap();
    fs::write(notes.join("first.txt"), "one").unwrap();
    fs::write(notes.join("sub").join("second.txt"), "two").unwrap();
    fs::write(notes.join("skip.log"), "ignored").unwrap();

    let settings = Settings::default();
    let sheet = temp.path().join("notes.xlsx");
    let written = to_sheet_command(&[], Some(notes.as_path()), Some(sheet.as_path()), &settings)
        .unwrap()
        .unwrap();
    assert_eq!(written, sheet);
    assert!(sheet.exists());

    let archive = temp.path().join("out.zip");
    let selection = SelectionArgs {
        title_column: Some(1),
        ..Default::default()
    };
    to_txt_command(&sheet, &selection, Some(archive.as_path()), &settings)
        .unwrap()
        .unwrap();

    let mut entries = read_zip(&archive);
    entries.sort();
    assert_eq!(
        entries,
        vec![
            ("first.txt".to_string(), "one".to_string()),
            ("second.txt".to_string(), "two".to_string()),
        ]
    );
}

#[test]
fn test_file_list_keeps_input_order() {
    let temp = TempDir::new().unwrap();
    let b = temp.path().join("b.txt");
    let a = temp.path().join("a.txt");
    fs::write(&b, "bee").unwrap();
    fs::write(&a, "ay").unwrap();

    let sheet = temp.path().join("list.xlsx");
    to_sheet_command(&[b, a], None, Some(sheet.as_path()), &Settings::default()).unwrap();

    let parsed = txtsheet_data::parse_spreadsheet_file(&sheet).unwrap();
    assert_eq!(parsed.sheet, "TXT");
    assert_eq!(parsed.grid[0], vec!["Title", "Content"]);
    assert_eq!(parsed.grid[1], vec!["b", "bee"]);
    assert_eq!(parsed.grid[2], vec!["a", "ay"]);
}

#[test]
fn test_oversize_file_clipped_not_fatal() {
    let temp = TempDir::new().unwrap();
    let short = temp.path().join("short.txt");
    let long = temp.path().join("long.txt");
    fs::write(&short, "tiny").unwrap();
    fs::write(&long, "y".repeat(40_000)).unwrap();

    let sheet = temp.path().join("big.xlsx");
    let written = to_sheet_command(&[short, long], None, Some(sheet.as_path()), &Settings::default())
        .unwrap();
    assert_eq!(written, Some(sheet.clone()));

    let parsed = txtsheet_data::parse_spreadsheet_file(&sheet).unwrap();
    assert_eq!(parsed.grid[1], vec!["short", "tiny"]);
    assert_eq!(
        parsed.grid[2][1].chars().count(),
        txtsheet_data::MAX_CELL_CHARS
    );
}

#[test]
fn test_to_sheet_without_matches_writes_nothing() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("readme.md"), "x").unwrap();
    let sheet = temp.path().join("none.xlsx");

    let written =
        to_sheet_command(&[], Some(temp.path()), Some(sheet.as_path()), &Settings::default()).unwrap();
    assert!(written.is_none());
    assert!(!sheet.exists());
}

#[test]
fn test_selection_and_drop() {
    let temp = TempDir::new().unwrap();
    let sheet = temp.path().join("rows.xlsx");
    create_sheet(
        &sheet,
        &[
            &["Short", "Long", "Content"],
            &["a", "alpha", "body a"],
            &["b", "", "body b"],
            &["c", "gamma", "body c"],
        ],
    );

    let selection = SelectionArgs {
        title_column: Some(2),
        select: vec![RowChoice { row: 2, column: 1 }],
        drop: vec![3],
    };
    let archive = temp.path().join("rows.zip");
    to_txt_command(&sheet, &selection, Some(archive.as_path()), &Settings::default()).unwrap();

    assert_eq!(
        read_zip(&archive),
        vec![
            ("alpha.txt".to_string(), "body a".to_string()),
            ("b.txt".to_string(), "body b".to_string()),
        ]
    );
}

#[test]
fn test_invalid_selection_blocks_archive() {
    let temp = TempDir::new().unwrap();
    let sheet = temp.path().join("rows.xlsx");
    create_sheet(
        &sheet,
        &[
            &["T1", "T2", "T3", "Content"],
            &["a", "b", "", "body"],
            &["x", "y", "z", ""],
        ],
    );

    let selection = SelectionArgs {
        title_column: Some(3),
        ..Default::default()
    };
    let archive = temp.path().join("blocked.zip");
    let err = to_txt_command(&sheet, &selection, Some(archive.as_path()), &Settings::default())
        .unwrap_err();

    let export = err.downcast_ref::<ExportError>().unwrap();
    assert_eq!(export.violations().len(), 2);
    assert!(export.violations()[0].message.contains("Row 1"));
    assert!(export.violations()[1].message.contains("Row 2"));
    assert!(!archive.exists());
}

#[test]
fn test_overwrite_policy_from_settings() {
    let temp = TempDir::new().unwrap();
    let sheet = temp.path().join("dupes.csv");
    fs::write(&sheet, "Title,Content\nsame,first\nsame,second\n").unwrap();

    let mut settings = Settings::default();
    settings.export.collisions = CollisionPolicy::Overwrite;
    let selection = SelectionArgs {
        title_column: Some(1),
        ..Default::default()
    };
    let archive = temp.path().join("dupes.zip");
    to_txt_command(&sheet, &selection, Some(archive.as_path()), &settings).unwrap();

    assert_eq!(
        read_zip(&archive),
        vec![("same.txt".to_string(), "second".to_string())]
    );
}

#[test]
fn test_selection_out_of_range() {
    let temp = TempDir::new().unwrap();
    let sheet = temp.path().join("small.csv");
    fs::write(&sheet, "Title,Content\nx,y\n").unwrap();

    let selection = SelectionArgs {
        title_column: Some(5),
        ..Default::default()
    };
    let result = to_txt_command(&sheet, &selection, None, &Settings::default());
    assert!(result.is_err());
}

#[test]
fn test_inspect_accepts_both_formats() {
    let temp = TempDir::new().unwrap();
    let sheet = temp.path().join("inspect.csv");
    fs::write(&sheet, "T1,T2,Content\na,b,c\n").unwrap();

    inspect_command(&sheet, OutputFormat::Text).unwrap();
    inspect_command(&sheet, OutputFormat::Json).unwrap();
    assert!(inspect_command(&temp.path().join("missing.csv"), OutputFormat::Text).is_err());
}
