//! Directory-walk ingestion against a real directory tree

use std::fs;

use tempfile::TempDir;
use txtsheet_core::config::IngestSettings;
use txtsheet_core::{codes, DirectorySelection, IngestError, IngestStatus, Ingestor, SourceFile};

fn write(dir: &TempDir, rel: &str, contents: &[u8]) {
    let path = dir.path().join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[test]
fn test_walk_visits_each_file_once() {
    let dir = TempDir::new().unwrap();
    write(&dir, "top.txt", b"top");
    write(&dir, "a/one.txt", b"one");
    write(&dir, "a/b/two.TXT", b"two");
    write(&dir, "a/b/c/three.txt", b"three");
    write(&dir, "a/skip.md", b"# no");
    write(&dir, "empty/.keep", b"");

    let outcome = Ingestor::default()
        .read_directory(DirectorySelection::Picked(dir.path().to_path_buf()))
        .unwrap();
    let ingested = outcome.data;

    assert_eq!(ingested.status, IngestStatus::Loaded);
    let mut titles: Vec<&str> = ingested.records.iter().map(|r| r.title.as_str()).collect();
    titles.sort_unstable();
    assert_eq!(titles, vec!["one", "three", "top", "two"]);

    let root = dir.path().file_name().unwrap().to_string_lossy();
    assert_eq!(ingested.root_name.as_deref(), Some(root.as_ref()));
}

#[test]
fn test_walk_skips_undecodable_file() {
    let dir = TempDir::new().unwrap();
    write(&dir, "good.txt", "héllo".as_bytes());
    write(&dir, "bad.txt", &[0xff, 0xfe, 0x00, 0xc3]);

    let outcome = Ingestor::default()
        .read_directory(DirectorySelection::Picked(dir.path().to_path_buf()))
        .unwrap();

    assert_eq!(outcome.data.records.len(), 1);
    assert_eq!(outcome.data.records[0].content, "héllo");
    assert_eq!(outcome.data.skipped.len(), 1);
    assert!(outcome.notices.iter().any(|n| n.has_code(codes::UNREADABLE_FILE)));
}

#[test]
fn test_walk_without_matches() {
    let dir = TempDir::new().unwrap();
    write(&dir, "readme.md", b"nothing here");

    let outcome = Ingestor::default()
        .read_directory(DirectorySelection::Picked(dir.path().to_path_buf()))
        .unwrap();

    assert_eq!(outcome.data.status, IngestStatus::NoMatches);
    assert!(outcome.data.records.is_empty());
    assert!(outcome.notices.iter().any(|n| n.has_code(codes::NO_MATCHES)));
}

#[test]
fn test_missing_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("gone");

    let err = Ingestor::default()
        .read_directory(DirectorySelection::Picked(missing))
        .unwrap_err();
    assert!(matches!(err, IngestError::DirectoryUnavailable { .. }));
}

#[test]
fn test_cancelled_selection_is_silent() {
    let outcome = Ingestor::default()
        .read_directory(DirectorySelection::Cancelled)
        .unwrap();

    assert_eq!(outcome.data.status, IngestStatus::Cancelled);
    assert!(outcome.notices.is_empty());
}

#[test]
fn test_file_list_from_disk_keeps_order_and_truncates() {
    let dir = TempDir::new().unwrap();
    let names = ["c.txt", "a.txt", "b.txt"];
    for name in names {
        write(&dir, name, "0123456789".as_bytes());
    }

    let files: Vec<SourceFile> = names
        .iter()
        .map(|n| SourceFile::from_path(dir.path().join(n)))
        .collect();
    let ingestor = Ingestor::new(IngestSettings {
        max_chars: 4,
        ..Default::default()
    });
    let outcome = ingestor.read_files(&files);

    let titles: Vec<&str> = outcome.data.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["c", "a", "b"]);
    assert!(outcome.data.records.iter().all(|r| r.content == "0123"));
    assert_eq!(outcome.data.truncated, 3);
}

#[test]
fn test_skipped_paths_match_across_modes() {
    let dir = TempDir::new().unwrap();
    write(&dir, "good.txt", b"fine");
    write(&dir, "bad.txt", &[0xff, 0xfe]);
    let bad = dir.path().join("bad.txt");

    let walked = Ingestor::default()
        .read_directory(DirectorySelection::Picked(dir.path().to_path_buf()))
        .unwrap();
    let listed = Ingestor::default().read_files(&[
        SourceFile::from_path(dir.path().join("good.txt")),
        SourceFile::from_path(&bad),
    ]);

    assert_eq!(walked.data.skipped, vec![bad.display().to_string()]);
    assert_eq!(listed.data.skipped, walked.data.skipped);
    assert_eq!(listed.data.root_name, walked.data.root_name);
}
