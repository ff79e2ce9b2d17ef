use std::fs;

use lane_ingest::{IngestError, list_sheets, list_spreadsheet_files};

#[test]
fn lists_supported_files_sorted() {
    let dir = tempfile::tempdir().expect("tempdir");
    for name in ["b.xlsx", "a.csv", "notes.txt", "~$b.xlsx", "c.ODS"] {
        fs::write(dir.path().join(name), b"").expect("write file");
    }
    fs::create_dir(dir.path().join("nested.xlsx")).expect("create dir");

    let files = list_spreadsheet_files(dir.path()).expect("list files");
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.csv", "b.xlsx", "c.ODS"]);
}

#[test]
fn empty_directory_lists_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(list_spreadsheet_files(dir.path()).expect("list").is_empty());
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = list_spreadsheet_files(&dir.path().join("worksheets")).unwrap_err();
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
}

#[test]
fn csv_has_a_single_sheet_named_after_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tender_q3.csv");
    fs::write(&path, "Lane ID,Country\nL1,Peru\n").expect("write csv");
    assert_eq!(list_sheets(&path).expect("sheets"), vec!["tender_q3"]);
}
