//! Written report files read back from disk.

use std::io::Read;

use calamine::{Data, Reader, open_workbook_auto};
use lane_model::{ResolutionResult, Source};
use lane_report::{OutputFormat, SHEET_NAME, TABLE_NAME, write_report};

fn resolved(lane: &str, column: &str, data: &str, code: &str, source: Source) -> ResolutionResult {
    ResolutionResult {
        lane_id: lane.to_string(),
        column_name: column.to_string(),
        initial_data: data.to_string(),
        correspondance: None,
        guessed_country: None,
        guessed_country_code: Some(code.to_string()),
        source: Some(source),
    }
}

fn results() -> Vec<ResolutionResult> {
    vec![
        resolved("L-1", "Country of Origin", "argentina", "AR", Source::Common),
        ResolutionResult::unresolved("L-2", "Country of Origin", "USA/CANADA"),
        resolved("L-1", "Dest Country", "jp", "JP", Source::Cca2),
        resolved("L-2", "Dest Country", "UnitStat.", "US", Source::Oracle),
    ]
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

#[test]
fn workbook_has_cleaned_data_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_report(&results(), dir.path(), OutputFormat::Xlsx).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("results_") && name.ends_with(".xlsx"), "{name}");

    let mut workbook = open_workbook_auto(&path).unwrap();
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    assert_eq!(
        rows[0],
        vec![
            "Lane ID",
            "Country of Origin",
            "Clean - Country of Origin",
            "Source - Country of Origin",
            "Dest Country",
            "Clean - Dest Country",
            "Source - Dest Country",
        ]
    );
    assert_eq!(
        rows[1],
        vec!["L-1", "argentina", "AR", "common", "jp", "JP", "cca2"]
    );
    assert_eq!(
        rows[2],
        vec!["L-2", "USA/CANADA", "", "", "UnitStat.", "US", "oracle"]
    );
}

#[test]
fn workbook_carries_table_and_fills() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_report(&results(), dir.path(), OutputFormat::Xlsx).unwrap();
    let file = std::fs::File::open(&path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();

    let mut table_xml = String::new();
    archive
        .by_name("xl/tables/table1.xml")
        .unwrap()
        .read_to_string(&mut table_xml)
        .unwrap();
    assert!(table_xml.contains(&format!("name=\"{TABLE_NAME}\"")));
    assert!(table_xml.contains("autoFilter"));

    let mut styles = String::new();
    archive
        .by_name("xl/styles.xml")
        .unwrap()
        .read_to_string(&mut styles)
        .unwrap();
    assert!(styles.contains("FFCCFFCC"));
    assert!(styles.contains("FFFFCCCC"));
}

#[test]
fn country_column_named_lane_id_still_writes_a_table() {
    let dir = tempfile::tempdir().unwrap();
    let results = [
        ResolutionResult::unresolved("L-1", "Lane ID", "L-1"),
        resolved("L-1", "Origin", "Peru", "PE", Source::Common),
    ];
    let path = write_report(&results, dir.path(), OutputFormat::Xlsx).unwrap();

    let mut workbook = open_workbook_auto(&path).unwrap();
    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    assert_eq!(
        rows[0],
        vec![
            "Lane ID",
            "Lane ID_1",
            "Clean - Lane ID",
            "Source - Lane ID",
            "Origin",
            "Clean - Origin",
            "Source - Origin",
        ]
    );
    assert_eq!(rows[1], vec!["L-1", "L-1", "", "", "Peru", "PE", "common"]);
}

#[test]
fn empty_results_still_write_a_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_report(&[], dir.path(), OutputFormat::Xlsx).unwrap();
    assert!(path.is_file());
}

#[test]
fn csv_has_same_rows_without_styling() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_report(&results(), &dir.path().join("out"), OutputFormat::Csv).unwrap();
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("csv"));
    let text = std::fs::read_to_string(&path).unwrap();
    insta::assert_snapshot!(text, @r"
    Lane ID,Country of Origin,Clean - Country of Origin,Source - Country of Origin,Dest Country,Clean - Dest Country,Source - Dest Country
    L-1,argentina,AR,common,jp,JP,cca2
    L-2,USA/CANADA,,,UnitStat.,US,oracle
    ");
}
