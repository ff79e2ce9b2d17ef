//! End-to-end runs over CSV input with a scripted language model.

use std::path::Path;

use lane_cli::run::{RunRequest, execute};
use lane_cli::summary::summary_rows;
use lane_core::PipelineError;
use lane_ingest::HeaderStrategy;
use lane_map::ClassifyError;
use lane_oracle::{ChatCompletion, ScriptedCompletion, ScriptedFailure};
use lane_report::OutputFormat;
use lane_standards::Settings;

const LANES: &str = "\
Lane ID,Country of Origin,Dest Country,Weight
L-001,argentina,jp,120
L-002,UnitStat.,Singapore,80
L-003,,\"Korea, Souh\",45
L-004,USA/CANADA,Tokyo,10
";

fn request(input: &Path, output_dir: &Path, format: OutputFormat) -> RunRequest {
    let mut settings = Settings::default();
    settings.oracle.pacing_ms = 0;
    RunRequest {
        input: input.to_path_buf(),
        sheet: None,
        output_dir: output_dir.to_path_buf(),
        format,
        settings,
        show_progress: false,
    }
}

fn scripted() -> ScriptedCompletion {
    ScriptedCompletion::new()
        .with_reply("unitstat.", "US")
        .with_reply("korea, souh", "KR")
        .with_reply("usa/canada", "null")
}

#[test]
fn resolves_both_country_columns() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("lanes.csv");
    std::fs::write(&input, LANES).unwrap();
    let transport = scripted();

    let report = execute(
        &request(&input, dir.path(), OutputFormat::Csv),
        Some(&transport as &dyn ChatCompletion),
    )
    .unwrap();

    assert_eq!(report.sheet_name, "lanes");
    assert_eq!(report.header.row, 1);
    assert_eq!(report.header.strategy, HeaderStrategy::DensestRow);
    assert_eq!(report.lane_id_column.column_name, "Lane ID");
    let columns: Vec<&str> = report
        .country_columns
        .iter()
        .map(|c| c.column_name.as_str())
        .collect();
    assert_eq!(columns, vec!["Country of Origin", "Dest Country"]);
    assert_eq!(report.rows, 4);
    assert_eq!(report.fingerprint.len(), 64);
    assert_eq!(transport.call_count(), 3);

    let rows: Vec<String> = summary_rows(&report)
        .into_iter()
        .map(|row| row.join(" | "))
        .collect();
    insta::assert_snapshot!(rows.join("\n"), @r"
    Country of Origin | 4 | 1 | 0 | 0 | 0 | 0 | 0 | 1 | 1 | 1 | 2
    Dest Country | 4 | 1 | 0 | 1 | 0 | 1 | 0 | 1 | 0 | 0 | 1
    ");

    let written = std::fs::read_to_string(&report.output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1], "L-001,argentina,AR,common,jp,JP,cca2");
    assert_eq!(lines[3], "L-003,,,,\"Korea, Souh\",KR,oracle");
}

#[test]
fn without_language_model_misses_stay_unresolved() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("lanes.csv");
    std::fs::write(&input, LANES).unwrap();

    let report = execute(&request(&input, dir.path(), OutputFormat::Xlsx), None).unwrap();
    let origin = &report.stats[0].1;
    assert_eq!(origin.oracle_calls, 0);
    assert_eq!(origin.unresolved, 2);
    assert!(report.output.extension().is_some_and(|ext| ext == "xlsx"));
}

#[test]
fn missing_lane_id_column_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("no_lane.csv");
    std::fs::write(&input, "Shipment Weight,Country\n12,Peru\n").unwrap();

    let error = execute(&request(&input, dir.path(), OutputFormat::Csv), None).unwrap_err();
    let classify = error
        .chain()
        .find_map(|e| e.downcast_ref::<ClassifyError>())
        .expect("classification error");
    assert!(matches!(classify, ClassifyError::NoLaneIdColumnFound { .. }));
    assert!(std::fs::read_dir(dir.path()).unwrap().count() == 1);
}

#[test]
fn unreachable_language_model_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("lanes.csv");
    std::fs::write(&input, LANES).unwrap();
    let transport = ScriptedCompletion::new().with_failure("unitstat.", ScriptedFailure::Timeout);

    let error = execute(
        &request(&input, dir.path(), OutputFormat::Csv),
        Some(&transport as &dyn ChatCompletion),
    )
    .unwrap_err();
    let pipeline = error
        .chain()
        .find_map(|e| e.downcast_ref::<PipelineError>())
        .expect("pipeline error");
    match pipeline {
        PipelineError::Oracle { lane_id, .. } => assert_eq!(lane_id, "L-002"),
        other => panic!("unexpected error: {other}"),
    }
}
