#![deny(unsafe_code)]

//! Cleaned-data output: resolution results grouped per lane and written as
//! a styled workbook or a plain CSV file.

pub mod csv_file;
pub mod error;
pub mod table;
pub mod xlsx;

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use lane_model::ResolutionResult;

pub use csv_file::write_csv;
pub use error::{ReportError, Result};
pub use table::{LANE_ID_HEADER, OutputCell, OutputRow, OutputTable};
pub use xlsx::{SHEET_NAME, TABLE_NAME, write_xlsx};

/// Output file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Csv,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// `results_<unix-millis>.<ext>`.
pub fn output_file_name(format: OutputFormat, unix_millis: i64) -> String {
    format!("results_{unix_millis}.{}", format.extension())
}

/// Groups `results` and writes them into `output_dir` under a timestamped
/// name. Returns the written path.
pub fn write_report(
    results: &[ResolutionResult],
    output_dir: &Path,
    format: OutputFormat,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir).map_err(|source| ReportError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let path = output_dir.join(output_file_name(format, Utc::now().timestamp_millis()));
    let table = OutputTable::from_results(results);
    match format {
        OutputFormat::Xlsx => write_xlsx(&table, &path)?,
        OutputFormat::Csv => write_csv(&table, &path)?,
    }
    info!(
        path = %path.display(),
        rows = table.rows.len(),
        columns = table.columns.len(),
        "results written"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_is_timestamped() {
        assert_eq!(
            output_file_name(OutputFormat::Xlsx, 1_700_000_000_123),
            "results_1700000000123.xlsx"
        );
        assert_eq!(output_file_name(OutputFormat::Csv, 5), "results_5.csv");
    }
}
