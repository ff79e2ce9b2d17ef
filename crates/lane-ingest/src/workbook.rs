//! Sheet listing and raw sheet reading for workbooks and CSV files.

use std::path::Path;

use calamine::{Data, Reader, Sheets, open_workbook_auto};
use csv::ReaderBuilder;
use tracing::debug;

use crate::autofilter::read_auto_filter;
use crate::discovery::{SpreadsheetFormat, spreadsheet_format};
use crate::error::{IngestError, Result};
use crate::raw::RawSheet;

fn open_workbook(path: &Path) -> Result<Sheets<std::io::BufReader<std::fs::File>>> {
    open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Sheet names in workbook order. A CSV file has one sheet named after the
/// file stem.
pub fn list_sheets(path: &Path) -> Result<Vec<String>> {
    match spreadsheet_format(path)? {
        SpreadsheetFormat::Csv => Ok(vec![csv_sheet_name(path)]),
        SpreadsheetFormat::Workbook => {
            let workbook = open_workbook(path)?;
            Ok(workbook.sheet_names().to_vec())
        }
    }
}

/// Reads one sheet's used range. `None` selects the first sheet.
pub fn read_sheet(path: &Path, sheet: Option<&str>) -> Result<RawSheet> {
    match spreadsheet_format(path)? {
        SpreadsheetFormat::Csv => read_csv_sheet(path),
        SpreadsheetFormat::Workbook => read_workbook_sheet(path, sheet),
    }
}

fn csv_sheet_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Sheet1".to_string())
}

fn read_csv_sheet(path: &Path) -> Result<RawSheet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(
            record
                .iter()
                .map(|value| value.trim_start_matches('\u{feff}').to_string())
                .collect(),
        );
    }
    debug!(path = %path.display(), rows = rows.len(), "read csv sheet");
    Ok(RawSheet::new(csv_sheet_name(path), rows))
}

fn read_workbook_sheet(path: &Path, sheet: Option<&str>) -> Result<RawSheet> {
    let mut workbook = open_workbook(path)?;
    let names: Vec<String> = workbook.sheet_names().to_vec();
    let name = match sheet {
        Some(wanted) => names
            .iter()
            .find(|name| name.as_str() == wanted)
            .cloned()
            .ok_or_else(|| IngestError::SheetNotFound {
                path: path.to_path_buf(),
                sheet: wanted.to_string(),
                available: names.clone(),
            })?,
        None => names.first().cloned().ok_or_else(|| IngestError::NoSheets {
            path: path.to_path_buf(),
        })?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: format!("failed to read sheet '{name}': {e}"),
        })?;
    let first_row = range.start().map_or(1, |(row, _)| row as usize + 1);
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    let auto_filter = read_auto_filter(path, &name);
    debug!(
        path = %path.display(),
        sheet = %name,
        rows = rows.len(),
        first_row,
        auto_filter = auto_filter.is_some(),
        "read workbook sheet"
    );
    Ok(RawSheet::new(name, rows)
        .with_first_row(first_row)
        .with_auto_filter(auto_filter))
}

/// Renders a cell as text. Whole floats drop their fractional part.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                n.to_string()
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::Error(e) => format!("#{e:?}"),
        Data::DateTime(dt) => dt.as_f64().to_string(),
    }
}
