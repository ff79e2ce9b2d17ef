#![deny(unsafe_code)]

//! Reading lane spreadsheets into header + row tables.

pub mod autofilter;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod header;
pub mod raw;
pub mod workbook;

use std::path::Path;

use tracing::{info, info_span};

use lane_model::SheetTable;

pub use discovery::{
    DEFAULT_INPUT_DIR, SUPPORTED_EXTENSIONS, SpreadsheetFormat, is_supported,
    list_spreadsheet_files, spreadsheet_format,
};
pub use error::{IngestError, Result};
pub use extract::{EMPTY_HEADER, extract_table};
pub use header::{HeaderLocation, HeaderStrategy, locate_header_row};
pub use raw::{CellRange, CellRef, RawSheet};
pub use workbook::{list_sheets, read_sheet};

/// Row count above which a run is announced as slow.
pub const LARGE_INPUT_ROWS: usize = 50;

/// A sheet read from disk with its header row located and table extracted.
#[derive(Debug, Clone)]
pub struct IngestedSheet {
    pub sheet_name: String,
    pub header: HeaderLocation,
    pub table: SheetTable,
}

/// Reads `sheet` (the first sheet when `None`) of the file at `path`,
/// locates its header row and extracts the table below it.
pub fn load_sheet_table(path: &Path, sheet: Option<&str>) -> Result<IngestedSheet> {
    let span = info_span!("ingest", path = %path.display(), sheet = sheet.unwrap_or("<first>"));
    let _guard = span.enter();

    let raw = read_sheet(path, sheet)?;
    let header = locate_header_row(&raw);
    let table = extract_table(&raw, header.row)?;
    if table.row_count() > LARGE_INPUT_ROWS {
        info!(
            rows = table.row_count(),
            "large sheet, resolution may take a while"
        );
    }
    Ok(IngestedSheet {
        sheet_name: raw.name,
        header,
        table,
    })
}
