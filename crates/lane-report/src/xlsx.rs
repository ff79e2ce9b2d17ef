//! Styled XLSX output.

use std::path::Path;

use rust_xlsxwriter::{
    Color, Format, FormatPattern, Table, TableColumn, TableStyle, Workbook, XlsxError,
};
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::table::OutputTable;

pub const SHEET_NAME: &str = "Cleaned Data";
pub const TABLE_NAME: &str = "result_table";
/// Fill of a clean cell holding a code.
pub const RESOLVED_FILL: u32 = 0x00CC_FFCC;
/// Fill of a clean cell left empty.
pub const UNRESOLVED_FILL: u32 = 0x00FF_CCCC;

/// Writes `table` as sheet `Cleaned Data` holding one filterable table.
pub fn write_xlsx(table: &OutputTable, path: &Path) -> Result<()> {
    build_workbook(table, path).map_err(|source| ReportError::Xlsx {
        path: path.to_path_buf(),
        source,
    })
}

fn build_workbook(table: &OutputTable, path: &Path) -> std::result::Result<(), XlsxError> {
    let resolved = fill(RESOLVED_FILL);
    let unresolved = fill(UNRESOLVED_FILL);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let headers = table.headers();
    for (offset, row) in table.rows.iter().enumerate() {
        let sheet_row = to_row(offset + 1);
        worksheet.write_string(sheet_row, 0, &row.lane_id)?;
        for (index, cell) in row.cells.iter().enumerate() {
            let first = to_col(1 + index * 3);
            worksheet.write_string(sheet_row, first, &cell.initial_data)?;
            match &cell.code {
                Some(code) => {
                    worksheet.write_string_with_format(sheet_row, first + 1, code, &resolved)?;
                }
                None => {
                    worksheet.write_blank(sheet_row, first + 1, &unresolved)?;
                }
            }
            if let Some(source) = cell.source {
                worksheet.write_string(sheet_row, first + 2, source.as_str())?;
            }
        }
    }

    let columns: Vec<TableColumn> = headers
        .iter()
        .map(|header| TableColumn::new().set_header(header))
        .collect();
    let result_table = Table::new()
        .set_name(TABLE_NAME)
        .set_style(TableStyle::Light8)
        .set_banded_rows(false)
        .set_columns(&columns);
    // A table needs a data row below its header.
    let last_row = to_row(table.rows.len().max(1));
    let last_col = to_col(headers.len().saturating_sub(1));
    worksheet.add_table(0, 0, last_row, last_col, &result_table)?;
    worksheet.autofit();

    workbook.save(path)?;
    debug!(path = %path.display(), rows = table.rows.len(), "workbook written");
    Ok(())
}

fn fill(rgb: u32) -> Format {
    Format::new()
        .set_pattern(FormatPattern::Solid)
        .set_background_color(Color::RGB(rgb))
}

fn to_row(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

fn to_col(index: usize) -> u16 {
    u16::try_from(index).unwrap_or(u16::MAX)
}
