use std::path::Path;

use crate::error::{ReportError, Result};
use crate::table::OutputTable;

/// Writes the same rows as the workbook, without styling.
pub fn write_csv(table: &OutputTable, path: &Path) -> Result<()> {
    let wrap = |source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(wrap)?;
    writer.write_record(table.headers()).map_err(wrap)?;
    for row in &table.rows {
        writer.write_record(table.record(row)).map_err(wrap)?;
    }
    writer.flush().map_err(|e| wrap(e.into()))?;
    Ok(())
}
