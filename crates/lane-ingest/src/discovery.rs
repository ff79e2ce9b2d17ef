//! Input file discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Extensions accepted as input, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xls", "ods", "csv"];

/// Default directory scanned for input spreadsheets.
pub const DEFAULT_INPUT_DIR: &str = "worksheets";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    Csv,
    Workbook,
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

pub fn is_supported(path: &Path) -> bool {
    extension(path).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

pub fn spreadsheet_format(path: &Path) -> Result<SpreadsheetFormat> {
    match extension(path).as_deref() {
        Some("csv") => Ok(SpreadsheetFormat::Csv),
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext) => Ok(SpreadsheetFormat::Workbook),
        _ => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Lists spreadsheet files in a directory, sorted by file name.
///
/// Subdirectories and lock files left behind by office suites (`~$name.xlsx`)
/// are skipped.
pub fn list_spreadsheet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_lock_file = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("~$"));
        if !is_lock_file && is_supported(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            spreadsheet_format(Path::new("lanes.CSV")).ok(),
            Some(SpreadsheetFormat::Csv)
        );
        assert_eq!(
            spreadsheet_format(Path::new("lanes.xlsm")).ok(),
            Some(SpreadsheetFormat::Workbook)
        );
        assert!(spreadsheet_format(Path::new("lanes.pdf")).is_err());
        assert!(!is_supported(Path::new("README")));
    }
}
