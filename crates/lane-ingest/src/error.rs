use std::path::PathBuf;

/// Errors raised while reading input spreadsheets.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The workbook could not be opened or a sheet could not be decoded.
    /// Password-protected files end up here as well.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    #[error("sheet {sheet:?} not found in {path} (available: {})", .available.join(", "))]
    SheetNotFound {
        path: PathBuf,
        sheet: String,
        available: Vec<String>,
    },

    #[error("workbook {path} contains no sheets")]
    NoSheets { path: PathBuf },

    #[error("sheet {sheet:?} has no data at or below header row {header_row}")]
    EmptySheet { sheet: String, header_row: usize },

    #[error("unsupported file type: {path}")]
    UnsupportedFormat { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, IngestError>;
