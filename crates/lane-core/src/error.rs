use lane_oracle::OracleError;
use thiserror::Error;

/// A run-aborting failure while resolving a column.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The oracle could not be reached for a cell that needed it.
    #[error("oracle failed for lane {lane_id}, column {column}: {source}")]
    Oracle {
        lane_id: String,
        column: String,
        /// Left out of the message so cell data is not logged by default.
        value: String,
        #[source]
        source: OracleError,
    },

    /// A classified column index points outside the table.
    #[error("column {column} (index {index}) is not in the table")]
    ColumnOutOfRange { column: String, index: usize },
}

impl PipelineError {
    pub fn oracle_error(&self) -> Option<&OracleError> {
        match self {
            Self::Oracle { source, .. } => Some(source),
            Self::ColumnOutOfRange { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
