use std::path::PathBuf;

/// Failures while loading reference data or settings.
///
/// All of these are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "reference file {path} not found; set {} to the reference directory",
        crate::paths::REFERENCE_ENV_VAR
    )]
    ReferenceNotFound { path: PathBuf },

    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse TOML settings {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("entry {index} in {path} is missing required field {field}")]
    MissingField {
        path: PathBuf,
        index: usize,
        field: &'static str,
    },

    #[error("entry {index} in {path} has invalid {field} code {code:?}")]
    InvalidCode {
        path: PathBuf,
        index: usize,
        field: &'static str,
        code: String,
    },

    #[error("duplicate {field} code {code} in {path}")]
    DuplicateCode {
        path: PathBuf,
        field: &'static str,
        code: String,
    },

    #[error("no usable entries in {path}")]
    EmptyVocabulary { path: PathBuf },

    #[error("invalid setting {key}: {message}")]
    InvalidSetting { key: &'static str, message: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StandardsError>;
