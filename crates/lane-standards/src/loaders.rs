use std::collections::BTreeSet;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, StandardsError};
use crate::paths::{country_headers_path, countries_path, lane_id_headers_path, oracle_prompt_path};
use crate::vocabulary::{ReferenceVocabulary, load_vocabulary};

pub fn load_default_vocabulary() -> Result<ReferenceVocabulary> {
    from_reference_dir(load_vocabulary(&countries_path()))
}

pub fn load_default_country_headers() -> Result<Vec<String>> {
    from_reference_dir(load_header_names(&country_headers_path()))
}

pub fn load_default_lane_id_headers() -> Result<Vec<String>> {
    from_reference_dir(load_header_names(&lane_id_headers_path()))
}

pub fn load_default_oracle_prompt() -> Result<String> {
    from_reference_dir(load_oracle_prompt(&oracle_prompt_path()))
}

/// A reference file missing from the resolved directory points at
/// `LANE_REFERENCE_DIR`.
fn from_reference_dir<T>(result: Result<T>) -> Result<T> {
    result.map_err(|err| match err {
        StandardsError::Io { path, source } if source.kind() == io::ErrorKind::NotFound => {
            StandardsError::ReferenceNotFound { path }
        }
        other => other,
    })
}

/// Loads a header vocabulary: a JSON array of header spellings.
///
/// Entries are trimmed; blanks and repeats are dropped. An empty result is
/// an error since the classifier could never match anything.
pub fn load_header_names(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let raw: Vec<String> =
        serde_json::from_str(&text).map_err(|e| StandardsError::json(path, e))?;
    let mut seen = BTreeSet::new();
    let names: Vec<String> = raw
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty() && seen.insert(name.to_lowercase()))
        .collect();
    if names.is_empty() {
        return Err(StandardsError::EmptyVocabulary {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), count = names.len(), "loaded header vocabulary");
    Ok(names)
}

/// Loads the oracle prompt template. The cell text is appended after it.
pub fn load_oracle_prompt(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    if text.trim().is_empty() {
        return Err(StandardsError::EmptyVocabulary {
            path: path.to_path_buf(),
        });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_reference_file_names_the_env_var() {
        let missing = Path::new("/nonexistent/reference/countries.json");
        let err = from_reference_dir(load_vocabulary(missing)).unwrap_err();
        assert!(matches!(err, StandardsError::ReferenceNotFound { .. }));
        assert!(err.to_string().contains("LANE_REFERENCE_DIR"), "{err}");
    }

    #[test]
    fn other_read_errors_pass_through() {
        let err = from_reference_dir::<()>(Err(StandardsError::io(
            "countries.json",
            io::Error::from(io::ErrorKind::PermissionDenied),
        )))
        .unwrap_err();
        assert!(matches!(err, StandardsError::Io { .. }));
    }
}
