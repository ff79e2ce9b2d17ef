//! Reference directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the reference directory.
pub const REFERENCE_ENV_VAR: &str = "LANE_REFERENCE_DIR";

pub const COUNTRIES_FILE: &str = "countries.json";
pub const COUNTRY_HEADERS_FILE: &str = "header_names_country.json";
pub const LANE_ID_HEADERS_FILE: &str = "header_names_lane_id.json";
pub const ORACLE_PROMPT_FILE: &str = "oracle_prompt.txt";

/// Get the reference root directory.
///
/// Resolution order:
/// 1. `LANE_REFERENCE_DIR` environment variable
/// 2. `reference/` directory relative to workspace root
pub fn reference_root() -> PathBuf {
    if let Ok(root) = std::env::var(REFERENCE_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../reference")
}

pub fn countries_path() -> PathBuf {
    reference_root().join(COUNTRIES_FILE)
}

pub fn country_headers_path() -> PathBuf {
    reference_root().join(COUNTRY_HEADERS_FILE)
}

pub fn lane_id_headers_path() -> PathBuf {
    reference_root().join(LANE_ID_HEADERS_FILE)
}

pub fn oracle_prompt_path() -> PathBuf {
    reference_root().join(ORACLE_PROMPT_FILE)
}
