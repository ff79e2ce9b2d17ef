//! The reference country vocabulary and its dataset loader.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use lane_model::{ReferenceCountry, VocabularyField};

use crate::error::{Result, StandardsError};
use crate::hash::sha256_hex;

/// Label used in errors for vocabularies built in memory.
const INLINE_ORIGIN: &str = "<inline>";

/// Read-only set of reference countries, indexed by cca2.
///
/// Built once at startup. Entry order follows the dataset, which keeps
/// every derived lookup deterministic.
#[derive(Debug, Clone)]
pub struct ReferenceVocabulary {
    countries: Vec<ReferenceCountry>,
    by_cca2: BTreeMap<String, usize>,
    fingerprint: String,
}

impl ReferenceVocabulary {
    /// Builds a vocabulary from already-parsed countries.
    ///
    /// Applies the same validation as [`load_vocabulary`]; the fingerprint
    /// is computed over the JSON rendering of the entries.
    pub fn from_countries(countries: Vec<ReferenceCountry>) -> Result<Self> {
        let origin = Path::new(INLINE_ORIGIN);
        let bytes = serde_json::to_vec(&countries).map_err(|e| StandardsError::json(origin, e))?;
        Self::build(countries, origin, sha256_hex(&bytes))
    }

    fn build(countries: Vec<ReferenceCountry>, origin: &Path, fingerprint: String) -> Result<Self> {
        if countries.is_empty() {
            return Err(StandardsError::EmptyVocabulary {
                path: origin.to_path_buf(),
            });
        }
        let mut by_cca2 = BTreeMap::new();
        let mut cca3_seen = BTreeSet::new();
        for (index, country) in countries.iter().enumerate() {
            check_code(origin, index, "cca2", &country.cca2, 2)?;
            check_code(origin, index, "cca3", &country.cca3, 3)?;
            if by_cca2.insert(country.cca2.clone(), index).is_some() {
                return Err(StandardsError::DuplicateCode {
                    path: origin.to_path_buf(),
                    field: "cca2",
                    code: country.cca2.clone(),
                });
            }
            if !cca3_seen.insert(country.cca3.as_str()) {
                return Err(StandardsError::DuplicateCode {
                    path: origin.to_path_buf(),
                    field: "cca3",
                    code: country.cca3.clone(),
                });
            }
        }
        Ok(Self {
            countries,
            by_cca2,
            fingerprint,
        })
    }

    pub fn countries(&self) -> &[ReferenceCountry] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// SHA-256 (hex) of the dataset the vocabulary was loaded from.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn by_cca2(&self, code: &str) -> Option<&ReferenceCountry> {
        self.by_cca2.get(code).map(|&index| &self.countries[index])
    }

    pub fn contains_cca2(&self, code: &str) -> bool {
        self.by_cca2.contains_key(code)
    }

    /// All cca2 codes in dataset order.
    pub fn cca2_codes(&self) -> impl Iterator<Item = &str> {
        self.countries.iter().map(|country| country.cca2.as_str())
    }

    /// Every value of `field` across the vocabulary, in dataset order.
    pub fn field_values(&self, field: VocabularyField) -> Vec<&str> {
        self.countries
            .iter()
            .flat_map(|country| country.values(field))
            .collect()
    }

    /// First country (dataset order) holding `text` verbatim in `field`.
    pub fn find_owner(&self, field: VocabularyField, text: &str) -> Option<&ReferenceCountry> {
        self.countries
            .iter()
            .find(|country| country.has_value(field, text))
    }
}

fn check_code(
    origin: &Path,
    index: usize,
    field: &'static str,
    code: &str,
    len: usize,
) -> Result<()> {
    if code.len() == len && code.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(StandardsError::InvalidCode {
            path: origin.to_path_buf(),
            index,
            field,
            code: code.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawCountry {
    #[serde(default)]
    name: RawName,
    cca2: Option<String>,
    cca3: Option<String>,
    #[serde(default)]
    capital: Vec<String>,
    #[serde(default, rename = "altSpellings")]
    alt_spellings: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawName {
    common: Option<String>,
    official: Option<String>,
}

/// Loads the country dataset at `path`.
///
/// The file is a JSON array of `{name: {common, official}, cca2, cca3,
/// capital: [..], altSpellings: [..]}` objects. A missing official name falls
/// back to the common name; capitals and alternate spellings are trimmed and
/// de-duplicated in order.
pub fn load_vocabulary(path: &Path) -> Result<ReferenceVocabulary> {
    let bytes = std::fs::read(path).map_err(|e| StandardsError::io(path, e))?;
    let raw: Vec<RawCountry> =
        serde_json::from_slice(&bytes).map_err(|e| StandardsError::json(path, e))?;
    let mut countries = Vec::with_capacity(raw.len());
    for (index, entry) in raw.into_iter().enumerate() {
        countries.push(convert(path, index, entry)?);
    }
    let fingerprint = sha256_hex(&bytes);
    let vocabulary = ReferenceVocabulary::build(countries, path, fingerprint)?;
    debug!(
        path = %path.display(),
        countries = vocabulary.len(),
        fingerprint = %vocabulary.fingerprint(),
        "loaded reference vocabulary"
    );
    Ok(vocabulary)
}

fn convert(path: &Path, index: usize, raw: RawCountry) -> Result<ReferenceCountry> {
    let missing = |field| StandardsError::MissingField {
        path: path.to_path_buf(),
        index,
        field,
    };
    let common_name = non_blank(raw.name.common).ok_or_else(|| missing("name.common"))?;
    let official_name = non_blank(raw.name.official).unwrap_or_else(|| common_name.clone());
    let cca2 = non_blank(raw.cca2).ok_or_else(|| missing("cca2"))?;
    let cca3 = non_blank(raw.cca3).ok_or_else(|| missing("cca3"))?;
    Ok(ReferenceCountry {
        common_name,
        official_name,
        cca2,
        cca3,
        capitals: dedup_trimmed(raw.capital),
        alt_spellings: dedup_trimmed(raw.alt_spellings),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn dedup_trimmed(values: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for value in values {
        let value = value.trim().to_string();
        if !value.is_empty() && seen.insert(value.clone()) {
            out.push(value);
        }
    }
    out
}
