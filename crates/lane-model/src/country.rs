//! Reference country records and the searchable fields projected from them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One entry of the reference vocabulary.
///
/// Loaded once at startup and never mutated. `cca2` is non-empty and unique
/// across the whole vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceCountry {
    /// Common English name (e.g. "Argentina").
    pub common_name: String,
    /// Official English name (e.g. "Argentine Republic").
    pub official_name: String,
    /// ISO 3166-1 alpha-2 code.
    pub cca2: String,
    /// ISO 3166-1 alpha-3 code.
    pub cca3: String,
    /// Capital cities, possibly empty.
    pub capitals: Vec<String>,
    /// Alternate spellings, abbreviations and native names.
    pub alt_spellings: Vec<String>,
}

impl ReferenceCountry {
    /// Returns the values this country contributes to a vocabulary field.
    pub fn values(&self, field: VocabularyField) -> Vec<&str> {
        match field {
            VocabularyField::CommonNames => vec![self.common_name.as_str()],
            VocabularyField::OfficialNames => vec![self.official_name.as_str()],
            VocabularyField::Cca2Codes => vec![self.cca2.as_str()],
            VocabularyField::Cca3Codes => vec![self.cca3.as_str()],
            VocabularyField::Capitals => self.capitals.iter().map(String::as_str).collect(),
            VocabularyField::AltSpellings => {
                self.alt_spellings.iter().map(String::as_str).collect()
            }
        }
    }

    /// True when `text` is one of this country's values for `field`.
    pub fn has_value(&self, field: VocabularyField, text: &str) -> bool {
        self.values(field).into_iter().any(|value| value == text)
    }
}

/// A named projection of the reference set onto one searchable attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VocabularyField {
    CommonNames,
    OfficialNames,
    Cca2Codes,
    Cca3Codes,
    Capitals,
    AltSpellings,
}

impl VocabularyField {
    /// All fields, in resolution precedence order.
    pub const ALL: [VocabularyField; 6] = [
        VocabularyField::CommonNames,
        VocabularyField::OfficialNames,
        VocabularyField::Cca2Codes,
        VocabularyField::Cca3Codes,
        VocabularyField::Capitals,
        VocabularyField::AltSpellings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CommonNames => "commonNames",
            Self::OfficialNames => "officialNames",
            Self::Cca2Codes => "cca2Codes",
            Self::Cca3Codes => "cca3Codes",
            Self::Capitals => "capitals",
            Self::AltSpellings => "altSpellings",
        }
    }
}

impl fmt::Display for VocabularyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
