//! Resolution outputs: match candidates, provenance and per-cell results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::country::VocabularyField;

/// A ranked fuzzy match against one vocabulary field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Similarity in [0, 1], 1.0 for an exact match.
    pub score: f64,
    /// The vocabulary entry as stored (original casing).
    pub matched_text: String,
    /// Field the entry belongs to.
    pub field: VocabularyField,
}

/// Provenance of a resolved country code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Source {
    Common,
    Official,
    Cca2,
    Cca3,
    Capital,
    AltSpelling,
    /// No fuzzy field cleared the threshold; the disambiguation oracle answered.
    Oracle,
}

impl Source {
    /// Every source, fuzzy fields first in precedence order.
    pub const ALL: [Source; 7] = [
        Source::Common,
        Source::Official,
        Source::Cca2,
        Source::Cca3,
        Source::Capital,
        Source::AltSpelling,
        Source::Oracle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Official => "official",
            Self::Cca2 => "cca2",
            Self::Cca3 => "cca3",
            Self::Capital => "capital",
            Self::AltSpelling => "altSpelling",
            Self::Oracle => "oracle",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving one (row, country column) cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    /// Value of the lane-id column for the row, used to join columns back together.
    pub lane_id: String,
    /// Header of the country column the value came from.
    pub column_name: String,
    /// The cell value, trimmed but otherwise untouched.
    pub initial_data: String,
    /// Vocabulary text that matched; `None` for oracle answers and misses.
    pub correspondance: Option<String>,
    /// Common name of the resolved country.
    pub guessed_country: Option<String>,
    /// Resolved ISO 3166-1 alpha-2 code.
    pub guessed_country_code: Option<String>,
    pub source: Option<Source>,
}

impl ResolutionResult {
    /// A result carrying no guess. Used for blank cells and resolution misses.
    pub fn unresolved(
        lane_id: impl Into<String>,
        column_name: impl Into<String>,
        initial_data: impl Into<String>,
    ) -> Self {
        Self {
            lane_id: lane_id.into(),
            column_name: column_name.into(),
            initial_data: initial_data.into(),
            correspondance: None,
            guessed_country: None,
            guessed_country_code: None,
            source: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.guessed_country_code.is_some()
    }
}
