#![deny(unsafe_code)]

pub mod classification;
pub mod country;
pub mod options;
pub mod resolution;
pub mod table;

pub use classification::ColumnClassification;
pub use country::{ReferenceCountry, VocabularyField};
pub use options::{
    ClassifierOptions, DEFAULT_COUNTRY_COLUMN_THRESHOLD, DEFAULT_FUZZY_THRESHOLD,
    DEFAULT_LANE_ID_THRESHOLD, DEFAULT_ORACLE_PACING_MS, ResolutionOptions,
};
pub use resolution::{MatchCandidate, ResolutionResult, Source};
pub use table::SheetTable;
