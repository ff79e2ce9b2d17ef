#![deny(unsafe_code)]

//! Fuzzy matching over the reference vocabularies and header classification.

pub mod classifier;
pub mod error;
pub mod fuzzy;
pub mod utils;
pub mod vocabulary;

pub use classifier::ColumnClassifier;
pub use error::ClassifyError;
pub use fuzzy::{FuzzyIndex, FuzzyMatch, MIN_MATCH_SCORE};
pub use utils::normalize_text;
pub use vocabulary::VocabularyIndex;
