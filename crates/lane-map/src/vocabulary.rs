//! One fuzzy index per reference vocabulary field.

use std::collections::BTreeMap;

use lane_model::{MatchCandidate, VocabularyField};
use lane_standards::ReferenceVocabulary;

use crate::fuzzy::FuzzyIndex;

/// The six per-field indices over a reference vocabulary.
#[derive(Debug, Clone)]
pub struct VocabularyIndex {
    indices: BTreeMap<VocabularyField, FuzzyIndex>,
}

impl VocabularyIndex {
    pub fn build(vocabulary: &ReferenceVocabulary) -> Self {
        let indices = VocabularyField::ALL
            .into_iter()
            .map(|field| (field, FuzzyIndex::new(vocabulary.field_values(field))))
            .collect();
        Self { indices }
    }

    /// Ranked candidates for `input` in one field, best first.
    pub fn query(&self, field: VocabularyField, input: &str) -> Vec<MatchCandidate> {
        let Some(index) = self.indices.get(&field) else {
            return Vec::new();
        };
        index
            .query(input)
            .into_iter()
            .map(|m| MatchCandidate {
                score: m.score,
                matched_text: m.text,
                field,
            })
            .collect()
    }

    /// Highest-ranked candidate in one field.
    pub fn best(&self, field: VocabularyField, input: &str) -> Option<MatchCandidate> {
        self.query(field, input).into_iter().next()
    }
}
