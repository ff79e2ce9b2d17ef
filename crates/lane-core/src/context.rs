use lane_map::VocabularyIndex;
use lane_standards::ReferenceVocabulary;

/// The reference vocabulary and its six field indices.
///
/// Built once per run and passed by reference; nothing in it changes after
/// construction.
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    vocabulary: ReferenceVocabulary,
    index: VocabularyIndex,
}

impl ResolutionContext {
    pub fn new(vocabulary: ReferenceVocabulary) -> Self {
        let index = VocabularyIndex::build(&vocabulary);
        Self { vocabulary, index }
    }

    pub fn vocabulary(&self) -> &ReferenceVocabulary {
        &self.vocabulary
    }

    pub fn index(&self) -> &VocabularyIndex {
        &self.index
    }
}
