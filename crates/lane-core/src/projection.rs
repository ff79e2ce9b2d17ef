//! Mapping a winning match back to its country.

use lane_model::{ReferenceCountry, Source, VocabularyField};
use lane_standards::ReferenceVocabulary;

/// How a source's matched text leads to a country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Projection {
    /// The country holding the text in this field.
    OwnerOf(VocabularyField),
    /// The text is the cca2 code itself.
    Code,
}

const PROJECTIONS: [(Source, Projection); 7] = [
    (Source::Common, Projection::OwnerOf(VocabularyField::CommonNames)),
    (Source::Official, Projection::OwnerOf(VocabularyField::OfficialNames)),
    (Source::Cca2, Projection::Code),
    (Source::Cca3, Projection::OwnerOf(VocabularyField::Cca3Codes)),
    (Source::Capital, Projection::OwnerOf(VocabularyField::Capitals)),
    (Source::AltSpelling, Projection::OwnerOf(VocabularyField::AltSpellings)),
    (Source::Oracle, Projection::Code),
];

/// The country `text` designates under `source`, `None` when the vocabulary
/// holds no such country.
pub fn project<'v>(
    vocabulary: &'v ReferenceVocabulary,
    source: Source,
    text: &str,
) -> Option<&'v ReferenceCountry> {
    let projection = PROJECTIONS
        .iter()
        .find(|(candidate, _)| *candidate == source)
        .map(|(_, projection)| *projection)?;
    match projection {
        Projection::OwnerOf(field) => vocabulary.find_owner(field, text),
        Projection::Code => vocabulary.by_cca2(text),
    }
}
