use std::collections::BTreeSet;
use std::fs;

use lane_model::VocabularyField;
use lane_standards::{
    StandardsError, load_default_country_headers, load_default_lane_id_headers,
    load_default_oracle_prompt, load_default_vocabulary, load_header_names, load_vocabulary,
};

#[test]
fn every_reference_entry_has_unique_two_letter_cca2() {
    let vocabulary = load_default_vocabulary().expect("load vocabulary");
    assert!(vocabulary.len() > 200);
    let mut seen = BTreeSet::new();
    for country in vocabulary.countries() {
        assert_eq!(country.cca2.chars().count(), 2, "{}", country.common_name);
        assert!(seen.insert(country.cca2.clone()), "duplicate {}", country.cca2);
    }
}

#[test]
fn loading_is_deterministic() {
    let first = load_default_vocabulary().expect("load vocabulary");
    let second = load_default_vocabulary().expect("load vocabulary");
    assert_eq!(first.countries(), second.countries());
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(first.fingerprint().len(), 64);
}

#[test]
fn singapore_is_both_common_name_and_capital() {
    let vocabulary = load_default_vocabulary().expect("load vocabulary");
    let common = vocabulary
        .find_owner(VocabularyField::CommonNames, "Singapore")
        .expect("common name");
    let capital = vocabulary
        .find_owner(VocabularyField::Capitals, "Singapore")
        .expect("capital");
    assert_eq!(common.cca2, "SG");
    assert_eq!(capital.cca2, "SG");
}

#[test]
fn default_header_vocabularies_load() {
    let country = load_default_country_headers().expect("country headers");
    assert!(country.iter().any(|h| h == "Country of Origin"));
    let lane = load_default_lane_id_headers().expect("lane id headers");
    assert!(lane.iter().any(|h| h == "Lane ID"));
    let prompt = load_default_oracle_prompt().expect("prompt");
    assert!(prompt.contains("null"));
}

#[test]
fn entry_without_cca2_is_a_load_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("countries.json");
    fs::write(
        &path,
        r#"[{"name":{"common":"Peru","official":"Republic of Peru"},"cca2":"PE","cca3":"PER"},
            {"name":{"common":"Chile"},"cca3":"CHL"}]"#,
    )
    .expect("write dataset");
    let err = load_vocabulary(&path).unwrap_err();
    assert!(matches!(
        err,
        StandardsError::MissingField {
            index: 1,
            field: "cca2",
            ..
        }
    ));
}

#[test]
fn missing_dataset_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_vocabulary(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, StandardsError::Io { .. }));
}

#[test]
fn official_name_falls_back_to_common() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("countries.json");
    fs::write(
        &path,
        r#"[{"name":{"common":"Chile"},"cca2":"CL","cca3":"CHL","capital":["Santiago"]}]"#,
    )
    .expect("write dataset");
    let vocabulary = load_vocabulary(&path).expect("load");
    let chile = vocabulary.by_cca2("CL").expect("chile");
    assert_eq!(chile.official_name, "Chile");
    assert!(chile.alt_spellings.is_empty());
}

#[test]
fn blank_header_vocabulary_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("headers.json");
    fs::write(&path, r#"["  ", ""]"#).expect("write headers");
    let err = load_header_names(&path).unwrap_err();
    assert!(matches!(err, StandardsError::EmptyVocabulary { .. }));
}

#[test]
fn header_vocabulary_drops_case_insensitive_repeats() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("headers.json");
    fs::write(&path, r#"["Country", " country ", "Pays"]"#).expect("write headers");
    let names = load_header_names(&path).expect("load");
    assert_eq!(names, vec!["Country", "Pays"]);
}
