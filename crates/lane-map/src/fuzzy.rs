//! Approximate string matching over a fixed set of strings.
//!
//! Candidates are gathered by cosine similarity of character n-gram counts
//! (trigrams first, bigrams when no trigram is shared), the best of them are
//! re-ranked by normalized Levenshtein similarity and weak matches dropped.
//! An exact case-insensitive hit short-circuits with a score of 1.0.

use std::collections::{BTreeMap, HashMap};

use rapidfuzz::distance::levenshtein;

use crate::utils::{gram_alphabet, normalize_text};

const GRAM_SIZE_LOWER: usize = 2;
const GRAM_SIZE_UPPER: usize = 3;
/// Candidates below this score are never returned.
pub const MIN_MATCH_SCORE: f64 = 0.33;
/// Number of cosine-ranked candidates re-scored with Levenshtein.
const RESCORE_POOL: usize = 50;
const PAD: char = '-';

/// One ranked match.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    /// Similarity in [0, 1].
    pub score: f64,
    /// The indexed string, original casing.
    pub text: String,
}

#[derive(Debug, Clone, Default)]
struct GramTable {
    /// (vector norm, normalized value) per indexed entry.
    items: Vec<(f64, String)>,
    /// gram -> (item index, gram count in that item)
    postings: HashMap<String, Vec<(usize, usize)>>,
}

/// Immutable fuzzy index built once from a list of strings.
///
/// Values equal after trimming and lowercasing are indexed once; the first
/// spelling wins.
#[derive(Debug, Clone, Default)]
pub struct FuzzyIndex {
    exact: HashMap<String, String>,
    tables: BTreeMap<usize, GramTable>,
}

impl FuzzyIndex {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::default();
        for gram_size in GRAM_SIZE_LOWER..=GRAM_SIZE_UPPER {
            index.tables.insert(gram_size, GramTable::default());
        }
        for value in values {
            index.add(value.as_ref());
        }
        index
    }

    fn add(&mut self, value: &str) {
        let normalized = normalize_text(value);
        if normalized.is_empty() || self.exact.contains_key(&normalized) {
            return;
        }
        for (&gram_size, table) in &mut self.tables {
            let counts = gram_counts(&normalized, gram_size);
            let norm = vector_norm(&counts);
            let item = table.items.len();
            table.items.push((norm, normalized.clone()));
            for (gram, count) in counts {
                table.postings.entry(gram).or_default().push((item, count));
            }
        }
        self.exact.insert(normalized, value.to_string());
    }

    /// Number of distinct (case-insensitive) values indexed.
    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }

    /// Ranked matches for `input`, best first.
    ///
    /// The input is trimmed and lowercased. Blank input yields no matches.
    /// Equal scores keep insertion order.
    pub fn query(&self, input: &str) -> Vec<FuzzyMatch> {
        let normalized = normalize_text(input);
        if normalized.is_empty() {
            return Vec::new();
        }
        if let Some(text) = self.exact.get(&normalized) {
            return vec![FuzzyMatch {
                score: 1.0,
                text: text.clone(),
            }];
        }
        for gram_size in (GRAM_SIZE_LOWER..=GRAM_SIZE_UPPER).rev() {
            let matches = self.query_grams(&normalized, gram_size);
            if !matches.is_empty() {
                return matches;
            }
        }
        Vec::new()
    }

    fn query_grams(&self, normalized: &str, gram_size: usize) -> Vec<FuzzyMatch> {
        let Some(table) = self.tables.get(&gram_size) else {
            return Vec::new();
        };
        let counts = gram_counts(normalized, gram_size);
        let mut dots: BTreeMap<usize, usize> = BTreeMap::new();
        for (gram, count) in &counts {
            if let Some(postings) = table.postings.get(gram) {
                for &(item, other) in postings {
                    *dots.entry(item).or_default() += count * other;
                }
            }
        }
        if dots.is_empty() {
            return Vec::new();
        }
        let norm = vector_norm(&counts);
        let mut cosine: Vec<(f64, &str)> = dots
            .into_iter()
            .map(|(item, dot)| {
                let (item_norm, value) = &table.items[item];
                (dot as f64 / (norm * item_norm), value.as_str())
            })
            .collect();
        sort_descending(&mut cosine);
        cosine.truncate(RESCORE_POOL);

        let mut rescored: Vec<(f64, &str)> = cosine
            .into_iter()
            .map(|(_, value)| {
                let score = levenshtein::normalized_similarity(value.chars(), normalized.chars());
                (score, value)
            })
            .collect();
        sort_descending(&mut rescored);

        rescored
            .into_iter()
            .filter(|(score, _)| *score >= MIN_MATCH_SCORE)
            .filter_map(|(score, value)| {
                self.exact.get(value).map(|text| FuzzyMatch {
                    score,
                    text: text.clone(),
                })
            })
            .collect()
    }
}

/// Stable sort, highest score first.
fn sort_descending(scored: &mut [(f64, &str)]) {
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
}

fn gram_counts(normalized: &str, gram_size: usize) -> BTreeMap<String, usize> {
    let mut padded: Vec<char> = Vec::new();
    padded.push(PAD);
    padded.extend(gram_alphabet(normalized).chars());
    padded.push(PAD);
    while padded.len() < gram_size {
        padded.push(PAD);
    }
    let mut counts = BTreeMap::new();
    for window in padded.windows(gram_size) {
        *counts.entry(window.iter().collect::<String>()).or_default() += 1;
    }
    counts
}

fn vector_norm(counts: &BTreeMap<String, usize>) -> f64 {
    let sum: usize = counts.values().map(|count| count * count).sum();
    (sum as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countries() -> FuzzyIndex {
        FuzzyIndex::new([
            "Argentina",
            "Japan",
            "Malaysia",
            "Mali",
            "Hong Kong",
            "United States",
            "South Korea",
        ])
    }

    #[test]
    fn exact_match_ignores_case_and_whitespace() {
        let matches = countries().query("  ARGENTINA ");
        assert_eq!(
            matches,
            vec![FuzzyMatch {
                score: 1.0,
                text: "Argentina".to_string()
            }]
        );
    }

    #[test]
    fn blank_query_has_no_matches() {
        assert!(countries().query("").is_empty());
        assert!(countries().query("   ").is_empty());
    }

    #[test]
    fn misspellings_rank_closest_first() {
        let matches = countries().query("Malsia");
        assert_eq!(matches[0].text, "Malaysia");
        assert!((matches[0].score - 0.75).abs() < 1e-9);

        let matches = countries().query("Hongkong");
        assert_eq!(matches[0].text, "Hong Kong");
        assert!(matches[0].score > 0.85);
    }

    #[test]
    fn weak_matches_are_dropped() {
        let matches = countries().query("qxz");
        assert!(matches.iter().all(|m| m.score >= MIN_MATCH_SCORE));
    }

    #[test]
    fn first_spelling_wins_on_case_duplicates() {
        let index = FuzzyIndex::new(["PE", "pe", "Peru"]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.query("pe")[0].text, "PE");
    }

    #[test]
    fn grams_are_padded() {
        let counts = gram_counts("a", 3);
        assert_eq!(counts.keys().collect::<Vec<_>>(), vec!["-a-"]);
        let counts = gram_counts("", 3);
        assert_eq!(counts.keys().collect::<Vec<_>>(), vec!["---"]);
        let counts = gram_counts("jp", 2);
        assert_eq!(counts.keys().collect::<Vec<_>>(), vec!["-j", "jp", "p-"]);
    }
}
