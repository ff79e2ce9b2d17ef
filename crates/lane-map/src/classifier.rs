//! Picks the country columns and the lane-id column from a header row.

use tracing::{debug, info};

use lane_model::{ClassifierOptions, ColumnClassification};

use crate::error::ClassifyError;
use crate::fuzzy::FuzzyIndex;

/// Scores headers against the country and lane-id header vocabularies.
#[derive(Debug, Clone)]
pub struct ColumnClassifier {
    country_headers: FuzzyIndex,
    lane_id_headers: FuzzyIndex,
    options: ClassifierOptions,
}

impl ColumnClassifier {
    pub fn new<S: AsRef<str>>(
        country_headers: &[S],
        lane_id_headers: &[S],
        options: ClassifierOptions,
    ) -> Self {
        Self {
            country_headers: FuzzyIndex::new(country_headers),
            lane_id_headers: FuzzyIndex::new(lane_id_headers),
            options,
        }
    }

    /// Country columns for a header row, never empty.
    ///
    /// When two or more headers clear the country threshold all of them are
    /// returned in header order. Otherwise the single best-scoring header is
    /// returned, however low its score.
    pub fn classify_country_columns<S: AsRef<str>>(
        &self,
        headers: &[S],
    ) -> Result<Vec<ColumnClassification>, ClassifyError> {
        let scored = score_headers(&self.country_headers, headers);
        let threshold = self.options.country_threshold;
        let strong: Vec<ColumnClassification> = scored
            .iter()
            .filter(|c| c.best_probability_result >= threshold)
            .cloned()
            .collect();
        if strong.len() >= 2 {
            info!(
                columns = ?strong.iter().map(|c| c.column_name.as_str()).collect::<Vec<_>>(),
                "multiple country columns identified"
            );
            return Ok(strong);
        }
        let best = best_of(scored).ok_or(ClassifyError::NoColumns)?;
        info!(
            column = %best.column_name,
            score = best.best_probability_result,
            "single country column identified"
        );
        Ok(vec![best])
    }

    /// The lane-id column: the best-scoring header, provided it clears the
    /// lane-id threshold.
    pub fn classify_lane_id_column<S: AsRef<str>>(
        &self,
        headers: &[S],
    ) -> Result<ColumnClassification, ClassifyError> {
        let scored = score_headers(&self.lane_id_headers, headers);
        let best = best_of(scored).ok_or(ClassifyError::NoColumns)?;
        if best.best_probability_result < self.options.lane_id_threshold {
            return Err(ClassifyError::NoLaneIdColumnFound { best: Some(best) });
        }
        info!(column = %best.column_name, score = best.best_probability_result, "lane id column selected");
        Ok(best)
    }
}

fn score_headers<S: AsRef<str>>(vocabulary: &FuzzyIndex, headers: &[S]) -> Vec<ColumnClassification> {
    headers
        .iter()
        .enumerate()
        .map(|(column_index, header)| {
            let header = header.as_ref();
            let score = vocabulary
                .query(header)
                .first()
                .map_or(0.0, |m| m.score);
            debug!(column = header, score, "header scored");
            ColumnClassification {
                column_index,
                column_name: header.to_string(),
                best_probability_result: score,
            }
        })
        .collect()
}

/// Highest score; the earliest header wins ties.
fn best_of(scored: Vec<ColumnClassification>) -> Option<ColumnClassification> {
    scored.into_iter().reduce(|best, candidate| {
        if candidate.best_probability_result > best.best_probability_result {
            candidate
        } else {
            best
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> ColumnClassifier {
        ColumnClassifier::new(
            &["Country", "Country of Origin", "Dest Country", "Pays"],
            &["Lane ID", "Lane", "Lane Number"],
            ClassifierOptions::default(),
        )
    }

    #[test]
    fn low_scores_still_yield_the_best_header() {
        let columns = classifier()
            .classify_country_columns(&["Ref", "Weight", "Ctry"])
            .expect("classify");
        assert_eq!(columns.len(), 1);
        assert!(columns[0].best_probability_result < 0.9);
    }

    #[test]
    fn ties_go_to_the_first_header() {
        let column = classifier()
            .classify_lane_id_column(&["Weight", "Lane", "lane"])
            .expect("classify");
        assert_eq!(column.column_index, 1);
        assert_eq!(column.column_name, "Lane");
    }

    #[test]
    fn single_strong_header_is_returned_alone() {
        let columns = classifier()
            .classify_country_columns(&["Lane ID", "country", "Weight"])
            .expect("classify");
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].column_name, "country");
        assert_eq!(columns[0].column_index, 1);
        assert_eq!(columns[0].best_probability_result, 1.0);
    }

    #[test]
    fn empty_header_row_is_an_error() {
        let headers: [&str; 0] = [];
        assert_eq!(
            classifier().classify_country_columns(&headers),
            Err(ClassifyError::NoColumns)
        );
    }

    #[test]
    fn missing_lane_id_column_is_reported_with_closest_header() {
        let err = classifier()
            .classify_lane_id_column(&["Country", "Weight"])
            .unwrap_err();
        match err {
            ClassifyError::NoLaneIdColumnFound { best } => {
                assert!(best.is_some_and(|b| b.best_probability_result < 0.9));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
