use serde::{Deserialize, Serialize};

/// How strongly one header looks like a column of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnClassification {
    /// Position of the header in the sheet's header list.
    pub column_index: usize,
    pub column_name: String,
    /// Best fuzzy score of the header against the header vocabulary, in [0, 1].
    pub best_probability_result: f64,
}
