//! Error types for column classification.

use lane_model::ColumnClassification;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifyError {
    /// No header scored at or above the lane-id threshold. Carries the
    /// closest header, if any, for the user-facing message.
    #[error("no lane id column found{}", best_hint(.best.as_ref()))]
    NoLaneIdColumnFound { best: Option<ColumnClassification> },

    #[error("the sheet has no header columns")]
    NoColumns,
}

fn best_hint(best: Option<&ColumnClassification>) -> String {
    match best {
        Some(best) => format!(
            " (closest header {:?} scored {:.2})",
            best.column_name, best.best_probability_result
        ),
        None => String::new(),
    }
}
