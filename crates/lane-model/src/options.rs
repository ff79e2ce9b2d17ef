//! Tunable thresholds and pacing for classification and resolution.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Minimum top-candidate score for a vocabulary field to win.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.7;
/// Score a header needs to count as one of several country columns.
pub const DEFAULT_COUNTRY_COLUMN_THRESHOLD: f64 = 0.9;
/// Score a header needs to be accepted as the lane-id column.
pub const DEFAULT_LANE_ID_THRESHOLD: f64 = 0.9;
/// Delay after every oracle call, in milliseconds.
pub const DEFAULT_ORACLE_PACING_MS: u64 = 100;

/// Options for the column classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierOptions {
    pub country_threshold: f64,
    pub lane_id_threshold: f64,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            country_threshold: DEFAULT_COUNTRY_COLUMN_THRESHOLD,
            lane_id_threshold: DEFAULT_LANE_ID_THRESHOLD,
        }
    }
}

/// Options controlling the resolution pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionOptions {
    /// Same threshold for every vocabulary field.
    pub fuzzy_threshold: f64,
    /// When false, fuzzy misses stay unresolved without calling the oracle.
    pub oracle_enabled: bool,
    /// Pause after each oracle call to stay under the provider's rate limit.
    pub oracle_pacing: Duration,
}

impl Default for ResolutionOptions {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            oracle_enabled: true,
            oracle_pacing: Duration::from_millis(DEFAULT_ORACLE_PACING_MS),
        }
    }
}

impl ResolutionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    pub fn with_oracle(mut self, enabled: bool) -> Self {
        self.oracle_enabled = enabled;
        self
    }

    pub fn with_oracle_pacing(mut self, pacing: Duration) -> Self {
        self.oracle_pacing = pacing;
        self
    }
}
