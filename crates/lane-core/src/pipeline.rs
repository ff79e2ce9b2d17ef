//! Per-cell resolution: fuzzy cascade, oracle fallback, projection to cca2.

use std::collections::BTreeMap;
use std::thread;

use tracing::{debug, info, info_span};

use lane_map::normalize_text;
use lane_model::{
    ColumnClassification, MatchCandidate, ResolutionOptions, ResolutionResult, SheetTable, Source,
    VocabularyField,
};
use lane_oracle::DisambiguationOracle;

use crate::context::ResolutionContext;
use crate::error::{PipelineError, Result};
use crate::projection::project;

/// Fuzzy fields in precedence order; the first to clear the threshold wins.
pub const CASCADE: [(VocabularyField, Source); 6] = [
    (VocabularyField::CommonNames, Source::Common),
    (VocabularyField::OfficialNames, Source::Official),
    (VocabularyField::Cca2Codes, Source::Cca2),
    (VocabularyField::Cca3Codes, Source::Cca3),
    (VocabularyField::Capitals, Source::Capital),
    (VocabularyField::AltSpellings, Source::AltSpelling),
];

const REDACTED: &str = "<redacted>";

/// Progress after each resolved cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

/// Counters for one country column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnStats {
    pub rows: usize,
    pub blank: usize,
    pub unresolved: usize,
    pub oracle_calls: usize,
    pub by_source: BTreeMap<Source, usize>,
}

impl ColumnStats {
    fn record(&mut self, result: &ResolutionResult) {
        self.rows += 1;
        match result.source {
            Some(source) => *self.by_source.entry(source).or_default() += 1,
            None if result.initial_data.is_empty() => self.blank += 1,
            None => self.unresolved += 1,
        }
    }

    pub fn resolved(&self) -> usize {
        self.by_source.values().sum()
    }
}

/// Resolves country cells against a [`ResolutionContext`].
///
/// Rows are processed strictly in order; the only blocking points are the
/// oracle call and the pacing delay after it.
pub struct ResolutionPipeline<'a> {
    context: &'a ResolutionContext,
    oracle: Option<&'a dyn DisambiguationOracle>,
    options: ResolutionOptions,
    log_values: bool,
    stats: Vec<(String, ColumnStats)>,
}

impl<'a> ResolutionPipeline<'a> {
    pub fn new(context: &'a ResolutionContext, options: ResolutionOptions) -> Self {
        Self {
            context,
            oracle: None,
            options,
            log_values: false,
            stats: Vec::new(),
        }
    }

    /// Consulted for values no fuzzy field matched, unless disabled in the
    /// options.
    pub fn with_oracle(mut self, oracle: &'a dyn DisambiguationOracle) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Includes raw cell values in debug events.
    pub fn with_value_logging(mut self, enabled: bool) -> Self {
        self.log_values = enabled;
        self
    }

    /// Per-column counters, in the order columns were resolved.
    pub fn stats(&self) -> &[(String, ColumnStats)] {
        &self.stats
    }

    /// Highest-precedence fuzzy match clearing the threshold.
    ///
    /// cca2 codes are only tried for two-character input.
    pub fn fuzzy_lookup(&self, normalized: &str) -> Option<(Source, MatchCandidate)> {
        let index = self.context.index();
        CASCADE
            .iter()
            .filter(|(field, _)| {
                *field != VocabularyField::Cca2Codes || normalized.chars().count() == 2
            })
            .find_map(|&(field, source)| {
                index
                    .best(field, normalized)
                    .filter(|candidate| candidate.score >= self.options.fuzzy_threshold)
                    .map(|candidate| (source, candidate))
            })
    }

    /// Resolves one cell value.
    pub fn resolve_value(
        &mut self,
        lane_id: &str,
        column_name: &str,
        raw: &str,
    ) -> Result<ResolutionResult> {
        let initial = raw.trim();
        let unresolved = || ResolutionResult::unresolved(lane_id, column_name, initial);
        if initial.is_empty() {
            self.record(column_name, &unresolved(), false);
            return Ok(unresolved());
        }
        let normalized = normalize_text(initial);

        let (source, text, correspondance, oracle_called) = match self.fuzzy_lookup(&normalized) {
            Some((source, candidate)) => {
                let text = candidate.matched_text;
                (source, text.clone(), Some(text), false)
            }
            None => match self.ask_oracle(lane_id, column_name, &normalized)? {
                (Some(code), called) => (Source::Oracle, code, None, called),
                (None, called) => {
                    let result = unresolved();
                    self.trace(lane_id, initial, &result);
                    self.record(column_name, &result, called);
                    return Ok(result);
                }
            },
        };

        let result = match project(self.context.vocabulary(), source, &text) {
            Some(country) => ResolutionResult {
                lane_id: lane_id.to_string(),
                column_name: column_name.to_string(),
                initial_data: initial.to_string(),
                correspondance,
                guessed_country: Some(country.common_name.clone()),
                guessed_country_code: Some(country.cca2.clone()),
                source: Some(source),
            },
            None => unresolved(),
        };
        self.trace(lane_id, initial, &result);
        self.record(column_name, &result, oracle_called);
        Ok(result)
    }

    /// One result per table row for `column`, in row order.
    pub fn resolve_column(
        &mut self,
        table: &SheetTable,
        column: &ColumnClassification,
        lane_id_column: &ColumnClassification,
    ) -> Result<Vec<ResolutionResult>> {
        self.resolve_column_with_progress(table, column, lane_id_column, &mut |_| {})
    }

    /// Resolves every column in turn into one flat sequence.
    pub fn resolve_columns(
        &mut self,
        table: &SheetTable,
        columns: &[ColumnClassification],
        lane_id_column: &ColumnClassification,
        mut on_progress: impl FnMut(Progress),
    ) -> Result<Vec<ResolutionResult>> {
        let total = table.row_count() * columns.len();
        let mut done = 0;
        let mut results = Vec::with_capacity(total);
        for column in columns {
            let mut report = |_: Progress| {
                done += 1;
                on_progress(Progress { done, total });
            };
            results.extend(self.resolve_column_with_progress(
                table,
                column,
                lane_id_column,
                &mut report,
            )?);
        }
        Ok(results)
    }

    fn resolve_column_with_progress(
        &mut self,
        table: &SheetTable,
        column: &ColumnClassification,
        lane_id_column: &ColumnClassification,
        on_progress: &mut dyn FnMut(Progress),
    ) -> Result<Vec<ResolutionResult>> {
        check_column(table, column)?;
        check_column(table, lane_id_column)?;
        let span = info_span!("resolve", column = %column.column_name);
        let _guard = span.enter();

        let total = table.row_count();
        let mut results = Vec::with_capacity(total);
        for row in 0..total {
            let lane_id = table.value(row, lane_id_column.column_index).trim();
            let raw = table.value(row, column.column_index);
            results.push(self.resolve_value(lane_id, &column.column_name, raw)?);
            on_progress(Progress {
                done: row + 1,
                total,
            });
        }

        if let Some((_, stats)) = self.stats.iter().find(|(name, _)| *name == column.column_name) {
            info!(
                rows = stats.rows,
                resolved = stats.resolved(),
                unresolved = stats.unresolved,
                blank = stats.blank,
                oracle_calls = stats.oracle_calls,
                by_source = ?stats.by_source,
                "column resolved"
            );
        }
        Ok(results)
    }

    /// Returns the validated code and whether a call was made.
    fn ask_oracle(
        &self,
        lane_id: &str,
        column_name: &str,
        normalized: &str,
    ) -> Result<(Option<String>, bool)> {
        let Some(oracle) = self.oracle.filter(|_| self.options.oracle_enabled) else {
            return Ok((None, false));
        };
        let outcome = oracle.resolve(normalized);
        if !self.options.oracle_pacing.is_zero() {
            thread::sleep(self.options.oracle_pacing);
        }
        outcome
            .map(|code| (code, true))
            .map_err(|source| PipelineError::Oracle {
                lane_id: lane_id.to_string(),
                column: column_name.to_string(),
                value: normalized.to_string(),
                source,
            })
    }

    fn record(&mut self, column_name: &str, result: &ResolutionResult, oracle_called: bool) {
        let position = match self.stats.iter().position(|(name, _)| name == column_name) {
            Some(position) => position,
            None => {
                self.stats.push((column_name.to_string(), ColumnStats::default()));
                self.stats.len() - 1
            }
        };
        let stats = &mut self.stats[position].1;
        stats.record(result);
        if oracle_called {
            stats.oracle_calls += 1;
        }
    }

    fn trace(&self, lane_id: &str, initial: &str, result: &ResolutionResult) {
        let value = if self.log_values { initial } else { REDACTED };
        debug!(
            lane_id = %lane_id,
            value = %value,
            source = ?result.source,
            code = result.guessed_country_code.as_deref().unwrap_or("-"),
            "cell resolved"
        );
    }
}

fn check_column(table: &SheetTable, column: &ColumnClassification) -> Result<()> {
    if column.column_index < table.headers.len() {
        Ok(())
    } else {
        Err(PipelineError::ColumnOutOfRange {
            column: column.column_name.clone(),
            index: column.column_index,
        })
    }
}
