//! Flat resolution results regrouped into one output row per lane.

use std::collections::{HashMap, HashSet};

use lane_model::{ResolutionResult, Source};

/// Header of the leading column.
pub const LANE_ID_HEADER: &str = "Lane ID";

/// One country column's share of an output row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputCell {
    pub initial_data: String,
    pub code: Option<String>,
    pub source: Option<Source>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub lane_id: String,
    /// One cell per country column, in [`OutputTable::columns`] order.
    pub cells: Vec<OutputCell>,
}

/// Results laid out as `Lane ID` followed by (original, clean, source) per
/// country column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTable {
    pub columns: Vec<String>,
    pub rows: Vec<OutputRow>,
}

impl OutputTable {
    /// Groups results by column and lane id.
    ///
    /// Columns and rows keep first-seen order. A lane id repeated within a
    /// column pairs its n-th occurrence with the n-th occurrence in the other
    /// columns.
    pub fn from_results(results: &[ResolutionResult]) -> Self {
        let mut table = Self::default();
        let mut column_positions: HashMap<&str, usize> = HashMap::new();
        let mut row_positions: HashMap<(&str, usize), usize> = HashMap::new();
        let mut seen: HashMap<(&str, &str), usize> = HashMap::new();

        for result in results {
            let column = *column_positions
                .entry(result.column_name.as_str())
                .or_insert_with(|| {
                    table.columns.push(result.column_name.clone());
                    table.columns.len() - 1
                });
            let occurrence = seen
                .entry((result.column_name.as_str(), result.lane_id.as_str()))
                .or_default();
            let key = (result.lane_id.as_str(), *occurrence);
            *occurrence += 1;

            let row = *row_positions.entry(key).or_insert_with(|| {
                table.rows.push(OutputRow {
                    lane_id: result.lane_id.clone(),
                    cells: Vec::new(),
                });
                table.rows.len() - 1
            });
            let cells = &mut table.rows[row].cells;
            if cells.len() <= column {
                cells.resize(column + 1, OutputCell::default());
            }
            cells[column] = OutputCell {
                initial_data: result.initial_data.clone(),
                code: result.guessed_country_code.clone(),
                source: result.source,
            };
        }

        let width = table.columns.len();
        for row in &mut table.rows {
            row.cells.resize(width, OutputCell::default());
        }
        table
    }

    /// Header row: `Lane ID`, then `<name>`, `Clean - <name>`,
    /// `Source - <name>` per country column.
    ///
    /// Headers are unique ignoring case, as spreadsheet tables require; a
    /// repeat gets a `_1`, `_2`, ... suffix.
    pub fn headers(&self) -> Vec<String> {
        let mut headers = UniqueHeaders::with_capacity(1 + self.columns.len() * 3);
        headers.push(LANE_ID_HEADER.to_string());
        for name in &self.columns {
            headers.push(name.clone());
            headers.push(format!("Clean - {name}"));
            headers.push(format!("Source - {name}"));
        }
        headers.names
    }

    /// A row as strings, aligned with [`Self::headers`].
    pub fn record(&self, row: &OutputRow) -> Vec<String> {
        let mut record = Vec::with_capacity(1 + row.cells.len() * 3);
        record.push(row.lane_id.clone());
        for cell in &row.cells {
            record.push(cell.initial_data.clone());
            record.push(cell.code.clone().unwrap_or_default());
            record.push(cell.source.map(|s| s.as_str().to_string()).unwrap_or_default());
        }
        record
    }
}

struct UniqueHeaders {
    names: Vec<String>,
    taken: HashSet<String>,
}

impl UniqueHeaders {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            names: Vec::with_capacity(capacity),
            taken: HashSet::with_capacity(capacity),
        }
    }

    fn push(&mut self, header: String) {
        let mut candidate = header.clone();
        let mut suffix = 1;
        while !self.taken.insert(candidate.to_lowercase()) {
            candidate = format!("{header}_{suffix}");
            suffix += 1;
        }
        self.names.push(candidate);
    }
}
