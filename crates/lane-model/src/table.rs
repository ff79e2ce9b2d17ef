use serde::{Deserialize, Serialize};

/// Tabular data extracted below a sheet's header row.
///
/// Headers are unique and keep their first-seen order; every row has exactly
/// `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// 1-indexed sheet row the headers were read from.
    pub header_row: usize,
}

impl SheetTable {
    pub fn new(headers: Vec<String>, header_row: usize) -> Self {
        Self {
            headers,
            rows: Vec::new(),
            header_row,
        }
    }

    /// Appends a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Cell value at (row, column), empty when out of range.
    pub fn value(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}
