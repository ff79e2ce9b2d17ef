//! Header-row detection.

use std::fmt;

use tracing::info;

use crate::raw::RawSheet;

/// How the header row was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStrategy {
    /// Start row of the sheet's auto-filter range.
    AutoFilter,
    /// Row with the most non-empty cells.
    DensestRow,
}

impl fmt::Display for HeaderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AutoFilter => f.write_str("auto-filter"),
            Self::DensestRow => f.write_str("densest row"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLocation {
    /// 1-indexed sheet row.
    pub row: usize,
    pub strategy: HeaderStrategy,
}

/// Finds the header row of a sheet.
///
/// An auto-filter wins outright. Otherwise the row of the used range with the
/// most non-empty cells is taken, the earliest one on ties, falling back to
/// the first used row when every row is blank. The result is always >= 1.
pub fn locate_header_row(sheet: &RawSheet) -> HeaderLocation {
    if let Some(filter) = sheet.auto_filter {
        let location = HeaderLocation {
            row: filter.first_row_number(),
            strategy: HeaderStrategy::AutoFilter,
        };
        info!(sheet = %sheet.name, row = location.row, strategy = %location.strategy, "header row located");
        return location;
    }

    let mut best_index = 0;
    let mut best_filled = 0;
    for index in 0..sheet.rows.len() {
        let filled = sheet.filled_cells(index);
        if filled > best_filled {
            best_filled = filled;
            best_index = index;
        }
    }
    let location = HeaderLocation {
        row: sheet.first_row.max(1) + best_index,
        strategy: HeaderStrategy::DensestRow,
    };
    info!(sheet = %sheet.name, row = location.row, strategy = %location.strategy, "header row located");
    location
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::CellRange;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| (*c).to_string()).collect()
    }

    #[test]
    fn auto_filter_start_row_wins() {
        let sheet = RawSheet::new(
            "Lanes",
            vec![
                row(&["Tender 2024", "", "", ""]),
                row(&["a", "b", "c", "d"]),
                row(&["Lane ID", "Country"]),
            ],
        )
        .with_auto_filter(CellRange::parse("A3:B10"));
        let location = locate_header_row(&sheet);
        assert_eq!(location.row, 3);
        assert_eq!(location.strategy, HeaderStrategy::AutoFilter);
    }

    #[test]
    fn densest_row_first_wins_on_ties() {
        let sheet = RawSheet::new(
            "Lanes",
            vec![
                row(&["Title"]),
                row(&["Lane ID", "Country", "Weight"]),
                row(&["L1", "Peru", "12"]),
            ],
        )
        .with_first_row(4);
        let location = locate_header_row(&sheet);
        assert_eq!(location.row, 5);
        assert_eq!(location.strategy, HeaderStrategy::DensestRow);
    }

    #[test]
    fn blank_sheet_falls_back_to_first_used_row() {
        let sheet = RawSheet::new("Empty", vec![row(&["", " "])]).with_first_row(2);
        assert_eq!(locate_header_row(&sheet).row, 2);
    }
}
