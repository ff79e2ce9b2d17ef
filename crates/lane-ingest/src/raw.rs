//! Raw sheet contents before a header row is chosen.

/// Column letters of the last spreadsheet column, `XFD`.
const MAX_COLUMN_LETTERS: usize = 3;
/// 1-indexed number of column `XFD`.
const MAX_COLUMN: usize = 16_384;

/// Zero-indexed cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    /// Parses an A1-style reference such as `B12` or `$B$12`.
    pub fn parse(reference: &str) -> Option<Self> {
        let reference = reference.trim().replace('$', "");
        let split = reference.find(|c: char| c.is_ascii_digit())?;
        let (letters, digits) = reference.split_at(split);
        if letters.is_empty()
            || letters.len() > MAX_COLUMN_LETTERS
            || !letters.chars().all(|c| c.is_ascii_alphabetic())
        {
            return None;
        }
        let mut col: usize = 0;
        for ch in letters.bytes() {
            let digit = usize::from(ch.to_ascii_uppercase() - b'A') + 1;
            col = col.checked_mul(26)?.checked_add(digit)?;
        }
        if col > MAX_COLUMN {
            return None;
        }
        let row: usize = digits.parse().ok()?;
        if row == 0 {
            return None;
        }
        Some(Self {
            row: row - 1,
            col: col - 1,
        })
    }
}

/// Rectangular range such as an auto-filter's `A3:F20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    /// Parses `A3:F20`; a single reference yields a one-cell range.
    pub fn parse(reference: &str) -> Option<Self> {
        let mut parts = reference.split(':');
        let start = CellRef::parse(parts.next()?)?;
        let end = match parts.next() {
            Some(part) => CellRef::parse(part)?,
            None => start,
        };
        Some(Self { start, end })
    }

    /// 1-indexed row the range starts on.
    pub fn first_row_number(&self) -> usize {
        self.start.row + 1
    }
}

/// The used range of one sheet, cell values rendered as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSheet {
    pub name: String,
    /// Dense rows of the used range; shorter rows are implicitly blank.
    pub rows: Vec<Vec<String>>,
    /// 1-indexed sheet row of `rows[0]`.
    pub first_row: usize,
    /// Auto-filter declared on the sheet, if any.
    pub auto_filter: Option<CellRange>,
}

impl RawSheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows,
            first_row: 1,
            auto_filter: None,
        }
    }

    pub fn with_first_row(mut self, first_row: usize) -> Self {
        self.first_row = first_row.max(1);
        self
    }

    pub fn with_auto_filter(mut self, range: Option<CellRange>) -> Self {
        self.auto_filter = range;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of non-blank cells in the row at `index` (0-based within `rows`).
    pub fn filled_cells(&self, index: usize) -> usize {
        self.rows
            .get(index)
            .map_or(0, |row| row.iter().filter(|v| !v.trim().is_empty()).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cell_references() {
        assert_eq!(CellRef::parse("A1"), Some(CellRef { row: 0, col: 0 }));
        assert_eq!(CellRef::parse("$AB$12"), Some(CellRef { row: 11, col: 27 }));
        assert_eq!(CellRef::parse("12"), None);
        assert_eq!(CellRef::parse("A0"), None);
    }

    #[test]
    fn rejects_columns_past_xfd() {
        assert_eq!(CellRef::parse("XFD1"), Some(CellRef { row: 0, col: 16_383 }));
        assert_eq!(CellRef::parse("XFE1"), None);
        assert_eq!(CellRef::parse("AAAA1"), None);
        let long = format!("{}1:B2", "A".repeat(36));
        assert_eq!(CellRange::parse(&long), None);
        assert_eq!(CellRef::parse("A99999999999999999999999"), None);
    }

    #[test]
    fn parses_ranges() {
        let range = CellRange::parse("A3:F20").expect("range");
        assert_eq!(range.first_row_number(), 3);
        assert_eq!(range.end, CellRef { row: 19, col: 5 });
        let single = CellRange::parse("C7").expect("single");
        assert_eq!(single.start, single.end);
    }
}
