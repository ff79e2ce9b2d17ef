//! Table extraction below a located header row.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use lane_model::SheetTable;

use crate::error::{IngestError, Result};
use crate::raw::RawSheet;

/// Name given to blank header cells, suffixed `_1`, `_2`, ... on repeats.
pub const EMPTY_HEADER: &str = "__EMPTY";

/// Builds a table from the rows at and below `header_row` (1-indexed).
///
/// Header cells are trimmed; blank ones are named [`EMPTY_HEADER`] and
/// repeated names get numeric suffixes so every header is unique. Columns
/// with neither a header nor any data are dropped, as are fully blank data
/// rows. Cell values are kept as read.
pub fn extract_table(sheet: &RawSheet, header_row: usize) -> Result<SheetTable> {
    let offset = header_row.saturating_sub(sheet.first_row.max(1));
    let Some(raw_headers) = sheet.rows.get(offset) else {
        return Err(IngestError::EmptySheet {
            sheet: sheet.name.clone(),
            header_row,
        });
    };
    let data_rows: Vec<&Vec<String>> = sheet
        .rows
        .iter()
        .skip(offset + 1)
        .filter(|row| row.iter().any(|v| !v.trim().is_empty()))
        .collect();

    let width = std::iter::once(raw_headers)
        .chain(data_rows.iter().copied())
        .map(Vec::len)
        .max()
        .unwrap_or(0);
    let kept: Vec<usize> = (0..width)
        .filter(|&col| {
            let header_filled = raw_headers.get(col).is_some_and(|h| !h.trim().is_empty());
            header_filled
                || data_rows
                    .iter()
                    .any(|row| row.get(col).is_some_and(|v| !v.trim().is_empty()))
        })
        .collect();
    if kept.is_empty() {
        return Err(IngestError::EmptySheet {
            sheet: sheet.name.clone(),
            header_row,
        });
    }

    let headers = unique_headers(
        kept.iter()
            .map(|&col| raw_headers.get(col).map_or("", String::as_str)),
    );
    let mut table = SheetTable::new(headers, header_row);
    for row in data_rows {
        table.push_row(
            kept.iter()
                .map(|&col| row.get(col).cloned().unwrap_or_default())
                .collect(),
        );
    }
    debug!(
        sheet = %sheet.name,
        header_row,
        columns = table.headers.len(),
        rows = table.row_count(),
        "extracted table"
    );
    Ok(table)
}

fn unique_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let raw: Vec<String> = raw
        .map(|h| {
            let h = h.trim();
            let name = if h.is_empty() { EMPTY_HEADER } else { h };
            name.to_string()
        })
        .collect();
    let mut taken: BTreeSet<String> = BTreeSet::new();
    let mut repeats: BTreeMap<String, usize> = BTreeMap::new();
    let mut headers = Vec::with_capacity(raw.len());
    for base in raw {
        let mut name = base.clone();
        while taken.contains(&name) {
            let counter = repeats.entry(base.clone()).or_default();
            *counter += 1;
            name = format!("{base}_{counter}");
        }
        taken.insert(name.clone());
        headers.push(name);
    }
    headers
}
