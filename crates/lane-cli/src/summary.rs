use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use lane_model::{ReferenceCountry, Source};

use crate::run::RunReport;

const SUMMARY_HEADERS: [&str; 12] = [
    "Column",
    "Rows",
    "Common",
    "Official",
    "cca2",
    "cca3",
    "Capital",
    "Alt spelling",
    "Oracle",
    "Unresolved",
    "Blank",
    "Oracle calls",
];

/// One row of counts per country column, in resolution order.
pub fn summary_rows(report: &RunReport) -> Vec<Vec<String>> {
    report
        .stats
        .iter()
        .map(|(column, stats)| {
            let mut row = vec![column.clone(), stats.rows.to_string()];
            row.extend(
                Source::ALL
                    .iter()
                    .map(|source| stats.by_source.get(source).copied().unwrap_or(0).to_string()),
            );
            row.push(stats.unresolved.to_string());
            row.push(stats.blank.to_string());
            row.push(stats.oracle_calls.to_string());
            row
        })
        .collect()
}

pub fn print_summary(report: &RunReport) {
    println!("Input: {} (sheet {:?})", report.input.display(), report.sheet_name);
    println!(
        "Header row: {} ({})",
        report.header.row, report.header.strategy
    );
    println!("Lane ID column: {}", report.lane_id_column.column_name);
    println!("Reference dataset: sha256 {}", report.fingerprint);

    let mut table = Table::new();
    table.set_header(SUMMARY_HEADERS.iter().map(|label| header_cell(label)));
    apply_summary_table_style(&mut table);
    for index in 1..SUMMARY_HEADERS.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in summary_rows(report) {
        let mut cells = row.into_iter();
        let mut line = vec![
            cells
                .next()
                .map(|name| Cell::new(name).fg(Color::Blue).add_attribute(Attribute::Bold))
                .unwrap_or_else(|| dim_cell("-")),
        ];
        for (offset, value) in cells.enumerate() {
            // offset 8 is the unresolved count
            line.push(if offset == 8 && value != "0" {
                Cell::new(value).fg(Color::Red).add_attribute(Attribute::Bold)
            } else if value == "0" {
                dim_cell(value)
            } else {
                Cell::new(value)
            });
        }
        table.add_row(line);
    }
    println!("{table}");
    println!("Output: {}", report.output.display());
}

/// Prints the loaded reference vocabulary.
pub fn print_countries(countries: &[ReferenceCountry], fingerprint: &str) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("cca2"),
        header_cell("cca3"),
        header_cell("Common name"),
        header_cell("Capitals"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    for country in countries {
        table.add_row(vec![
            Cell::new(&country.cca2).add_attribute(Attribute::Bold),
            Cell::new(&country.cca3),
            Cell::new(&country.common_name),
            if country.capitals.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(country.capitals.join(", "))
            },
        ]);
    }
    println!("{table}");
    println!("{} countries, sha256 {fingerprint}", countries.len());
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
