//! ASCII table rendering
//!
//! ```text
//! Nom           | Email
//! --------------+-----------------------
//! Anne Martin   | anne.martin@example.fr
//! Bruno Le Gall |
//! ```

use crate::model::{Field, Record};
use crate::output::traits::Renderer;

/// Message printed instead of an empty table
pub const EMPTY_TABLE_MESSAGE: &str = "[INFO] No data available to build a table.";

/// Renders records as a left-justified table
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRenderer;

impl Renderer for TableRenderer {
    fn render(&self, records: &[Record], fields: &[Field]) -> String {
        build_ascii_table(records, fields)
    }
}

/// Builds the table: header, `-+-` rule, one row per record
///
/// Column width is the widest cell in characters, header included.
pub fn build_ascii_table(records: &[Record], fields: &[Field]) -> String {
    if records.is_empty() || fields.is_empty() {
        return EMPTY_TABLE_MESSAGE.to_string();
    }

    let header: Vec<&str> = fields.iter().map(Field::label).collect();
    let rows: Vec<Vec<&str>> = records
        .iter()
        .map(|record| fields.iter().map(|field| record.get(*field)).collect())
        .collect();

    let widths: Vec<usize> = (0..fields.len())
        .map(|column| {
            std::iter::once(&header)
                .chain(rows.iter())
                .map(|row| row[column].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(&header, &widths));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &rows {
        lines.push(format_row(row, &widths));
    }

    lines.join("\n")
}

fn format_row(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" | ")
}
