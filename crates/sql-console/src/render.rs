//! Plain-text rendering of results.
//!
//! Header and rows are joined with ` | `; values are not escaped or padded.

use crate::core::{Ack, QueryResult};

/// Width factor of the rule printed under the header.
const RULE_WIDTH_PER_COLUMN: usize = 15;

/// ` | `-joined column names.
pub fn header_line(columns: &[String]) -> String {
    columns.join(" | ")
}

/// Dashes under the header, 15 per column.
pub fn rule_line(column_count: usize) -> String {
    "-".repeat(column_count * RULE_WIDTH_PER_COLUMN)
}

pub fn row_line(row: &[Option<String>]) -> String {
    QueryResult::display_row(row).join(" | ")
}

/// Header, rule, then one line per row.
pub fn render_table(columns: &[String], result: &QueryResult) -> Vec<String> {
    let mut lines = Vec::with_capacity(result.rows.len() + 2);
    lines.push(header_line(columns));
    lines.push(rule_line(columns.len()));
    lines.extend(result.rows.iter().map(|row| row_line(row)));
    lines
}

/// Render a statement result using its own column names.
pub fn render_result(result: &QueryResult) -> Vec<String> {
    render_table(&result.columns, result)
}

/// One-line acknowledgment for a statement without rows.
pub fn render_ack(ack: &Ack) -> String {
    match ack.rows_affected {
        Some(n) => format!("Query executed successfully ({} row(s) affected).", n),
        None => "Query executed successfully.".to_string(),
    }
}
