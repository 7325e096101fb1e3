//! Statement results.
//!
//! Cells are stringified by the driver that read them; `None` is SQL NULL.

use serde::Serialize;

/// Rendered form of a NULL cell.
pub const NULL_DISPLAY: &str = "NULL";

/// Rows returned by a read statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    /// Column names in result order.
    pub columns: Vec<String>,
    /// Rows, each with one cell per column.
    pub rows: Vec<Vec<Option<String>>>,
}

impl QueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, skipping NULLs.
    pub fn column_values(&self, index: usize) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| row.get(index).cloned().flatten())
            .collect()
    }

    /// Row cells with NULL rendered as [`NULL_DISPLAY`].
    pub fn display_row(row: &[Option<String>]) -> Vec<&str> {
        row.iter()
            .map(|cell| cell.as_deref().unwrap_or(NULL_DISPLAY))
            .collect()
    }
}

/// Acknowledgment for a statement that returns no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ack {
    /// Affected-row count, when the engine reports one.
    pub rows_affected: Option<u64>,
}

impl Ack {
    pub fn with_count(rows: u64) -> Self {
        Self {
            rows_affected: Some(rows),
        }
    }

    /// Success without a row count.
    pub fn done() -> Self {
        Self {
            rows_affected: None,
        }
    }
}

/// Outcome of [`Session::execute`](crate::Session::execute).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExecOutcome {
    Rows(QueryResult),
    Ack(Ack),
}
