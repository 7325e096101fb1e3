//! Batch scripts: `;`-separated statements run one at a time.
//!
//! Splitting is purely textual. A `;` inside a string literal or comment
//! still ends the statement.

use serde::Serialize;

use crate::core::ExecOutcome;
use crate::error::ConsoleError;

/// Split a script on `;`, trimming each piece and dropping blank ones.
pub fn split_statements(script: &str) -> Vec<String> {
    script
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Result of one batch statement.
#[derive(Debug)]
pub struct BatchItem {
    pub statement: String,
    pub outcome: Result<ExecOutcome, ConsoleError>,
}

impl BatchItem {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Per-statement results of a batch, in script order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

/// Counts for the end-of-batch summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn push(&mut self, statement: String, outcome: Result<ExecOutcome, ConsoleError>) {
        self.items.push(BatchItem { statement, outcome });
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &ConsoleError)> {
        self.items
            .iter()
            .filter_map(|item| item.outcome.as_ref().err().map(|e| (item.statement.as_str(), e)))
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn is_success(&self) -> bool {
        self.error_count() == 0
    }

    pub fn summary(&self) -> BatchSummary {
        let failed = self.error_count();
        BatchSummary {
            total: self.items.len(),
            succeeded: self.items.len() - failed,
            failed,
        }
    }
}
