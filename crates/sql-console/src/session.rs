//! Console session: one connection, its dialect, and the console operations.
//!
//! A session owns the only connection the console uses. Statements run one
//! at a time and each is committed before the next is sent. Dropping the
//! session releases the connection; [`Session::close`] does so explicitly
//! and waits for the driver to finish.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::batch::{split_statements, BatchReport};
use crate::config::ConsoleConfig;
use crate::core::catalog;
use crate::core::identifier::normalize_table_name;
use crate::core::traits::{Dialect, DialectKind, QueryExecutor};
use crate::core::{ExecOutcome, QueryResult, Statement, StatementTemplate};
use crate::drivers::{Connection, DialectImpl};
use crate::error::Result;

/// Contents of one table with its introspected column order.
#[derive(Debug, Clone)]
pub struct TablePreview {
    pub table: String,
    pub columns: Vec<String>,
    pub result: QueryResult,
}

impl TablePreview {
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }
}

/// An open connection plus the dialect chosen for it.
pub struct Session {
    conn: Connection,
    dialect: DialectImpl,
    quote_identifiers: bool,
}

impl Session {
    /// Resolve the configured descriptor and connect.
    ///
    /// # Errors
    ///
    /// Configuration and descriptor errors are returned before any
    /// connection attempt; connection failures as `ConsoleError::Connection`.
    pub async fn open(config: &ConsoleConfig) -> Result<Self> {
        config.validate()?;
        let descriptor = config.descriptor()?;
        let dialect = DialectImpl::from_descriptor(&descriptor, &config.postgres_schema);

        info!("Connecting to {} at {}", descriptor.dialect(), descriptor);
        let conn = Connection::open(&descriptor).await?;

        Ok(Self {
            conn,
            dialect,
            quote_identifiers: config.quote_identifiers,
        })
    }

    pub fn kind(&self) -> DialectKind {
        self.conn.kind()
    }

    pub fn dialect(&self) -> &DialectImpl {
        &self.dialect
    }

    /// Table names in catalog order.
    pub async fn list_tables(&mut self) -> Result<Vec<String>> {
        catalog::list_tables(&mut self.conn, &self.dialect).await
    }

    /// Column names of `table` in ordinal order; empty if unknown.
    pub async fn list_columns(&mut self, table: &str) -> Result<Vec<String>> {
        catalog::list_columns(&mut self.conn, &self.dialect, table).await
    }

    /// Build the INSERT template for an existing table.
    pub async fn insert_template(&mut self, table: &str) -> Result<StatementTemplate> {
        let columns = catalog::require_columns(&mut self.conn, &self.dialect, table).await?;
        StatementTemplate::build(&self.dialect, table, &columns, self.quote_identifiers)
    }

    /// Insert one comma-separated value line using `template`.
    pub async fn insert_row(&mut self, template: &StatementTemplate, line: &str) -> Result<u64> {
        let stmt = template.bind_line(line)?;
        let ack = self.conn.execute(&stmt).await?;
        debug!("Inserted row into {}", template.table);
        Ok(ack.rows_affected.unwrap_or(1))
    }

    /// Insert a value line into `table`, introspecting its columns first.
    pub async fn insert_values(&mut self, table: &str, line: &str) -> Result<u64> {
        let template = self.insert_template(table).await?;
        self.insert_row(&template, line).await
    }

    /// Run one statement.
    ///
    /// `SELECT` statements return their rows; anything else returns an
    /// acknowledgment.
    pub async fn execute(&mut self, sql: &str, params: Vec<String>) -> Result<ExecOutcome> {
        let stmt = Statement::with_params(sql.trim(), params);
        if stmt.is_read() {
            self.conn.query(&stmt).await.map(ExecOutcome::Rows)
        } else {
            self.conn.execute(&stmt).await.map(ExecOutcome::Ack)
        }
    }

    /// Run every statement of a script, continuing past failures.
    pub async fn execute_batch(&mut self, script: &str) -> BatchReport {
        let mut report = BatchReport::default();
        for statement in split_statements(script) {
            let outcome = self.execute(&statement, Vec::new()).await;
            match &outcome {
                Ok(_) => debug!("Executed: {}", statement),
                Err(e) => warn!("{}", e),
            }
            report.push(statement, outcome);
        }
        let summary = report.summary();
        info!(
            "Batch finished: {} succeeded, {} failed",
            summary.succeeded, summary.failed
        );
        report
    }

    /// Read a script file and run it with [`execute_batch`](Self::execute_batch).
    pub async fn execute_file(&mut self, path: &Path) -> Result<BatchReport> {
        let script = tokio::fs::read_to_string(path).await?;
        Ok(self.execute_batch(&script).await)
    }

    /// Every row of `table`, after checking that it exists.
    pub async fn preview_table(&mut self, table: &str) -> Result<TablePreview> {
        let table = normalize_table_name(table);
        let columns = catalog::require_columns(&mut self.conn, &self.dialect, table).await?;

        let name = if self.quote_identifiers {
            self.dialect.quote_ident(table)
        } else {
            table.to_string()
        };
        let result = self
            .conn
            .query(&Statement::raw(format!("SELECT * FROM {}", name)))
            .await?;

        Ok(TablePreview {
            table: table.to_string(),
            columns,
            result,
        })
    }

    /// Release the connection.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await
    }
}

/// Open a session, run `f`, then close the session whether `f` failed or not.
///
/// An error from `f` takes precedence over an error from closing.
pub async fn with_session<T, F>(config: &ConsoleConfig, f: F) -> Result<T>
where
    F: for<'s> FnOnce(&'s mut Session) -> futures::future::BoxFuture<'s, Result<T>>,
{
    let mut session = Session::open(config).await?;
    let result = f(&mut session).await;
    let closed = session.close().await;
    match (result, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Err(e), _) => Err(e),
        (Ok(_), Err(e)) => Err(e),
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("dialect", &self.dialect.name())
            .field("quote_identifiers", &self.quote_identifiers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConsoleError;

    #[test]
    fn test_preview_is_empty() {
        let preview = TablePreview {
            table: "t".into(),
            columns: vec!["a".into()],
            result: QueryResult::default(),
        };
        assert!(preview.is_empty());
    }

    #[test]
    fn test_unknown_table_error_message() {
        let err = ConsoleError::UnknownTable("ghost".into());
        assert_eq!(err.to_string(), "Table 'ghost' does not exist.");
    }
}
