//! Core traits for dialect-agnostic console operations.
//!
//! - [`Dialect`]: SQL syntax and catalog strategy for one database engine
//! - [`QueryExecutor`]: runs statements against one live connection
//!
//! # Design Patterns
//!
//! - **Strategy**: each dialect supplies its own catalog queries, placeholder
//!   style and identifier quoting
//! - **Template Method**: the catalog module drives introspection through these
//!   two traits without knowing which engine is behind them

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::statement::{PlaceholderStyle, Statement};
use super::value::{Ack, QueryResult};

/// The three supported database engines.
///
/// Fixed when the session is opened and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    Sqlite,
    Postgres,
    Mysql,
}

impl DialectKind {
    /// Placeholder token used in statement templates for this engine.
    pub fn placeholder_style(&self) -> PlaceholderStyle {
        match self {
            DialectKind::Sqlite => PlaceholderStyle::Qmark,
            DialectKind::Postgres | DialectKind::Mysql => PlaceholderStyle::Format,
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DialectKind::Sqlite => "SQLite",
            DialectKind::Postgres => "PostgreSQL",
            DialectKind::Mysql => "MySQL",
        };
        f.write_str(name)
    }
}

/// SQL syntax and catalog strategy for a database engine.
///
/// Introspection queries are returned as plain [`Statement`]s so they run
/// through the same [`QueryExecutor`] as user statements.
pub trait Dialect: Send + Sync {
    /// Get the dialect identifier (e.g., "sqlite", "postgres").
    fn name(&self) -> &str;

    /// Which engine this dialect describes.
    fn kind(&self) -> DialectKind;

    /// Quote an identifier (table name, column name).
    ///
    /// - SQLite / PostgreSQL: `"identifier"`
    /// - MySQL: `` `identifier` ``
    fn quote_ident(&self, name: &str) -> String;

    /// Placeholder token for bound parameters in templates.
    fn placeholder_style(&self) -> PlaceholderStyle {
        self.kind().placeholder_style()
    }

    /// Statement listing user tables in catalog order.
    ///
    /// The table name must be the first column of every row.
    fn list_tables_query(&self) -> Statement;

    /// Statement describing the columns of `table` in ordinal order.
    fn list_columns_query(&self, table: &str) -> Statement;

    /// Index of the column-name field in rows returned by
    /// [`list_columns_query`](Dialect::list_columns_query).
    fn column_name_index(&self) -> usize;
}

/// Run statements against a single live connection.
///
/// Implementations commit every statement immediately; there is no
/// transaction spanning calls.
#[async_trait]
pub trait QueryExecutor: Send {
    /// Run a statement and collect every row it returns.
    async fn query(&mut self, stmt: &Statement) -> Result<QueryResult>;

    /// Run a statement that does not return rows.
    async fn execute(&mut self, stmt: &Statement) -> Result<Ack>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_kind_display() {
        assert_eq!(DialectKind::Sqlite.to_string(), "SQLite");
        assert_eq!(DialectKind::Postgres.to_string(), "PostgreSQL");
        assert_eq!(DialectKind::Mysql.to_string(), "MySQL");
    }

    #[test]
    fn test_dialect_kind_placeholder_style() {
        assert_eq!(DialectKind::Sqlite.placeholder_style().token(), "?");
        assert_eq!(DialectKind::Postgres.placeholder_style().token(), "%s");
        assert_eq!(DialectKind::Mysql.placeholder_style().token(), "%s");
    }
}
