//! SQLite SQL dialect (Strategy pattern).

use crate::core::identifier::quote_double;
use crate::core::traits::{Dialect, DialectKind};
use crate::core::Statement;

/// SQLite dialect implementation.
#[derive(Debug, Clone, Default)]
pub struct SqliteDialect;

impl SqliteDialect {
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn kind(&self) -> DialectKind {
        DialectKind::Sqlite
    }

    fn quote_ident(&self, name: &str) -> String {
        quote_double(name)
    }

    fn list_tables_query(&self) -> Statement {
        Statement::raw("SELECT name FROM sqlite_master WHERE type='table'")
    }

    fn list_columns_query(&self, table: &str) -> Statement {
        // PRAGMA arguments cannot be bound
        Statement::raw(format!("PRAGMA table_info({})", table))
    }

    fn column_name_index(&self) -> usize {
        // cid, name, type, notnull, dflt_value, pk
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_queries() {
        let dialect = SqliteDialect::new();
        assert_eq!(
            dialect.list_tables_query().sql,
            "SELECT name FROM sqlite_master WHERE type='table'"
        );
        assert_eq!(
            dialect.list_columns_query("people").sql,
            "PRAGMA table_info(people)"
        );
        assert_eq!(dialect.column_name_index(), 1);
    }

    #[test]
    fn test_placeholder_and_quoting() {
        let dialect = SqliteDialect::new();
        assert_eq!(dialect.placeholder_style().token(), "?");
        assert_eq!(dialect.quote_ident("my table"), "\"my table\"");
    }
}
