//! PostgreSQL SQL dialect (Strategy pattern).
//!
//! Introspection reads `information_schema`, restricted to one schema
//! (`public` unless configured otherwise).

use crate::core::identifier::quote_double;
use crate::core::traits::{Dialect, DialectKind};
use crate::core::Statement;

/// Default schema searched by the catalog queries.
pub const DEFAULT_SCHEMA: &str = "public";

/// PostgreSQL dialect implementation.
#[derive(Debug, Clone)]
pub struct PostgresDialect {
    schema: String,
}

impl PostgresDialect {
    /// Create a dialect that introspects `schema`.
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEMA)
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &str {
        "postgres"
    }

    fn kind(&self) -> DialectKind {
        DialectKind::Postgres
    }

    fn quote_ident(&self, name: &str) -> String {
        quote_double(name)
    }

    fn list_tables_query(&self) -> Statement {
        Statement::with_params(
            "SELECT table_name::text FROM information_schema.tables \
             WHERE table_schema = %s",
            vec![self.schema.clone()],
        )
    }

    fn list_columns_query(&self, table: &str) -> Statement {
        Statement::with_params(
            "SELECT column_name::text FROM information_schema.columns \
             WHERE table_schema = %s AND table_name = %s \
             ORDER BY ordinal_position",
            vec![self.schema.clone(), table.to_string()],
        )
    }

    fn column_name_index(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_queries_bind_schema_and_table() {
        let dialect = PostgresDialect::default();

        let tables = dialect.list_tables_query();
        assert!(tables.sql.contains("information_schema.tables"));
        assert_eq!(tables.params, vec!["public"]);

        let columns = dialect.list_columns_query("orders");
        assert!(columns.sql.contains("information_schema.columns"));
        assert!(columns.sql.ends_with("ORDER BY ordinal_position"));
        assert_eq!(columns.params, vec!["public", "orders"]);
        assert_eq!(dialect.column_name_index(), 0);
    }

    #[test]
    fn test_custom_schema() {
        let dialect = PostgresDialect::new("sales");
        assert_eq!(dialect.schema(), "sales");
        assert_eq!(dialect.list_tables_query().params, vec!["sales"]);
    }

    #[test]
    fn test_placeholder_and_quoting() {
        let dialect = PostgresDialect::default();
        assert_eq!(dialect.placeholder_style().token(), "%s");
        assert_eq!(dialect.quote_ident("Orders"), "\"Orders\"");
    }
}
