//! Catalog introspection.
//!
//! Normalizes the three catalog mechanisms (sqlite_master / PRAGMA,
//! information_schema, SHOW TABLES / DESCRIBE) into plain ordered name lists.
//! Nothing is cached: every call reads the catalog again.

use tracing::{debug, warn};

use crate::error::{ConsoleError, Result};

use super::identifier::normalize_table_name;
use super::traits::{Dialect, QueryExecutor};

/// List table names in catalog order.
pub async fn list_tables<E>(exec: &mut E, dialect: &dyn Dialect) -> Result<Vec<String>>
where
    E: QueryExecutor + ?Sized,
{
    let result = exec.query(&dialect.list_tables_query()).await?;
    let tables = result.column_values(0);
    debug!("{} catalog lists {} tables", dialect.name(), tables.len());
    Ok(tables)
}

/// List the columns of `table` in ordinal order.
///
/// Returns an empty list when the table is not in the catalog (compared
/// case-sensitively after trimming) or when the describe query fails. No
/// column query is issued for a table that is not listed.
pub async fn list_columns<E>(exec: &mut E, dialect: &dyn Dialect, table: &str) -> Result<Vec<String>>
where
    E: QueryExecutor + ?Sized,
{
    let table = normalize_table_name(table);
    let tables = list_tables(exec, dialect).await?;
    if !tables.iter().any(|t| t == table) {
        debug!("Table '{}' not found in {} catalog", table, dialect.name());
        return Ok(Vec::new());
    }

    match describe(exec, dialect, table).await {
        Ok(columns) => Ok(columns),
        Err(e) => {
            warn!("{}", e);
            Ok(Vec::new())
        }
    }
}

/// Like [`list_columns`], but an empty result is an `UnknownTable` error.
pub async fn require_columns<E>(
    exec: &mut E,
    dialect: &dyn Dialect,
    table: &str,
) -> Result<Vec<String>>
where
    E: QueryExecutor + ?Sized,
{
    let columns = list_columns(exec, dialect, table).await?;
    if columns.is_empty() {
        return Err(ConsoleError::UnknownTable(
            normalize_table_name(table).to_string(),
        ));
    }
    Ok(columns)
}

async fn describe<E>(exec: &mut E, dialect: &dyn Dialect, table: &str) -> Result<Vec<String>>
where
    E: QueryExecutor + ?Sized,
{
    let result = exec
        .query(&dialect.list_columns_query(table))
        .await
        .map_err(|e| ConsoleError::DescribeFailure {
            table: table.to_string(),
            message: e.to_string(),
        })?;
    Ok(result.column_values(dialect.column_name_index()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::statement::Statement;
    use crate::core::traits::DialectKind;
    use crate::core::value::{Ack, QueryResult};
    use crate::drivers::MysqlDialect;
    use async_trait::async_trait;

    /// Answers catalog queries from fixed fixtures and records what it was asked.
    struct FixtureExecutor {
        tables: Vec<&'static str>,
        columns: Vec<&'static str>,
        fail_describe: bool,
        seen: Vec<String>,
    }

    impl FixtureExecutor {
        fn shop() -> Self {
            Self {
                tables: vec!["orders", "customers"],
                columns: vec!["id", "customer_id", "total"],
                fail_describe: false,
                seen: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl QueryExecutor for FixtureExecutor {
        async fn query(&mut self, stmt: &Statement) -> Result<QueryResult> {
            self.seen.push(stmt.sql.clone());
            if stmt.sql == "SHOW TABLES" {
                return Ok(QueryResult::new(
                    vec!["Tables_in_shop".into()],
                    self.tables.iter().map(|t| vec![Some(t.to_string())]).collect(),
                ));
            }
            if self.fail_describe {
                return Err(ConsoleError::statement(&stmt.sql, "describe denied"));
            }
            // DESCRIBE: Field, Type, Null, Key, Default, Extra
            Ok(QueryResult::new(
                vec!["Field".into(), "Type".into()],
                self.columns
                    .iter()
                    .map(|c| vec![Some(c.to_string()), Some("int".into())])
                    .collect(),
            ))
        }

        async fn execute(&mut self, _stmt: &Statement) -> Result<Ack> {
            Ok(Ack::done())
        }
    }

    #[tokio::test]
    async fn test_list_tables_keeps_catalog_order() {
        let mut exec = FixtureExecutor::shop();
        let dialect = MysqlDialect::new();
        assert_eq!(dialect.kind(), DialectKind::Mysql);

        let tables = list_tables(&mut exec, &dialect).await.unwrap();
        assert_eq!(tables, vec!["orders", "customers"]);
    }

    #[tokio::test]
    async fn test_list_columns_in_ordinal_order() {
        let mut exec = FixtureExecutor::shop();
        let columns = list_columns(&mut exec, &MysqlDialect::new(), "orders")
            .await
            .unwrap();
        assert_eq!(columns, vec!["id", "customer_id", "total"]);
        assert_eq!(exec.seen, vec!["SHOW TABLES", "DESCRIBE orders"]);
    }

    #[tokio::test]
    async fn test_unknown_table_never_described() {
        let mut exec = FixtureExecutor::shop();
        let dialect = MysqlDialect::new();

        for _ in 0..2 {
            let columns = list_columns(&mut exec, &dialect, "Orders").await.unwrap();
            assert!(columns.is_empty());
        }
        assert!(exec.seen.iter().all(|sql| sql == "SHOW TABLES"));
    }

    #[tokio::test]
    async fn test_describe_failure_is_no_columns() {
        let mut exec = FixtureExecutor::shop();
        exec.fail_describe = true;

        let columns = list_columns(&mut exec, &MysqlDialect::new(), "orders")
            .await
            .unwrap();
        assert!(columns.is_empty());
    }

    #[tokio::test]
    async fn test_require_columns_unknown_table() {
        let mut exec = FixtureExecutor::shop();
        let err = require_columns(&mut exec, &MysqlDialect::new(), " ghosts ")
            .await
            .unwrap_err();
        assert!(matches!(err, ConsoleError::UnknownTable(ref t) if t == "ghosts"));
    }
}
