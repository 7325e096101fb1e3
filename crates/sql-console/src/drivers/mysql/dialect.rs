//! MySQL/MariaDB SQL dialect (Strategy pattern).

use crate::core::identifier::quote_backtick;
use crate::core::traits::{Dialect, DialectKind};
use crate::core::Statement;

/// MySQL/MariaDB dialect implementation.
///
/// Introspection uses `SHOW TABLES` and `DESCRIBE`, both scoped to the
/// database named in the descriptor.
#[derive(Debug, Clone, Default)]
pub struct MysqlDialect;

impl MysqlDialect {
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for MysqlDialect {
    fn name(&self) -> &str {
        "mysql"
    }

    fn kind(&self) -> DialectKind {
        DialectKind::Mysql
    }

    fn quote_ident(&self, name: &str) -> String {
        quote_backtick(name)
    }

    fn list_tables_query(&self) -> Statement {
        Statement::raw("SHOW TABLES")
    }

    fn list_columns_query(&self, table: &str) -> Statement {
        Statement::raw(format!("DESCRIBE {}", table))
    }

    fn column_name_index(&self) -> usize {
        // Field, Type, Null, Key, Default, Extra
        0
    }
}
