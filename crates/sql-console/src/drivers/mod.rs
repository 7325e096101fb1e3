//! Database driver implementations.
//!
//! This module provides database-specific implementations of the core traits:
//!
//! - [`sqlite`]: SQLite driver (local file)
//! - [`postgres`]: PostgreSQL driver
//! - [`mysql`]: MySQL/MariaDB driver
//! - [`common`]: Shared utilities (TLS, placeholder translation)
//!
//! # Architecture
//!
//! Each driver module implements:
//! - `Dialect`: catalog queries, quoting and placeholder style
//! - `QueryExecutor`: statement execution over one connection
//!
//! [`DialectImpl`] and [`Connection`] wrap the three drivers in enums with
//! hand-written match dispatch, so the rest of the crate never names a
//! concrete driver.

pub mod common;
pub mod mysql;
pub mod postgres;
pub mod sqlite;

pub use common::{SslMode, TlsBuilder};

pub use mysql::{MysqlDialect, MysqlExecutor};
pub use postgres::{PostgresDialect, PostgresExecutor};
pub use sqlite::{SqliteDialect, SqliteExecutor};

use async_trait::async_trait;

use crate::core::traits::{Dialect, DialectKind, QueryExecutor};
use crate::core::{Ack, ConnectionDescriptor, PlaceholderStyle, QueryResult, Statement};
use crate::error::Result;

/// Enum-based static dispatch for dialects.
#[derive(Debug, Clone)]
pub enum DialectImpl {
    Sqlite(SqliteDialect),
    Postgres(PostgresDialect),
    Mysql(MysqlDialect),
}

impl Dialect for DialectImpl {
    fn name(&self) -> &str {
        match self {
            DialectImpl::Sqlite(d) => d.name(),
            DialectImpl::Postgres(d) => d.name(),
            DialectImpl::Mysql(d) => d.name(),
        }
    }

    fn kind(&self) -> DialectKind {
        match self {
            DialectImpl::Sqlite(d) => d.kind(),
            DialectImpl::Postgres(d) => d.kind(),
            DialectImpl::Mysql(d) => d.kind(),
        }
    }

    fn quote_ident(&self, name: &str) -> String {
        match self {
            DialectImpl::Sqlite(d) => d.quote_ident(name),
            DialectImpl::Postgres(d) => d.quote_ident(name),
            DialectImpl::Mysql(d) => d.quote_ident(name),
        }
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        match self {
            DialectImpl::Sqlite(d) => d.placeholder_style(),
            DialectImpl::Postgres(d) => d.placeholder_style(),
            DialectImpl::Mysql(d) => d.placeholder_style(),
        }
    }

    fn list_tables_query(&self) -> Statement {
        match self {
            DialectImpl::Sqlite(d) => d.list_tables_query(),
            DialectImpl::Postgres(d) => d.list_tables_query(),
            DialectImpl::Mysql(d) => d.list_tables_query(),
        }
    }

    fn list_columns_query(&self, table: &str) -> Statement {
        match self {
            DialectImpl::Sqlite(d) => d.list_columns_query(table),
            DialectImpl::Postgres(d) => d.list_columns_query(table),
            DialectImpl::Mysql(d) => d.list_columns_query(table),
        }
    }

    fn column_name_index(&self) -> usize {
        match self {
            DialectImpl::Sqlite(d) => d.column_name_index(),
            DialectImpl::Postgres(d) => d.column_name_index(),
            DialectImpl::Mysql(d) => d.column_name_index(),
        }
    }
}

impl DialectImpl {
    /// Dialect for an engine; PostgreSQL introspects `postgres_schema`.
    pub fn for_kind(kind: DialectKind, postgres_schema: &str) -> Self {
        match kind {
            DialectKind::Sqlite => DialectImpl::Sqlite(SqliteDialect::new()),
            DialectKind::Postgres => DialectImpl::Postgres(PostgresDialect::new(postgres_schema)),
            DialectKind::Mysql => DialectImpl::Mysql(MysqlDialect::new()),
        }
    }

    pub fn from_descriptor(descriptor: &ConnectionDescriptor, postgres_schema: &str) -> Self {
        Self::for_kind(descriptor.dialect(), postgres_schema)
    }
}

/// One open connection to whichever engine the descriptor selected.
pub enum Connection {
    Sqlite(SqliteExecutor),
    Postgres(PostgresExecutor),
    Mysql(MysqlExecutor),
}

impl Connection {
    /// Open a connection for a parsed descriptor.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Connection` if the server (or file) is
    /// unreachable or rejects the credentials.
    pub async fn open(descriptor: &ConnectionDescriptor) -> Result<Self> {
        match descriptor {
            ConnectionDescriptor::Sqlite { path } => {
                SqliteExecutor::connect(path).await.map(Connection::Sqlite)
            }
            ConnectionDescriptor::Postgres { dsn } => {
                PostgresExecutor::connect(dsn).await.map(Connection::Postgres)
            }
            ConnectionDescriptor::Mysql(target) => {
                MysqlExecutor::connect(target).await.map(Connection::Mysql)
            }
        }
    }

    pub fn kind(&self) -> DialectKind {
        match self {
            Connection::Sqlite(_) => DialectKind::Sqlite,
            Connection::Postgres(_) => DialectKind::Postgres,
            Connection::Mysql(_) => DialectKind::Mysql,
        }
    }

    /// Release the connection.
    pub async fn close(self) -> Result<()> {
        match self {
            Connection::Sqlite(c) => c.close().await,
            Connection::Postgres(c) => c.close().await,
            Connection::Mysql(c) => c.close().await,
        }
    }
}

#[async_trait]
impl QueryExecutor for Connection {
    async fn query(&mut self, stmt: &Statement) -> Result<QueryResult> {
        match self {
            Connection::Sqlite(c) => c.query(stmt).await,
            Connection::Postgres(c) => c.query(stmt).await,
            Connection::Mysql(c) => c.query(stmt).await,
        }
    }

    async fn execute(&mut self, stmt: &Statement) -> Result<Ack> {
        match self {
            Connection::Sqlite(c) => c.execute(stmt).await,
            Connection::Postgres(c) => c.execute(stmt).await,
            Connection::Mysql(c) => c.execute(stmt).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_dialect_impl_for_kind() {
        let sqlite = DialectImpl::for_kind(DialectKind::Sqlite, "public");
        assert_eq!(sqlite.name(), "sqlite");
        assert_eq!(sqlite.kind(), DialectKind::Sqlite);

        let postgres = DialectImpl::for_kind(DialectKind::Postgres, "sales");
        assert_eq!(postgres.name(), "postgres");
        assert_eq!(postgres.list_tables_query().params, vec!["sales"]);

        let mysql = DialectImpl::for_kind(DialectKind::Mysql, "public");
        assert_eq!(mysql.name(), "mysql");
        assert_eq!(mysql.quote_ident("t"), "`t`");
    }

    #[test]
    fn test_dialect_impl_from_descriptor() {
        let descriptor =
            ConnectionDescriptor::parse("mysql://u:p@h/db", Path::new("local.sqlite")).unwrap();
        let dialect = DialectImpl::from_descriptor(&descriptor, "public");
        assert_eq!(dialect.kind(), DialectKind::Mysql);
        assert_eq!(dialect.list_tables_query().sql, "SHOW TABLES");

        let descriptor = ConnectionDescriptor::parse("", Path::new("local.sqlite")).unwrap();
        let dialect = DialectImpl::from_descriptor(&descriptor, "public");
        assert_eq!(dialect.column_name_index(), 1);
        assert_eq!(dialect.placeholder_style().token(), "?");
    }
}
