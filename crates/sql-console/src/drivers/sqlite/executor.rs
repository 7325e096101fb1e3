//! SQLite query executor.
//!
//! One `sqlx` connection to a local database file, created if missing.
//! SQLite runs in autocommit mode, so every statement is committed as soon
//! as it finishes.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column, ConnectOptions, Connection, Executor as _, Row, Sqlite, TypeInfo, ValueRef};
use tracing::{debug, info};

use crate::core::traits::{DialectKind, QueryExecutor};
use crate::core::{Ack, QueryResult, Statement};
use crate::error::{ConsoleError, Result};

/// SQLite executor over a single connection.
pub struct SqliteExecutor {
    conn: SqliteConnection,
    path: PathBuf,
}

impl SqliteExecutor {
    /// Open (or create) the database file at `path`.
    pub async fn connect(path: &Path) -> Result<Self> {
        let conn = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .connect()
            .await
            .map_err(|e| ConsoleError::connection(DialectKind::Sqlite, e))?;

        info!("Connected to SQLite database: {}", path.display());

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Close the connection.
    pub async fn close(self) -> Result<()> {
        self.conn
            .close()
            .await
            .map_err(|e| ConsoleError::connection(DialectKind::Sqlite, e))?;
        info!("Closed SQLite database: {}", self.path.display());
        Ok(())
    }

    fn bind(stmt: &Statement) -> sqlx::query::Query<'_, Sqlite, SqliteArguments<'_>> {
        let mut query = sqlx::query(&stmt.sql);
        for param in &stmt.params {
            query = query.bind(param.as_str());
        }
        query
    }

    /// Column names of a statement that produced no rows.
    async fn describe_columns(&mut self, sql: &str) -> Result<Vec<String>> {
        let prepared = (&mut self.conn)
            .prepare(sql)
            .await
            .map_err(|e| ConsoleError::statement(sql, e))?;
        Ok(sqlx::Statement::columns(&prepared)
            .iter()
            .map(|c| c.name().to_string())
            .collect())
    }
}

#[async_trait]
impl QueryExecutor for SqliteExecutor {
    async fn query(&mut self, stmt: &Statement) -> Result<QueryResult> {
        debug!("sqlite query: {}", stmt.sql);

        let rows: Vec<SqliteRow> = Self::bind(stmt)
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| ConsoleError::statement(&stmt.sql, e))?;

        let columns = match rows.first() {
            Some(row) => row.columns().iter().map(|c| c.name().to_string()).collect(),
            None => self.describe_columns(&stmt.sql).await?,
        };

        let rows = rows
            .iter()
            .map(|row| (0..row.len()).map(|i| cell_to_string(row, i)).collect())
            .collect();

        Ok(QueryResult::new(columns, rows))
    }

    async fn execute(&mut self, stmt: &Statement) -> Result<Ack> {
        debug!("sqlite execute: {}", stmt.sql);

        let done = Self::bind(stmt)
            .execute(&mut self.conn)
            .await
            .map_err(|e| ConsoleError::statement(&stmt.sql, e))?;

        Ok(Ack::with_count(done.rows_affected()))
    }
}

/// Stringify one cell by its storage class. `None` is NULL.
fn cell_to_string(row: &SqliteRow, idx: usize) -> Option<String> {
    let type_name = match row.try_get_raw(idx) {
        Ok(raw) if raw.is_null() => return None,
        Ok(raw) => raw.type_info().name().to_ascii_uppercase(),
        Err(_) => return None,
    };

    let decoded = if type_name.contains("INT") {
        row.try_get::<i64, _>(idx).map(|v| v.to_string())
    } else if matches!(type_name.as_str(), "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC") {
        // SQLite's own text conversion keeps `1.0` and `1.0e+20` as written.
        row.try_get_unchecked::<String, _>(idx)
    } else if type_name == "BLOB" {
        row.try_get::<Vec<u8>, _>(idx)
            .map(|v| String::from_utf8_lossy(&v).into_owned())
    } else {
        row.try_get::<String, _>(idx)
    };

    Some(
        decoded
            .or_else(|_| row.try_get_unchecked::<String, _>(idx))
            .unwrap_or_else(|_| format!("<{}>", type_name.to_lowercase())),
    )
}
