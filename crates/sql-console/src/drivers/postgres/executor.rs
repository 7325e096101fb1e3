//! PostgreSQL query executor.
//!
//! One `tokio-postgres` client; its connection future runs on a spawned task
//! until the client is dropped. No explicit transaction is ever opened, so
//! each statement commits on its own.
//!
//! Unparameterized statements go through the simple-query protocol, which
//! returns every cell as text. Parameterized statements send their values in
//! text format and let the server coerce them to the target column types,
//! the same way it treats string literals.

use std::error::Error as StdError;

use async_trait::async_trait;
use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::task::JoinHandle;
use tokio_postgres::types::{to_sql_checked, Format, FromSql, IsNull, ToSql, Type};
use tokio_postgres::{Client, Config as PgConfig, NoTls, Row, SimpleQueryMessage};
use tracing::{debug, info, warn};

use crate::core::traits::{DialectKind, QueryExecutor};
use crate::core::{Ack, QueryResult, Statement};
use crate::drivers::common::{to_numbered, SslMode, TlsBuilder};
use crate::error::{ConsoleError, Result};

/// PostgreSQL executor over a single client.
pub struct PostgresExecutor {
    client: Client,
    connection: JoinHandle<()>,
}

impl PostgresExecutor {
    /// Connect using a `postgresql://` DSN, unmodified.
    pub async fn connect(dsn: &str) -> Result<Self> {
        let config: PgConfig = dsn
            .parse()
            .map_err(|e| ConsoleError::connection(DialectKind::Postgres, e))?;

        let ssl_mode = SslMode::from_pg(config.get_ssl_mode());
        let (client, connection) = match TlsBuilder::new(ssl_mode).build() {
            Some(tls) => {
                let (client, connection) = config
                    .connect(tls)
                    .await
                    .map_err(|e| ConsoleError::connection(DialectKind::Postgres, error_message(&e)))?;
                (client, spawn_connection(connection))
            }
            None => {
                warn!("PostgreSQL TLS is disabled. Credentials will be transmitted in plaintext.");
                let (client, connection) = config
                    .connect(NoTls)
                    .await
                    .map_err(|e| ConsoleError::connection(DialectKind::Postgres, error_message(&e)))?;
                (client, spawn_connection(connection))
            }
        };

        info!(
            "Connected to PostgreSQL database: {}",
            config.get_dbname().unwrap_or("(default)")
        );

        Ok(Self { client, connection })
    }

    /// Drop the client and wait for the connection task to finish.
    pub async fn close(self) -> Result<()> {
        drop(self.client);
        if let Err(e) = self.connection.await {
            warn!("PostgreSQL connection task ended abnormally: {}", e);
        }
        info!("Closed PostgreSQL connection");
        Ok(())
    }

    async fn simple_query(&self, sql: &str) -> Result<Vec<SimpleQueryMessage>> {
        self.client
            .simple_query(sql)
            .await
            .map_err(|e| ConsoleError::statement(sql, error_message(&e)))
    }
}

#[async_trait]
impl QueryExecutor for PostgresExecutor {
    async fn query(&mut self, stmt: &Statement) -> Result<QueryResult> {
        if !stmt.has_params() {
            debug!("postgres simple query: {}", stmt.sql);
            return Ok(collect_simple_rows(self.simple_query(&stmt.sql).await?));
        }

        let sql = to_numbered(&stmt.sql);
        debug!("postgres query: {} ({} params)", sql, stmt.params.len());

        let prepared = self
            .client
            .prepare(&sql)
            .await
            .map_err(|e| ConsoleError::statement(&stmt.sql, error_message(&e)))?;
        let params = text_params(&stmt.params);
        let rows = self
            .client
            .query(&prepared, &param_refs(&params))
            .await
            .map_err(|e| ConsoleError::statement(&stmt.sql, error_message(&e)))?;

        let columns = prepared
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        let rows = rows
            .iter()
            .map(|row| (0..row.len()).map(|i| cell_to_string(row, i)).collect())
            .collect();

        Ok(QueryResult::new(columns, rows))
    }

    async fn execute(&mut self, stmt: &Statement) -> Result<Ack> {
        if !stmt.has_params() {
            debug!("postgres simple execute: {}", stmt.sql);
            let messages = self.simple_query(&stmt.sql).await?;
            let count = messages.iter().rev().find_map(|m| match m {
                SimpleQueryMessage::CommandComplete(n) => Some(*n),
                _ => None,
            });
            return Ok(count.map(Ack::with_count).unwrap_or_else(Ack::done));
        }

        let sql = to_numbered(&stmt.sql);
        debug!("postgres execute: {} ({} params)", sql, stmt.params.len());

        let params = text_params(&stmt.params);
        let rows = self
            .client
            .execute(sql.as_str(), &param_refs(&params))
            .await
            .map_err(|e| ConsoleError::statement(&stmt.sql, error_message(&e)))?;

        Ok(Ack::with_count(rows))
    }
}

fn spawn_connection<S, T>(connection: tokio_postgres::Connection<S, T>) -> JoinHandle<()>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    T: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            warn!("PostgreSQL connection error: {}", error_message(&e));
        }
    })
}

/// Server message when available, otherwise the client-side error.
fn error_message(e: &tokio_postgres::Error) -> String {
    match e.as_db_error() {
        Some(db) => format!("{}: {}", db.severity(), db.message()),
        None => e.to_string(),
    }
}

/// Rows of the first result set of a simple-query response.
fn collect_simple_rows(messages: Vec<SimpleQueryMessage>) -> QueryResult {
    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::new();

    for message in messages {
        match message {
            SimpleQueryMessage::RowDescription(description) => {
                if columns.is_empty() {
                    columns = description.iter().map(|c| c.name().to_string()).collect();
                }
            }
            SimpleQueryMessage::Row(row) => {
                if columns.is_empty() {
                    columns = row.columns().iter().map(|c| c.name().to_string()).collect();
                }
                rows.push((0..row.len()).map(|i| row.get(i).map(str::to_string)).collect());
            }
            SimpleQueryMessage::CommandComplete(_) => break,
            _ => {}
        }
    }

    QueryResult::new(columns, rows)
}

/// A bound value sent in text format, accepted for any parameter type.
#[derive(Debug)]
struct TextParam<'a>(&'a str);

impl ToSql for TextParam<'_> {
    fn to_sql(
        &self,
        _ty: &Type,
        out: &mut BytesMut,
    ) -> std::result::Result<IsNull, Box<dyn StdError + Sync + Send>> {
        out.extend_from_slice(self.0.as_bytes());
        Ok(IsNull::No)
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    fn encode_format(&self, _ty: &Type) -> Format {
        Format::Text
    }

    to_sql_checked!();
}

fn text_params(values: &[String]) -> Vec<TextParam<'_>> {
    values.iter().map(|v| TextParam(v.as_str())).collect()
}

fn param_refs<'a>(params: &'a [TextParam<'a>]) -> Vec<&'a (dyn ToSql + Sync)> {
    params.iter().map(|p| p as &(dyn ToSql + Sync)).collect()
}

/// Accepts any column type without decoding; used to detect NULL.
struct AnyValue;

impl<'a> FromSql<'a> for AnyValue {
    fn from_sql(
        _ty: &Type,
        _raw: &'a [u8],
    ) -> std::result::Result<Self, Box<dyn StdError + Sync + Send>> {
        Ok(AnyValue)
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }
}

fn render<'a, T>(row: &'a Row, idx: usize) -> Option<String>
where
    T: FromSql<'a> + ToString,
{
    row.try_get::<_, T>(idx).ok().map(|v| v.to_string())
}

/// Stringify one binary-format cell by column type. `None` is NULL.
fn cell_to_string(row: &Row, idx: usize) -> Option<String> {
    match row.try_get::<_, Option<AnyValue>>(idx) {
        Ok(Some(_)) => {}
        _ => return None,
    }

    let type_name = row.columns()[idx].type_().name();
    let rendered = match type_name {
        "bool" => render::<bool>(row, idx),
        "int2" => render::<i16>(row, idx),
        "int4" => render::<i32>(row, idx),
        "int8" => render::<i64>(row, idx),
        "oid" => render::<u32>(row, idx),
        "float4" => render::<f32>(row, idx),
        "float8" => render::<f64>(row, idx),
        "numeric" => render::<rust_decimal::Decimal>(row, idx),
        "date" => render::<chrono::NaiveDate>(row, idx),
        "time" => render::<chrono::NaiveTime>(row, idx),
        "timestamp" => render::<chrono::NaiveDateTime>(row, idx),
        "timestamptz" => render::<chrono::DateTime<chrono::Utc>>(row, idx),
        "uuid" => render::<uuid::Uuid>(row, idx),
        "json" | "jsonb" => render::<serde_json::Value>(row, idx),
        "bytea" => row
            .try_get::<_, Vec<u8>>(idx)
            .ok()
            .map(|bytes| format!("\\x{}", hex_string(&bytes))),
        _ => row.try_get::<_, String>(idx).ok(),
    };

    Some(rendered.unwrap_or_else(|| format!("<{}>", type_name)))
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
