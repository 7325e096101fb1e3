//! MySQL/MariaDB query executor.
//!
//! One `mysql_async` connection. Unparameterized statements use the text
//! protocol; parameterized ones are prepared and bound positionally with
//! every value sent as a string. Autocommit stays on, so each statement is
//! committed when it completes.

use async_trait::async_trait;
use mysql_async::prelude::*;
use mysql_async::{Conn, OptsBuilder, Params, Row, Value};
use tracing::{debug, info, warn};

use crate::core::traits::{DialectKind, QueryExecutor};
use crate::core::{Ack, MysqlTarget, QueryResult, Statement};
use crate::drivers::common::to_qmark;
use crate::error::{ConsoleError, Result};

/// Port used when the descriptor does not name one.
pub const DEFAULT_PORT: u16 = 3306;

/// MySQL executor over a single connection.
pub struct MysqlExecutor {
    conn: Conn,
}

impl MysqlExecutor {
    /// Connect to the server and database named by `target`.
    pub async fn connect(target: &MysqlTarget) -> Result<Self> {
        let port = target.port.unwrap_or(DEFAULT_PORT);
        let opts = OptsBuilder::default()
            .ip_or_hostname(target.host.as_str())
            .tcp_port(port)
            .db_name(Some(target.database.as_str()))
            .user(Some(target.user.as_str()))
            .pass(Some(target.password.as_str()))
            .init(vec!["SET NAMES utf8mb4"]);

        let conn = Conn::new(opts)
            .await
            .map_err(|e| ConsoleError::connection(DialectKind::Mysql, e))?;

        info!(
            "Connected to MySQL database: {}:{}/{}",
            target.host, port, target.database
        );

        Ok(Self { conn })
    }

    /// Disconnect from the server.
    pub async fn close(self) -> Result<()> {
        if let Err(e) = self.conn.disconnect().await {
            warn!("MySQL disconnect failed: {}", e);
        }
        info!("Closed MySQL connection");
        Ok(())
    }
}

#[async_trait]
impl QueryExecutor for MysqlExecutor {
    async fn query(&mut self, stmt: &Statement) -> Result<QueryResult> {
        let fail = |e: mysql_async::Error| ConsoleError::statement(&stmt.sql, e);

        let (columns, rows) = if stmt.has_params() {
            let sql = to_qmark(&stmt.sql);
            debug!("mysql query: {} ({} params)", sql, stmt.params.len());

            let mut result = self
                .conn
                .exec_iter(sql.as_str(), positional(&stmt.params))
                .await
                .map_err(fail)?;
            let columns = column_names(result.columns_ref());
            let rows: Vec<Row> = result.collect().await.map_err(fail)?;
            result.drop_result().await.map_err(fail)?;
            (columns, rows)
        } else {
            debug!("mysql query: {}", stmt.sql);

            let mut result = self.conn.query_iter(stmt.sql.as_str()).await.map_err(fail)?;
            let columns = column_names(result.columns_ref());
            let rows: Vec<Row> = result.collect().await.map_err(fail)?;
            result.drop_result().await.map_err(fail)?;
            (columns, rows)
        };

        let rows = rows
            .iter()
            .map(|row| {
                (0..row.len())
                    .map(|i| row.as_ref(i).and_then(value_to_string))
                    .collect()
            })
            .collect();

        Ok(QueryResult::new(columns, rows))
    }

    async fn execute(&mut self, stmt: &Statement) -> Result<Ack> {
        if stmt.has_params() {
            let sql = to_qmark(&stmt.sql);
            debug!("mysql execute: {} ({} params)", sql, stmt.params.len());
            self.conn
                .exec_drop(sql.as_str(), positional(&stmt.params))
                .await
                .map_err(|e| ConsoleError::statement(&stmt.sql, e))?;
        } else {
            debug!("mysql execute: {}", stmt.sql);
            self.conn
                .query_drop(stmt.sql.as_str())
                .await
                .map_err(|e| ConsoleError::statement(&stmt.sql, e))?;
        }

        Ok(Ack::with_count(self.conn.affected_rows()))
    }
}

fn positional(values: &[String]) -> Params {
    Params::Positional(values.iter().map(|v| Value::from(v.as_str())).collect())
}

fn column_names(columns: &[mysql_async::Column]) -> Vec<String> {
    columns.iter().map(|c| c.name_str().into_owned()).collect()
}

/// Stringify one cell. `None` is NULL.
fn value_to_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::NULL => return None,
        Value::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Value::Int(v) => v.to_string(),
        Value::UInt(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Double(v) => v.to_string(),
        Value::Date(year, month, day, hour, minute, second, micros) => {
            let date = format!("{:04}-{:02}-{:02}", year, month, day);
            if (*hour, *minute, *second, *micros) == (0, 0, 0, 0) {
                date
            } else if *micros == 0 {
                format!("{} {:02}:{:02}:{:02}", date, hour, minute, second)
            } else {
                format!(
                    "{} {:02}:{:02}:{:02}.{:06}",
                    date, hour, minute, second, micros
                )
            }
        }
        Value::Time(negative, days, hours, minutes, seconds, micros) => {
            let sign = if *negative { "-" } else { "" };
            let hours = u64::from(*days) * 24 + u64::from(*hours);
            if *micros == 0 {
                format!("{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds)
            } else {
                format!(
                    "{}{:02}:{:02}:{:02}.{:06}",
                    sign, hours, minutes, seconds, micros
                )
            }
        }
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_to_string_scalars() {
        assert_eq!(value_to_string(&Value::NULL), None);
        assert_eq!(value_to_string(&Value::Int(-4)), Some("-4".to_string()));
        assert_eq!(value_to_string(&Value::UInt(9)), Some("9".to_string()));
        assert_eq!(
            value_to_string(&Value::Bytes(b"Ada".to_vec())),
            Some("Ada".to_string())
        );
        assert_eq!(value_to_string(&Value::Double(2.5)), Some("2.5".to_string()));
    }

    #[test]
    fn test_value_to_string_temporal() {
        assert_eq!(
            value_to_string(&Value::Date(2024, 3, 9, 0, 0, 0, 0)),
            Some("2024-03-09".to_string())
        );
        assert_eq!(
            value_to_string(&Value::Date(2024, 3, 9, 14, 5, 0, 0)),
            Some("2024-03-09 14:05:00".to_string())
        );
        assert_eq!(
            value_to_string(&Value::Time(true, 1, 2, 3, 4, 0)),
            Some("-26:03:04".to_string())
        );
    }

    #[test]
    fn test_positional_params_are_strings() {
        let params = positional(&["1".to_string(), "x".to_string()]);
        match params {
            Params::Positional(values) => {
                assert_eq!(values.len(), 2);
                assert_eq!(values[0], Value::Bytes(b"1".to_vec()));
            }
            _ => panic!("expected positional params"),
        }
    }
}
