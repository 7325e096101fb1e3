//! PostgreSQL driver.
//!
//! - [`PostgresDialect`]: catalog queries over `information_schema`
//! - [`PostgresExecutor`]: single `tokio-postgres` client
//!
//! The `postgresql://` DSN is passed to the driver as-is, so `sslmode` and
//! every other libpq-style option in it are honored.

mod dialect;
mod executor;

pub use dialect::{PostgresDialect, DEFAULT_SCHEMA};
pub use executor::PostgresExecutor;
