//! Configuration type definitions.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::descriptor::redact_url;

/// Environment variable holding the connection descriptor.
pub const ENV_DATABASE_URI: &str = "DATABASE_URI";
/// Environment variable overriding the SQLite fallback file.
pub const ENV_SQLITE_FILE: &str = "SQLITE_DATABASE_FILE";
/// Environment variable overriding the PostgreSQL introspection schema.
pub const ENV_POSTGRES_SCHEMA: &str = "POSTGRES_SCHEMA";

/// Root configuration structure.
#[derive(Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Connection descriptor; empty selects SQLite.
    #[serde(default)]
    pub database_uri: String,

    /// SQLite database file used when the descriptor is not a server URL
    /// (default: "local_db.sqlite").
    #[serde(default = "default_sqlite_file")]
    pub sqlite_file: PathBuf,

    /// Schema searched by PostgreSQL introspection (default: "public").
    #[serde(default = "default_postgres_schema")]
    pub postgres_schema: String,

    /// Quote identifiers in generated INSERT statements (default: false).
    #[serde(default)]
    pub quote_identifiers: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            database_uri: String::new(),
            sqlite_file: default_sqlite_file(),
            postgres_schema: default_postgres_schema(),
            quote_identifiers: false,
        }
    }
}

impl fmt::Debug for ConsoleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let uri = if self.database_uri.contains('@') {
            redact_url(&self.database_uri).replace("***", "[REDACTED]")
        } else {
            self.database_uri.clone()
        };
        f.debug_struct("ConsoleConfig")
            .field("database_uri", &uri)
            .field("sqlite_file", &self.sqlite_file)
            .field("postgres_schema", &self.postgres_schema)
            .field("quote_identifiers", &self.quote_identifiers)
            .finish()
    }
}

fn default_sqlite_file() -> PathBuf {
    PathBuf::from("local_db.sqlite")
}

fn default_postgres_schema() -> String {
    crate::drivers::postgres::DEFAULT_SCHEMA.to_string()
}
