//! Error types for the console core.

use thiserror::Error;

use crate::core::DialectKind;

/// Main error type for console operations.
///
/// Only descriptor parsing, configuration and connection establishment are
/// fatal. Everything else is reported against the statement or table that
/// caused it and the console carries on.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Configuration error (invalid YAML, empty required fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection descriptor could not be parsed.
    #[error("Malformed connection descriptor '{descriptor}': missing '{missing}' separator")]
    DescriptorParse { missing: char, descriptor: String },

    /// The port of a `mysql://` descriptor is not a number.
    #[error("Malformed connection descriptor '{descriptor}': invalid port '{port}'")]
    DescriptorPort { port: String, descriptor: String },

    /// Target database could not be reached.
    #[error("Could not connect to {dialect}: {message}")]
    Connection {
        dialect: DialectKind,
        message: String,
    },

    /// Table is not present in the catalog (or has no columns).
    #[error("Table '{0}' does not exist.")]
    UnknownTable(String),

    /// A single statement failed.
    #[error("Error executing statement `{statement}`: {message}")]
    StatementExecution { statement: String, message: String },

    /// The column-description query itself failed.
    #[error("Could not describe table '{table}': {message}")]
    DescribeFailure { table: String, message: String },

    /// User supplied a different number of values than the table has columns.
    #[error("Table '{table}' expects {expected} values, got {got}")]
    ValueCount {
        table: String,
        expected: usize,
        got: usize,
    },

    /// IO error (batch files, config files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConsoleError {
    /// Create a Connection error for the given dialect.
    pub fn connection(dialect: DialectKind, message: impl ToString) -> Self {
        ConsoleError::Connection {
            dialect,
            message: message.to_string(),
        }
    }

    /// Create a StatementExecution error.
    pub fn statement(statement: impl Into<String>, message: impl ToString) -> Self {
        ConsoleError::StatementExecution {
            statement: statement.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error ends the session.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ConsoleError::Config(_)
                | ConsoleError::DescriptorParse { .. }
                | ConsoleError::DescriptorPort { .. }
                | ConsoleError::Connection { .. }
        )
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConsoleError::Config(_)
            | ConsoleError::DescriptorParse { .. }
            | ConsoleError::DescriptorPort { .. }
            | ConsoleError::Yaml(_) => 2,
            ConsoleError::Connection { .. } => 3,
            _ => 1,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for console operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;
