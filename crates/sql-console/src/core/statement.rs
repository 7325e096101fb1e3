//! Statements and INSERT templates.
//!
//! Templates are written in the dialect's DB-API placeholder style (`?` for
//! SQLite, `%s` for PostgreSQL and MySQL). Drivers translate `%s` into their
//! native bind markers when the statement is sent.

use serde::Serialize;

use crate::error::{ConsoleError, Result};

use super::identifier::normalize_table_name;
use super::traits::Dialect;

/// Positional placeholder token style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaceholderStyle {
    /// `?`
    Qmark,
    /// `%s`
    Format,
}

impl PlaceholderStyle {
    pub fn token(&self) -> &'static str {
        match self {
            PlaceholderStyle::Qmark => "?",
            PlaceholderStyle::Format => "%s",
        }
    }
}

/// SQL text plus positional text parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<String>,
}

impl Statement {
    /// Statement with no bound parameters.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn with_params(sql: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }

    /// Whether the statement is a read (`SELECT ...`).
    pub fn is_read(&self) -> bool {
        is_read_statement(&self.sql)
    }
}

/// True when the text starts with `SELECT`, ignoring case and leading whitespace.
pub fn is_read_statement(sql: &str) -> bool {
    let trimmed = sql.trim_start();
    trimmed
        .get(..6)
        .map(|head| head.eq_ignore_ascii_case("select"))
        .unwrap_or(false)
}

/// Split a user-supplied value line into positional tokens.
///
/// Tokens are opaque: no trimming, no quoting, no type coercion.
pub fn split_values(line: &str) -> Vec<String> {
    line.split(',').map(str::to_string).collect()
}

/// A ready-to-bind INSERT for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementTemplate {
    pub table: String,
    pub columns: Vec<String>,
    pub style: PlaceholderStyle,
    pub sql: String,
}

impl StatementTemplate {
    /// Build an INSERT template, optionally quoting identifiers.
    ///
    /// Columns must already be in ordinal order; that order is the order in
    /// which values are bound.
    pub fn build(
        dialect: &dyn Dialect,
        table: &str,
        columns: &[String],
        quote_identifiers: bool,
    ) -> Result<Self> {
        let table = normalize_table_name(table);
        if columns.is_empty() {
            return Err(ConsoleError::UnknownTable(table.to_string()));
        }

        let style = dialect.placeholder_style();
        let ident = |name: &str| {
            if quote_identifiers {
                dialect.quote_ident(name)
            } else {
                name.to_string()
            }
        };

        let column_list = columns
            .iter()
            .map(|c| ident(c.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec![style.token(); columns.len()].join(", ");

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            ident(table),
            column_list,
            placeholders
        );

        Ok(Self {
            table: table.to_string(),
            columns: columns.to_vec(),
            style,
            sql,
        })
    }

    pub fn placeholder_count(&self) -> usize {
        self.columns.len()
    }

    /// Bind a comma-separated value line to this template.
    pub fn bind_line(&self, line: &str) -> Result<Statement> {
        self.bind(split_values(line))
    }

    /// Bind already-split values to this template.
    pub fn bind(&self, values: Vec<String>) -> Result<Statement> {
        if values.len() != self.placeholder_count() {
            return Err(ConsoleError::ValueCount {
                table: self.table.clone(),
                expected: self.placeholder_count(),
                got: values.len(),
            });
        }
        Ok(Statement::with_params(self.sql.clone(), values))
    }
}

/// Build an unquoted INSERT template: `(sql, placeholder_count)` in one value.
pub fn build_insert(
    dialect: &dyn Dialect,
    table: &str,
    columns: &[String],
) -> Result<StatementTemplate> {
    StatementTemplate::build(dialect, table, columns, false)
}
