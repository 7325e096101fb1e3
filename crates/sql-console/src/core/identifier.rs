//! Identifier handling.
//!
//! Table and column names come from the catalog and are trusted. By default
//! they are used verbatim in generated SQL; quoting is available for callers
//! that opt into it.

/// Trim surrounding whitespace from a user-entered table name.
pub fn normalize_table_name(name: &str) -> &str {
    name.trim()
}

/// Quote an identifier with double quotes (SQLite, PostgreSQL).
///
/// Embedded double quotes are doubled.
pub fn quote_double(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote an identifier with backticks (MySQL).
///
/// Embedded backticks are doubled.
pub fn quote_backtick(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_table_name() {
        assert_eq!(normalize_table_name("  orders\n"), "orders");
        assert_eq!(normalize_table_name("Orders"), "Orders");
    }

    #[test]
    fn test_quote_double() {
        assert_eq!(quote_double("users"), "\"users\"");
        assert_eq!(quote_double("table\"name"), "\"table\"\"name\"");
    }

    #[test]
    fn test_quote_backtick() {
        assert_eq!(quote_backtick("users"), "`users`");
        assert_eq!(quote_backtick("table`name"), "`table``name`");
    }
}
