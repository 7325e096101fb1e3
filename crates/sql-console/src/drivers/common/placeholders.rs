//! Translation of `%s` template placeholders into driver-native bind markers.
//!
//! Only `%s` outside quoted literals and quoted identifiers is rewritten.
//! `%%` collapses to a literal `%`.

/// Rewrite every `%s` using `marker(n)` where `n` is the 1-based position.
pub fn rewrite_format_placeholders<F>(sql: &str, mut marker: F) -> String
where
    F: FnMut(usize) -> String,
{
    let mut out = String::with_capacity(sql.len() + 8);
    let mut chars = sql.chars().peekable();
    let mut quote: Option<char> = None;
    let mut index = 0;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' | '`' => {
                quote = Some(c);
                out.push(c);
            }
            '%' => match chars.peek() {
                Some('s') => {
                    chars.next();
                    index += 1;
                    out.push_str(&marker(index));
                }
                Some('%') => {
                    chars.next();
                    out.push('%');
                }
                _ => out.push('%'),
            },
            _ => out.push(c),
        }
    }

    out
}

/// `%s` → `$1`, `$2`, ... (PostgreSQL).
pub fn to_numbered(sql: &str) -> String {
    rewrite_format_placeholders(sql, |n| format!("${}", n))
}

/// `%s` → `?` (MySQL).
pub fn to_qmark(sql: &str) -> String {
    rewrite_format_placeholders(sql, |_| "?".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_numbered() {
        assert_eq!(
            to_numbered("INSERT INTO orders (id, total) VALUES (%s, %s)"),
            "INSERT INTO orders (id, total) VALUES ($1, $2)"
        );
    }

    #[test]
    fn test_to_qmark() {
        assert_eq!(
            to_qmark("INSERT INTO orders (id, customer_id, total) VALUES (%s, %s, %s)"),
            "INSERT INTO orders (id, customer_id, total) VALUES (?, ?, ?)"
        );
    }

    #[test]
    fn test_literals_are_left_alone() {
        assert_eq!(
            to_numbered("SELECT * FROM t WHERE a LIKE '%s%' AND b = %s"),
            "SELECT * FROM t WHERE a LIKE '%s%' AND b = $1"
        );
        assert_eq!(to_qmark("SELECT \"%s\" FROM t"), "SELECT \"%s\" FROM t");
    }

    #[test]
    fn test_escaped_percent() {
        assert_eq!(to_numbered("SELECT 10 %% 3, %s"), "SELECT 10 % 3, $1");
        assert_eq!(to_numbered("SELECT 5 % 2"), "SELECT 5 % 2");
    }
}
