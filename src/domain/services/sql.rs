//! SQL quoting for statements passed to `psql -c`

/// Quote a string literal: `it's` -> `'it''s'`
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Quote an identifier: `my"db` -> `"my""db"`
pub fn quote_ident(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
