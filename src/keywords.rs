//! Identifier quoting.
//!
//! A bare identifier must be double-quoted when the caller demands it, when it
//! contains characters outside `[A-Za-z0-9_]`, or when its upper-cased form is
//! a reserved keyword.

/// PostgreSQL reserved keywords, upper-cased and sorted for binary search.
///
/// This is the `RESERVED_KEYWORD` category of the grammar's keyword list;
/// unreserved and column-name keywords are legal as bare identifiers and are
/// deliberately absent.
static RESERVED_KEYWORDS: &[&str] = &[
    "ALL",
    "ANALYSE",
    "ANALYZE",
    "AND",
    "ANY",
    "ARRAY",
    "AS",
    "ASC",
    "ASYMMETRIC",
    "BOTH",
    "CASE",
    "CAST",
    "CHECK",
    "COLLATE",
    "COLUMN",
    "CONSTRAINT",
    "CREATE",
    "CURRENT_CATALOG",
    "CURRENT_DATE",
    "CURRENT_ROLE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "CURRENT_USER",
    "DEFAULT",
    "DEFERRABLE",
    "DESC",
    "DISTINCT",
    "DO",
    "ELSE",
    "END",
    "EXCEPT",
    "FALSE",
    "FETCH",
    "FOR",
    "FOREIGN",
    "FROM",
    "GRANT",
    "GROUP",
    "HAVING",
    "IN",
    "INITIALLY",
    "INTERSECT",
    "INTO",
    "LATERAL",
    "LEADING",
    "LIMIT",
    "LOCALTIME",
    "LOCALTIMESTAMP",
    "NOT",
    "NULL",
    "OFFSET",
    "ON",
    "ONLY",
    "OR",
    "ORDER",
    "PLACING",
    "PRIMARY",
    "REFERENCES",
    "RETURNING",
    "SELECT",
    "SESSION_USER",
    "SOME",
    "SYMMETRIC",
    "TABLE",
    "THEN",
    "TO",
    "TRAILING",
    "TRUE",
    "UNION",
    "UNIQUE",
    "USER",
    "USING",
    "VARIADIC",
    "WHEN",
    "WHERE",
    "WINDOW",
    "WITH",
];

/// Returns true when `ident` cannot appear bare in SQL text.
fn needs_quotes(ident: &str) -> bool {
    if ident.is_empty() {
        return true;
    }
    if !ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return true;
    }
    RESERVED_KEYWORDS.binary_search(&ident.to_ascii_uppercase().as_str()).is_ok()
}

/// Renders an identifier, double-quoting it when required.
///
/// With `escape_always` the identifier is quoted unconditionally; embedded
/// double quotes are doubled either way.
pub(crate) fn quote_ident(ident: &str, escape_always: bool) -> String {
    if escape_always || needs_quotes(ident) {
        format!("\"{}\"", ident.replace('"', "\"\""))
    } else {
        ident.to_string()
    }
}
