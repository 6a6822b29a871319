//! pg_ast
//! ============
//!
//! Analysis of PostgreSQL parse trees: given the JSON parse tree produced by
//! an external PostgreSQL parser, this crate extracts every table a query
//! references (classified as read, written or structurally altered, together
//! with aliases and CTE names) and deparses the tree back to SQL text.
//!
//! The parser itself is out of scope: callers hand over its JSON output, a
//! sequence of `RawStmt` wrappers holding tagged nodes.
//!
//! # Example: extracting table references
//!
//! ```rust
//! let tree = r#"[{"RawStmt": {"stmt": {"SelectStmt": {
//!     "targetList": [{"ResTarget": {"val": {"ColumnRef": {"fields": [{"String": {"str": "a"}}]}}}}],
//!     "fromClause": [{"RangeVar": {"relname": "users", "inh": true}}],
//!     "op": 0
//! }}}}]"#;
//!
//! let stmts = pg_ast::parse_tree(tree).unwrap();
//! let tables = pg_ast::extract_tables(&stmts);
//! assert_eq!(tables.names(), vec!["users"]);
//!
//! // The tree also deparses back to SQL.
//! assert_eq!(pg_ast::deparse(&stmts).unwrap(), r#"SELECT "a" FROM "users""#);
//! ```
//!
//! Both walkers are pure functions over immutable input and can run from any
//! number of threads without coordination.

pub mod ast;
mod deparse;
mod error;
mod extract;
mod keywords;
mod typename;

pub use deparse::{deparse, deparse_stmt};
pub use error::{Error, Result};
pub use extract::{extract_tables, ReferenceType, TableReference, Tables};

use ast::{Node, RawStmt};

/// Reads a parse tree from the parser's JSON output.
///
/// The input is an array of statements. `RawStmt` wrappers are unwrapped;
/// bare statement nodes are accepted and wrapped with zero locations.
pub fn parse_tree(json: &str) -> Result<Vec<RawStmt>> {
    let nodes: Vec<Node> = serde_json::from_str(json)?;
    let stmts = nodes
        .into_iter()
        .map(|node| match node {
            Node::RawStmt(raw) => *raw,
            other => RawStmt { stmt: Some(other), stmt_location: 0, stmt_len: 0 },
        })
        .collect();
    Ok(stmts)
}

/// The node kind name of each statement, in order.
pub fn statement_types(stmts: &[RawStmt]) -> Vec<&str> {
    stmts.iter().filter_map(|raw| raw.stmt.as_ref()).map(Node::kind).collect()
}
