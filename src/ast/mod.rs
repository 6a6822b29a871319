//! Native Rust AST types for PostgreSQL parse trees.
//!
//! This module provides typed nodes for the JSON parse tree produced by the
//! external parser. The tree arrives as tagged single-key objects; conversion
//! into the [`Node`] enum happens during deserialization, so callers work with
//! plain Rust structs instead of raw JSON.
//!
//! # Example
//!
//! ```rust
//! use pg_ast::ast::Node;
//!
//! let tree = r#"[{"RawStmt": {"stmt": {"SelectStmt": {
//!     "targetList": [{"ResTarget": {"val": {"ColumnRef": {"fields": [{"A_Star": {}}]}}}}],
//!     "fromClause": [{"RangeVar": {"relname": "users", "inh": true}}],
//!     "op": 0
//! }}}}]"#;
//! let stmts = pg_ast::parse_tree(tree).unwrap();
//! for stmt in &stmts {
//!     if let Some(Node::SelectStmt(select)) = &stmt.stmt {
//!         for table in &select.from_clause {
//!             if let Node::RangeVar(rv) = table {
//!                 println!("Table: {}", rv.relname);
//!             }
//!         }
//!     }
//! }
//! ```

mod convert;
mod nodes;

pub use nodes::*;
