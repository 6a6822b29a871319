//! Deparser tests split into multiple modules for maintainability.
//!
//! Every test builds a parse tree in the external parser's JSON shape and
//! checks the exact SQL text the deparser produces.

pub use pg_ast::{deparse, Error};
pub use serde_json::{json, Value};

pub use crate::support::*;

pub mod ddl;
pub mod statements;
