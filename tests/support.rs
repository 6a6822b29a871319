#![allow(unused_macros, dead_code)]

use std::fmt;

use pg_ast::ast::RawStmt;
use serde_json::{json, Value};

#[derive(PartialEq, Eq)]
pub struct MultiLineString<'a>(pub &'a str);

impl<'a> fmt::Debug for MultiLineString<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

// Modified from https://github.com/colin-kiegel/rust-pretty-assertions/issues/24#issuecomment-520613247
// to optionally turn off the pretty printing so you can copy the actual string.
macro_rules! assert_eq {
    ($left:expr, $right:expr) => {
        if let Ok(_diff) = std::env::var("DIFF") {
            pretty_assertions::assert_eq!($left, $right);
        } else {
            std::assert_eq!($left, $right);
        }
    };
}

macro_rules! cast {
    ($target: expr, $pat: path) => {{
        if let $pat(a) = $target {
            a
        } else {
            panic!("mismatch variant when cast to {}", stringify!($pat));
        }
    }};
}

/// Ingests a JSON parse tree built with `serde_json::json!`.
pub fn tree(value: Value) -> Vec<RawStmt> {
    pg_ast::parse_tree(&value.to_string()).expect("parse tree failed")
}

/// Single-statement tree.
pub fn stmt(node: Value) -> Vec<RawStmt> {
    tree(json!([raw_stmt(node)]))
}

/// Deparses a single statement node, panicking on error.
pub fn deparse_one(node: Value) -> String {
    pg_ast::deparse(&stmt(node)).expect("deparse failed")
}

// ============================================================================
// Node builders
// ============================================================================

pub fn raw_stmt(node: Value) -> Value {
    json!({"RawStmt": {"stmt": node, "stmt_location": 0, "stmt_len": 0}})
}

pub fn string_node(value: &str) -> Value {
    json!({"String": {"str": value}})
}

pub fn int_const(value: i64) -> Value {
    json!({"A_Const": {"val": {"Integer": {"ival": value}}}})
}

pub fn string_const(value: &str) -> Value {
    json!({"A_Const": {"val": {"String": {"str": value}}}})
}

pub fn null_const() -> Value {
    json!({"A_Const": {"val": {"Null": {}}}})
}

pub fn column_ref(name: &str) -> Value {
    json!({"ColumnRef": {"fields": [string_node(name)]}})
}

pub fn qualified_column_ref(table: &str, name: &str) -> Value {
    json!({"ColumnRef": {"fields": [string_node(table), string_node(name)]}})
}

pub fn star() -> Value {
    json!({"ColumnRef": {"fields": [{"A_Star": {}}]}})
}

pub fn target(val: Value) -> Value {
    json!({"ResTarget": {"val": val}})
}

pub fn named_target(val: Value, name: &str) -> Value {
    json!({"ResTarget": {"name": name, "val": val}})
}

pub fn insert_col(name: &str) -> Value {
    json!({"ResTarget": {"name": name}})
}

pub fn range_var(relname: &str) -> Value {
    json!({"RangeVar": {"relname": relname, "inh": true, "relpersistence": "p"}})
}

pub fn schema_range_var(schema: &str, relname: &str) -> Value {
    json!({"RangeVar": {"schemaname": schema, "relname": relname, "inh": true, "relpersistence": "p"}})
}

pub fn aliased_range_var(relname: &str, alias: &str) -> Value {
    json!({"RangeVar": {
        "relname": relname,
        "inh": true,
        "relpersistence": "p",
        "alias": {"Alias": {"aliasname": alias}}
    }})
}

/// Leaf SELECT with a target list and FROM clause.
pub fn select(targets: Vec<Value>, from: Vec<Value>) -> Value {
    let mut payload = json!({"op": 0});
    if !targets.is_empty() {
        payload["targetList"] = Value::Array(targets);
    }
    if !from.is_empty() {
        payload["fromClause"] = Value::Array(from);
    }
    json!({ "SelectStmt": payload })
}

pub fn select_where(targets: Vec<Value>, from: Vec<Value>, where_clause: Value) -> Value {
    let mut node = select(targets, from);
    node["SelectStmt"]["whereClause"] = where_clause;
    node
}

/// Plain binary operator expression.
pub fn a_expr(op: &str, lexpr: Value, rexpr: Value) -> Value {
    json!({"A_Expr": {"kind": 0, "name": [string_node(op)], "lexpr": lexpr, "rexpr": rexpr}})
}

pub fn bool_and(args: Vec<Value>) -> Value {
    json!({"BoolExpr": {"boolop": 0, "args": args}})
}

pub fn bool_or(args: Vec<Value>) -> Value {
    json!({"BoolExpr": {"boolop": 1, "args": args}})
}

pub fn bool_not(arg: Value) -> Value {
    json!({"BoolExpr": {"boolop": 2, "args": [arg]}})
}

/// `pg_catalog`-qualified type name, optionally with typmods.
pub fn pg_type(name: &str, typmods: Vec<Value>) -> Value {
    let mut payload = json!({"names": [string_node("pg_catalog"), string_node(name)], "typemod": -1});
    if !typmods.is_empty() {
        payload["typmods"] = Value::Array(typmods);
    }
    json!({ "TypeName": payload })
}

/// Unqualified type name.
pub fn plain_type(name: &str) -> Value {
    json!({"TypeName": {"names": [string_node(name)], "typemod": -1}})
}

pub fn type_cast(arg: Value, type_name: Value) -> Value {
    json!({"TypeCast": {"arg": arg, "typeName": type_name}})
}
