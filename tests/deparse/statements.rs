//! Utility statement deparsing and error behavior.

use super::*;

// ============================================================================
// Transactions
// ============================================================================

/// Test the transaction keyword table
#[test]
fn it_deparses_transactions() {
    let txn = |kind: i64| json!({"TransactionStmt": {"kind": kind}});
    assert_eq!(deparse_one(txn(0)), "BEGIN");
    assert_eq!(deparse_one(txn(2)), "COMMIT");
    assert_eq!(deparse_one(txn(3)), "ROLLBACK");

    let savepoint = |kind: i64| json!({"TransactionStmt": {"kind": kind, "savepoint_name": "sp1"}});
    assert_eq!(deparse_one(savepoint(4)), "SAVEPOINT sp1");
    assert_eq!(deparse_one(savepoint(5)), "RELEASE SAVEPOINT sp1");
    assert_eq!(deparse_one(savepoint(6)), "ROLLBACK TO SAVEPOINT sp1");
}

/// Unknown transaction kinds are an error
#[test]
fn it_rejects_unknown_transaction_kinds() {
    let err = deparse(&stmt(json!({"TransactionStmt": {"kind": 9}}))).unwrap_err();
    match err {
        Error::UnsupportedTransactionKind { kind } => assert_eq!(kind, 9),
        other => panic!("expected UnsupportedTransactionKind, got {:?}", other),
    }
}

// ============================================================================
// SET / SHOW / EXPLAIN / COPY
// ============================================================================

/// Test SET, SET LOCAL and RESET
#[test]
fn it_deparses_variable_set() {
    let node = json!({"VariableSetStmt": {"kind": 0, "name": "search_path", "args": [string_const("public")]}});
    assert_eq!(deparse_one(node), "SET search_path TO 'public'");

    let node = json!({"VariableSetStmt": {
        "kind": 0, "name": "statement_timeout", "is_local": true, "args": [int_const(1000)],
    }});
    assert_eq!(deparse_one(node), "SET LOCAL statement_timeout TO 1000");

    let node = json!({"VariableSetStmt": {"kind": 4, "name": "search_path"}});
    assert_eq!(deparse_one(node), "RESET search_path");
}

/// Test SHOW
#[test]
fn it_deparses_variable_show() {
    assert_eq!(deparse_one(json!({"VariableShowStmt": {"name": "server_version"}})), "SHOW server_version");
}

/// Test EXPLAIN with and without options
#[test]
fn it_deparses_explain() {
    let node = json!({"ExplainStmt": {"query": select(vec![target(star())], vec![range_var("users")])}});
    assert_eq!(deparse_one(node), r#"EXPLAIN SELECT * FROM "users""#);

    let node = json!({"ExplainStmt": {
        "query": select(vec![target(star())], vec![range_var("users")]),
        "options": [{"DefElem": {"defname": "analyze"}}, {"DefElem": {"defname": "buffers"}}],
    }});
    assert_eq!(deparse_one(node), r#"EXPLAIN (ANALYZE, BUFFERS) SELECT * FROM "users""#);
}

/// Test COPY directions and sources
#[test]
fn it_deparses_copy() {
    let node = json!({"CopyStmt": {
        "relation": range_var("users"),
        "attlist": [string_node("id"), string_node("name")],
        "is_from": true,
    }});
    assert_eq!(deparse_one(node), r#"COPY "users" ("id", "name") FROM STDIN"#);

    let node = json!({"CopyStmt": {"relation": range_var("report"), "filename": "/tmp/report.csv"}});
    assert_eq!(deparse_one(node), r#"COPY "report" TO '/tmp/report.csv'"#);

    let node = json!({"CopyStmt": {"query": select(vec![target(int_const(1))], vec![])}});
    assert_eq!(deparse_one(node), "COPY (SELECT 1) TO STDOUT");
}

/// Test COPY options
#[test]
fn it_deparses_copy_options() {
    let node = json!({"CopyStmt": {
        "relation": range_var("users"),
        "is_from": true,
        "options": [{"DefElem": {"defname": "format", "arg": string_node("csv")}}],
    }});
    assert_eq!(deparse_one(node), r#"COPY "users" FROM STDIN WITH (format csv)"#);
}

// ============================================================================
// Sequences of statements
// ============================================================================

/// Statements join with "; " and no trailing separator
#[test]
fn it_joins_multiple_statements() {
    let stmts = tree(json!([
        raw_stmt(select(vec![target(int_const(1))], vec![])),
        raw_stmt(json!({"TransactionStmt": {"kind": 0}})),
    ]));
    assert_eq!(deparse(&stmts).unwrap(), "SELECT 1; BEGIN");
}

/// Empty trees deparse to the empty string
#[test]
fn it_deparses_empty_trees() {
    assert_eq!(deparse(&[]).unwrap(), "");
}

/// Test statement kind reporting
#[test]
fn it_reports_statement_types() {
    let stmts = tree(json!([
        raw_stmt(select(vec![target(int_const(1))], vec![])),
        raw_stmt(json!({"InsertStmt": {"relation": range_var("t")}})),
    ]));
    assert_eq!(pg_ast::statement_types(&stmts), vec!["SelectStmt", "InsertStmt"]);
}

/// Identical trees produce identical SQL
#[test]
fn it_is_deterministic() {
    let stmts = stmt(select_where(
        vec![target(star())],
        vec![aliased_range_var("users", "u")],
        a_expr("=", column_ref("id"), int_const(1)),
    ));
    assert_eq!(deparse(&stmts).unwrap(), deparse(&stmts).unwrap());
}

// ============================================================================
// Failure modes
// ============================================================================

/// Unknown node kinds fail fast with the offending kind
#[test]
fn it_rejects_unknown_nodes() {
    let err = deparse(&stmt(json!({"MergeStmt": {"relation": range_var("t")}}))).unwrap_err();
    match err {
        Error::UnsupportedNode { kind, .. } => assert_eq!(kind, "MergeStmt"),
        other => panic!("expected UnsupportedNode, got {:?}", other),
    }
}

/// Unknown A_Expr kinds fail fast
#[test]
fn it_rejects_unknown_a_expr_kinds() {
    let weird = json!({"A_Expr": {"kind": 99, "name": [string_node("=")],
        "lexpr": column_ref("a"), "rexpr": int_const(1)}});
    let err = deparse(&stmt(select_where(vec![target(star())], vec![range_var("t")], weird))).unwrap_err();
    match err {
        Error::UnsupportedAExprKind { kind } => assert_eq!(kind, 99),
        other => panic!("expected UnsupportedAExprKind, got {:?}", other),
    }
}

/// ResTarget outside a known context fails fast
#[test]
fn it_rejects_res_targets_outside_known_contexts() {
    let err = deparse(&stmt(target(int_const(1)))).unwrap_err();
    assert!(matches!(err, Error::UnsupportedResTargetContext { .. }));
}

/// A failing statement in a sequence fails the whole call
#[test]
fn it_returns_no_partial_output() {
    let stmts = tree(json!([
        raw_stmt(select(vec![target(int_const(1))], vec![])),
        raw_stmt(json!({"MergeStmt": {}})),
    ]));
    assert!(deparse(&stmts).is_err());
}
