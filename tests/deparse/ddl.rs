//! DDL deparsing: CREATE, ALTER, DROP, TRUNCATE, GRANT, LOCK, VACUUM.

use super::*;

fn column(name: &str, type_name: Value, constraints: Vec<Value>) -> Value {
    let mut payload = json!({"colname": name, "typeName": type_name});
    if !constraints.is_empty() {
        payload["constraints"] = Value::Array(constraints);
    }
    json!({ "ColumnDef": payload })
}

// ============================================================================
// CREATE TABLE
// ============================================================================

/// Test CREATE TABLE with column constraints
#[test]
fn it_deparses_create_table() {
    let node = json!({"CreateStmt": {
        "relation": range_var("t"),
        "tableElts": [
            column("id", pg_type("int4", vec![]), vec![json!({"Constraint": {"contype": 1}})]),
            column("name", plain_type("text"), vec![]),
        ],
    }});
    assert_eq!(deparse_one(node), r#"CREATE TABLE "t" ("id" int NOT NULL, "name" text)"#);
}

/// Test temporary and unlogged tables
#[test]
fn it_deparses_create_temporary_table() {
    let node = json!({"CreateStmt": {
        "relation": {"RangeVar": {"relname": "tmp", "inh": true, "relpersistence": "t"}},
        "tableElts": [column("x", pg_type("int4", vec![]), vec![])],
        "oncommit": 2,
    }});
    assert_eq!(deparse_one(node), r#"CREATE TEMPORARY TABLE "tmp" ("x" int) ON COMMIT DELETE ROWS"#);

    let node = json!({"CreateStmt": {
        "relation": {"RangeVar": {"relname": "fast", "inh": true, "relpersistence": "u"}},
        "tableElts": [column("x", pg_type("int4", vec![]), vec![])],
    }});
    assert_eq!(deparse_one(node), r#"CREATE UNLOGGED TABLE "fast" ("x" int)"#);
}

/// Test IF NOT EXISTS and INHERITS
#[test]
fn it_deparses_create_table_if_not_exists() {
    let node = json!({"CreateStmt": {
        "relation": range_var("child"),
        "if_not_exists": true,
        "tableElts": [column("x", pg_type("int4", vec![]), vec![])],
        "inhRelations": [range_var("parent")],
    }});
    assert_eq!(
        deparse_one(node),
        r#"CREATE TABLE IF NOT EXISTS "child" ("x" int) INHERITS ("parent")"#
    );
}

/// Test column DEFAULT and CHECK constraints
#[test]
fn it_deparses_column_constraints() {
    let now = json!({"FuncCall": {"funcname": [string_node("now")]}});
    let default_constraint = json!({"Constraint": {"contype": 2, "raw_expr": now}});
    let check = json!({"Constraint": {"contype": 4, "raw_expr": a_expr(">", column_ref("amount"), int_const(0))}});
    let node = json!({"CreateStmt": {
        "relation": range_var("orders"),
        "tableElts": [
            column("created_at", pg_type("timestamp", vec![]), vec![default_constraint]),
            column("amount", pg_type("numeric", vec![int_const(10), int_const(2)]), vec![check]),
        ],
    }});
    assert_eq!(
        deparse_one(node),
        r#"CREATE TABLE "orders" ("created_at" timestamp DEFAULT now(), "amount" numeric(10, 2) CHECK ("amount" > 0))"#
    );
}

/// Test table-level PRIMARY KEY and UNIQUE constraints
#[test]
fn it_deparses_table_constraints() {
    let pk = json!({"Constraint": {"contype": 5, "keys": [string_node("a"), string_node("b")]}});
    let unique = json!({"Constraint": {"contype": 6, "keys": [string_node("email")]}});
    let node = json!({"CreateStmt": {
        "relation": range_var("t"),
        "tableElts": [
            column("a", pg_type("int4", vec![]), vec![]),
            column("b", pg_type("int4", vec![]), vec![]),
            column("email", plain_type("text"), vec![]),
            pk,
            unique,
        ],
    }});
    assert_eq!(
        deparse_one(node),
        r#"CREATE TABLE "t" ("a" int, "b" int, "email" text, PRIMARY KEY ("a", "b"), UNIQUE ("email"))"#
    );
}

/// Test foreign key constraints with referential actions
#[test]
fn it_deparses_foreign_key_constraints() {
    let fk = json!({"Constraint": {
        "contype": 8,
        "conname": "fk_user",
        "fk_attrs": [string_node("user_id")],
        "pktable": range_var("users"),
        "pk_attrs": [string_node("id")],
        "fk_del_action": "c",
        "fk_upd_action": "r",
    }});
    let node = json!({"CreateStmt": {
        "relation": range_var("orders"),
        "tableElts": [column("user_id", pg_type("int4", vec![]), vec![]), fk],
    }});
    assert_eq!(
        deparse_one(node),
        r#"CREATE TABLE "orders" ("user_id" int, CONSTRAINT fk_user FOREIGN KEY ("user_id") REFERENCES "users" ("id") ON DELETE CASCADE ON UPDATE RESTRICT)"#
    );
}

// ============================================================================
// CREATE TABLE AS / VIEW
// ============================================================================

/// Test CREATE TABLE AS
#[test]
fn it_deparses_create_table_as() {
    let node = json!({"CreateTableAsStmt": {
        "relkind": 37,
        "into": {"IntoClause": {"rel": range_var("snapshot"), "onCommit": 0}},
        "query": select(vec![target(star())], vec![range_var("events")]),
    }});
    assert_eq!(deparse_one(node), r#"CREATE TABLE "snapshot" AS SELECT * FROM "events""#);
}

/// Test CREATE MATERIALIZED VIEW ... WITH NO DATA
#[test]
fn it_deparses_create_materialized_view() {
    let node = json!({"CreateTableAsStmt": {
        "relkind": 23,
        "into": {"IntoClause": {"rel": range_var("mv"), "onCommit": 0, "skip_data": true}},
        "query": select(vec![target(star())], vec![range_var("events")]),
    }});
    assert_eq!(
        deparse_one(node),
        r#"CREATE MATERIALIZED VIEW "mv" AS SELECT * FROM "events" WITH NO DATA"#
    );
}

/// Test CREATE [OR REPLACE] VIEW
#[test]
fn it_deparses_create_view() {
    let node = json!({"ViewStmt": {
        "view": range_var("v"),
        "query": select(vec![target(star())], vec![range_var("base")]),
    }});
    assert_eq!(deparse_one(node), r#"CREATE VIEW "v" AS SELECT * FROM "base""#);

    let node = json!({"ViewStmt": {
        "view": range_var("v"),
        "replace": true,
        "aliases": [string_node("a")],
        "query": select(vec![target(column_ref("x"))], vec![range_var("base")]),
    }});
    assert_eq!(
        deparse_one(node),
        r#"CREATE OR REPLACE VIEW "v" ("a") AS SELECT "x" FROM "base""#
    );
}

/// Test REFRESH MATERIALIZED VIEW
#[test]
fn it_deparses_refresh_materialized_view() {
    let node = json!({"RefreshMatViewStmt": {"relation": range_var("mv"), "concurrent": true}});
    assert_eq!(deparse_one(node), r#"REFRESH MATERIALIZED VIEW CONCURRENTLY "mv""#);
}

// ============================================================================
// ALTER TABLE
// ============================================================================

fn alter(cmds: Vec<Value>) -> Value {
    json!({"AlterTableStmt": {"relation": range_var("users"), "relkind": 37, "cmds": cmds}})
}

/// Test ADD COLUMN
#[test]
fn it_deparses_alter_add_column() {
    let cmd = json!({"AlterTableCmd": {
        "subtype": 0,
        "def": column("email", plain_type("text"), vec![json!({"Constraint": {"contype": 1}})]),
    }});
    assert_eq!(deparse_one(alter(vec![cmd])), r#"ALTER TABLE "users" ADD COLUMN "email" text NOT NULL"#);
}

/// Test DROP COLUMN with CASCADE
#[test]
fn it_deparses_alter_drop_column() {
    let cmd = json!({"AlterTableCmd": {"subtype": 10, "name": "old_field", "behavior": 1}});
    assert_eq!(deparse_one(alter(vec![cmd])), r#"ALTER TABLE "users" DROP COLUMN "old_field" CASCADE"#);
}

/// Test SET and DROP DEFAULT
#[test]
fn it_deparses_alter_column_default() {
    let set = json!({"AlterTableCmd": {"subtype": 3, "name": "active", "def": int_const(1)}});
    let drop = json!({"AlterTableCmd": {"subtype": 3, "name": "active"}});
    assert_eq!(
        deparse_one(alter(vec![set, drop])),
        r#"ALTER TABLE "users" ALTER COLUMN "active" SET DEFAULT 1, ALTER COLUMN "active" DROP DEFAULT"#
    );
}

/// Test SET and DROP NOT NULL
#[test]
fn it_deparses_alter_not_null() {
    let set = json!({"AlterTableCmd": {"subtype": 5, "name": "email"}});
    let drop = json!({"AlterTableCmd": {"subtype": 4, "name": "phone"}});
    assert_eq!(
        deparse_one(alter(vec![set, drop])),
        r#"ALTER TABLE "users" ALTER COLUMN "email" SET NOT NULL, ALTER COLUMN "phone" DROP NOT NULL"#
    );
}

/// Test ALTER COLUMN TYPE
#[test]
fn it_deparses_alter_column_type() {
    let cmd = json!({"AlterTableCmd": {
        "subtype": 25,
        "name": "id",
        "def": column("", pg_type("int8", vec![]), vec![]),
    }});
    assert_eq!(deparse_one(alter(vec![cmd])), r#"ALTER TABLE "users" ALTER COLUMN "id" TYPE bigint"#);
}

/// Test ADD and DROP CONSTRAINT
#[test]
fn it_deparses_alter_constraints() {
    let add = json!({"AlterTableCmd": {
        "subtype": 14,
        "def": {"Constraint": {"contype": 6, "conname": "users_email_key", "keys": [string_node("email")]}},
    }});
    let drop = json!({"AlterTableCmd": {"subtype": 22, "name": "users_email_key", "behavior": 1}});
    assert_eq!(
        deparse_one(alter(vec![add, drop])),
        r#"ALTER TABLE "users" ADD CONSTRAINT users_email_key UNIQUE ("email"), DROP CONSTRAINT "users_email_key" CASCADE"#
    );
}

/// Test ALTER TABLE IF EXISTS
#[test]
fn it_deparses_alter_if_exists() {
    let cmd = json!({"AlterTableCmd": {"subtype": 5, "name": "email"}});
    let node = json!({"AlterTableStmt": {
        "relation": range_var("users"),
        "relkind": 37,
        "missing_ok": true,
        "cmds": [cmd],
    }});
    assert_eq!(
        deparse_one(node),
        r#"ALTER TABLE IF EXISTS "users" ALTER COLUMN "email" SET NOT NULL"#
    );
}

/// Test RENAME TO and RENAME COLUMN
#[test]
fn it_deparses_renames() {
    let table = json!({"RenameStmt": {"renameType": 37, "relation": range_var("users"), "newname": "people"}});
    assert_eq!(deparse_one(table), r#"ALTER TABLE "users" RENAME TO "people""#);

    let column = json!({"RenameStmt": {
        "renameType": 6,
        "relation": range_var("users"),
        "subname": "name",
        "newname": "full_name",
    }});
    assert_eq!(deparse_one(column), r#"ALTER TABLE "users" RENAME COLUMN "name" TO "full_name""#);
}

// ============================================================================
// TRUNCATE and DROP
// ============================================================================

/// Test TRUNCATE options
#[test]
fn it_deparses_truncate() {
    let node = json!({"TruncateStmt": {
        "relations": [range_var("a"), range_var("b")],
        "restart_seqs": true,
        "behavior": 1,
    }});
    assert_eq!(deparse_one(node), r#"TRUNCATE TABLE "a", "b" RESTART IDENTITY CASCADE"#);
}

/// Test DROP TABLE with qualifiers
#[test]
fn it_deparses_drop_table() {
    let node = json!({"DropStmt": {
        "removeType": 37,
        "missing_ok": true,
        "behavior": 1,
        "objects": [[string_node("a"), string_node("b")], [string_node("c")]],
    }});
    assert_eq!(deparse_one(node), r#"DROP TABLE IF EXISTS "a"."b", "c" CASCADE"#);
}

/// Test the DROP object-kind keyword table
#[test]
fn it_deparses_drop_object_kinds() {
    let drop = |remove_type: i64, objects: Value| {
        json!({"DropStmt": {"removeType": remove_type, "behavior": 0, "objects": objects}})
    };

    assert_eq!(
        deparse_one(drop(20, json!([[string_node("idx")]]))),
        r#"DROP INDEX "idx""#
    );
    assert_eq!(
        deparse_one(drop(23, json!([[string_node("mv")]]))),
        r#"DROP MATERIALIZED VIEW "mv""#
    );
    assert_eq!(
        deparse_one(drop(32, json!([[string_node("app")]]))),
        r#"DROP SCHEMA "app""#
    );
    assert_eq!(
        deparse_one(drop(47, json!([[string_node("v")]]))),
        r#"DROP VIEW "v""#
    );
}

/// Test DROP INDEX CONCURRENTLY
#[test]
fn it_deparses_drop_index_concurrently() {
    let node = json!({"DropStmt": {
        "removeType": 20,
        "concurrent": true,
        "behavior": 0,
        "objects": [[string_node("idx_users_email")]],
    }});
    assert_eq!(deparse_one(node), r#"DROP INDEX CONCURRENTLY "idx_users_email""#);
}

/// DROP RULE and DROP TRIGGER name the object, then the table
#[test]
fn it_deparses_drop_rule_and_trigger() {
    let rule = json!({"DropStmt": {
        "removeType": 31,
        "behavior": 0,
        "objects": [[string_node("t"), string_node("my_rule")]],
    }});
    assert_eq!(deparse_one(rule), r#"DROP RULE "my_rule" ON "t""#);

    let trigger = json!({"DropStmt": {
        "removeType": 40,
        "behavior": 0,
        "objects": [[string_node("s"), string_node("t"), string_node("my_trigger")]],
    }});
    assert_eq!(deparse_one(trigger), r#"DROP TRIGGER "my_trigger" ON "s"."t""#);
}

// ============================================================================
// GRANT, LOCK, VACUUM
// ============================================================================

/// Test GRANT with privilege lists and grant option
#[test]
fn it_deparses_grant() {
    let node = json!({"GrantStmt": {
        "is_grant": true,
        "objtype": 37,
        "objects": [range_var("users")],
        "privileges": [
            {"AccessPriv": {"priv_name": "select"}},
            {"AccessPriv": {"priv_name": "update", "cols": [string_node("email")]}},
        ],
        "grantees": [{"RoleSpec": {"roletype": 0, "rolename": "bob"}}],
        "grant_option": true,
    }});
    assert_eq!(
        deparse_one(node),
        r#"GRANT SELECT, UPDATE ("email") ON "users" TO bob WITH GRANT OPTION"#
    );
}

/// Test REVOKE ALL from PUBLIC
#[test]
fn it_deparses_revoke() {
    let node = json!({"GrantStmt": {
        "is_grant": false,
        "objtype": 37,
        "objects": [range_var("users")],
        "grantees": [{"RoleSpec": {"roletype": 3}}],
    }});
    assert_eq!(deparse_one(node), r#"REVOKE ALL ON "users" FROM PUBLIC"#);
}

/// Test GRANT ON SEQUENCE
#[test]
fn it_deparses_grant_on_sequence() {
    let node = json!({"GrantStmt": {
        "is_grant": true,
        "objtype": 33,
        "objects": [range_var("user_ids")],
        "privileges": [{"AccessPriv": {"priv_name": "usage"}}],
        "grantees": [{"RoleSpec": {"roletype": 1}}],
    }});
    assert_eq!(deparse_one(node), r#"GRANT USAGE ON SEQUENCE "user_ids" TO CURRENT_USER"#);
}

/// Test LOCK TABLE modes
#[test]
fn it_deparses_lock() {
    let node = json!({"LockStmt": {"relations": [range_var("users")], "mode": 8, "nowait": true}});
    assert_eq!(deparse_one(node), r#"LOCK TABLE "users" IN ACCESS EXCLUSIVE MODE NOWAIT"#);

    let node = json!({"LockStmt": {"relations": [range_var("users")], "mode": 2}});
    assert_eq!(deparse_one(node), r#"LOCK TABLE "users" IN ROW SHARE MODE"#);
}

/// Test VACUUM with options
#[test]
fn it_deparses_vacuum() {
    let node = json!({"VacuumStmt": {
        "is_vacuumcmd": true,
        "options": [{"DefElem": {"defname": "full"}}, {"DefElem": {"defname": "verbose"}}],
        "rels": [{"VacuumRelation": {"relation": range_var("big_table")}}],
    }});
    assert_eq!(deparse_one(node), r#"VACUUM FULL VERBOSE "big_table""#);
}

/// Test ANALYZE with a column list
#[test]
fn it_deparses_analyze() {
    let node = json!({"VacuumStmt": {
        "is_vacuumcmd": false,
        "rels": [{"VacuumRelation": {"relation": range_var("t"), "va_cols": [string_node("x")]}}],
    }});
    assert_eq!(deparse_one(node), r#"ANALYZE "t" ("x")"#);
}
