//! SQL text reconstruction from parse trees.
//!
//! A single recursive dispatch renders every supported node kind back to SQL.
//! Rendering is context-parameterized: a small [`Context`] tag travels down
//! the recursion and alters how a handful of leaf nodes print (string
//! constants vs. identifiers, `val AS name` vs. `name = val`, operator names
//! emitted raw). Leaf contexts such as EXCLUDED flow through every expression
//! wrapper so they reach the identifiers underneath. Precedence is handled
//! structurally and separately from the leaf contexts: every non-outermost
//! binary expression is parenthesized, the outermost is not.
//!
//! The output is a canonical form of the statement, not a byte-identical copy
//! of the original text. Unsupported node kinds fail the whole call; no
//! partial SQL is ever returned.

use crate::ast::*;
use crate::keywords::quote_ident;
use crate::typename;
use crate::{Error, Result};

/// Rendering context for leaf nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    None,
    /// Target list of SELECT or RETURNING: ResTarget renders `val AS name`.
    Select,
    /// SET list of UPDATE: ResTarget renders `name = val`.
    Update,
    /// SET list of ON CONFLICT DO UPDATE: like Update, but the identifier
    /// `excluded` stays bare and upper-cased.
    Excluded,
    /// String nodes render as quoted constants.
    AConst,
    /// String nodes render raw (function names).
    FuncCall,
    /// String nodes render raw (type names).
    TypeName,
    /// String nodes render raw (operator names).
    Operator,
    /// String nodes render raw (definition values).
    DefnameAs,
    /// Forces parentheses around a binary expression. Carries no leaf
    /// rendering behavior; operands are rendered with no context.
    Precedence,
}

/// Context handed to sub-expressions: leaf contexts (EXCLUDED) survive, the
/// parenthesize marker does not.
fn operand_ctx(ctx: Context) -> Context {
    if ctx == Context::Precedence {
        Context::None
    } else {
        ctx
    }
}

// Window frame option bits, as encoded by the parser.
const FRAME_NONDEFAULT: i32 = 0x1;
const FRAME_ROWS: i32 = 0x4;
const FRAME_BETWEEN: i32 = 0x8;
const FRAME_START_UNBOUNDED_PRECEDING: i32 = 0x10;
const FRAME_END_UNBOUNDED_FOLLOWING: i32 = 0x80;
const FRAME_START_CURRENT_ROW: i32 = 0x100;
const FRAME_END_CURRENT_ROW: i32 = 0x200;
const FRAME_START_OFFSET_PRECEDING: i32 = 0x400;
const FRAME_END_OFFSET_PRECEDING: i32 = 0x800;
const FRAME_START_OFFSET_FOLLOWING: i32 = 0x1000;
const FRAME_END_OFFSET_FOLLOWING: i32 = 0x2000;

/// Object kind keywords for DROP, RENAME and ALTER.
static OBJECT_KIND_WORDS: &[(i32, &str)] = &[
    (object_type::AGGREGATE, "AGGREGATE"),
    (object_type::DATABASE, "DATABASE"),
    (object_type::DOMAIN, "DOMAIN"),
    (object_type::EXTENSION, "EXTENSION"),
    (object_type::FOREIGN_TABLE, "FOREIGN TABLE"),
    (object_type::FUNCTION, "FUNCTION"),
    (object_type::INDEX, "INDEX"),
    (object_type::MATVIEW, "MATERIALIZED VIEW"),
    (object_type::RULE, "RULE"),
    (object_type::SCHEMA, "SCHEMA"),
    (object_type::SEQUENCE, "SEQUENCE"),
    (object_type::TABLE, "TABLE"),
    (object_type::TRIGGER, "TRIGGER"),
    (object_type::TYPE, "TYPE"),
    (object_type::VIEW, "VIEW"),
];

/// LOCK TABLE mode keywords by lock mode number.
static LOCK_MODE_WORDS: &[(i32, &str)] = &[
    (lock_mode::ACCESS_SHARE, "ACCESS SHARE"),
    (lock_mode::ROW_SHARE, "ROW SHARE"),
    (lock_mode::ROW_EXCLUSIVE, "ROW EXCLUSIVE"),
    (lock_mode::SHARE_UPDATE_EXCLUSIVE, "SHARE UPDATE EXCLUSIVE"),
    (lock_mode::SHARE, "SHARE"),
    (lock_mode::SHARE_ROW_EXCLUSIVE, "SHARE ROW EXCLUSIVE"),
    (lock_mode::EXCLUSIVE, "EXCLUSIVE"),
    (lock_mode::ACCESS_EXCLUSIVE, "ACCESS EXCLUSIVE"),
];

/// Deparses a sequence of statements, joined with `"; "`.
pub fn deparse(stmts: &[RawStmt]) -> Result<String> {
    let rendered =
        stmts.iter().filter_map(|raw| raw.stmt.as_ref()).map(deparse_stmt).collect::<Result<Vec<_>>>()?;
    Ok(rendered.join("; "))
}

/// Deparses a single node to SQL text.
pub fn deparse_stmt(node: &Node) -> Result<String> {
    deparse_node(node, Context::None)
}

fn unsupported(node: &Node) -> Error {
    Error::UnsupportedNode { kind: node.kind().to_string(), payload: format!("{:?}", node) }
}

fn deparse_node(node: &Node, ctx: Context) -> Result<String> {
    match node {
        Node::Integer(i) => Ok(i.ival.to_string()),
        Node::Float(f) => Ok(f.value.clone()),
        Node::String(s) => Ok(deparse_string(s, ctx)),
        Node::BitString(b) => Ok(deparse_bit_string(b)),
        Node::Null => Ok("NULL".to_string()),
        Node::List(items) => deparse_list(items, ctx),
        Node::SetToDefault => Ok("DEFAULT".to_string()),
        Node::AStar => Ok("*".to_string()),

        Node::RawStmt(raw) => match &raw.stmt {
            Some(stmt) => deparse_node(stmt, ctx),
            None => Ok(String::new()),
        },
        Node::SelectStmt(s) => deparse_select(s),
        Node::InsertStmt(s) => deparse_insert(s),
        Node::UpdateStmt(s) => deparse_update(s),
        Node::DeleteStmt(s) => deparse_delete(s),
        Node::CopyStmt(s) => deparse_copy(s),
        Node::CreateStmt(s) => deparse_create(s),
        Node::CreateTableAsStmt(s) => deparse_create_table_as(s),
        Node::ViewStmt(s) => deparse_view(s),
        Node::AlterTableStmt(s) => deparse_alter_table(s),
        Node::AlterTableCmd(s) => deparse_alter_table_cmd(s),
        Node::RenameStmt(s) => deparse_rename(s),
        Node::TruncateStmt(s) => deparse_truncate(s),
        Node::DropStmt(s) => deparse_drop(s),
        Node::GrantStmt(s) => deparse_grant(s),
        Node::LockStmt(s) => deparse_lock(s),
        Node::VacuumStmt(s) => deparse_vacuum(s),
        Node::VacuumRelation(s) => deparse_vacuum_relation(s),
        Node::ExplainStmt(s) => deparse_explain(s),
        Node::TransactionStmt(s) => deparse_transaction(s),
        Node::VariableSetStmt(s) => deparse_variable_set(s, node),
        Node::VariableShowStmt(s) => deparse_variable_show(s),
        Node::RefreshMatViewStmt(s) => deparse_refresh_mat_view(s),

        Node::AExpr(e) => deparse_a_expr(e, ctx),
        Node::BoolExpr(e) => deparse_bool_expr(e, ctx, node),
        Node::ColumnRef(e) => deparse_column_ref(e, ctx),
        Node::ParamRef(e) => Ok(format!("${}", e.number)),
        Node::AConst(e) => deparse_a_const(e),
        Node::TypeCast(e) => deparse_type_cast(e, ctx, node),
        Node::CollateClause(e) => deparse_collate(e, ctx),
        Node::FuncCall(e) => deparse_func_call(e, ctx),
        Node::NamedArgExpr(e) => deparse_named_arg(e, ctx),
        Node::SqlValueFunction(e) => deparse_sql_value_function(e, node),
        Node::AIndices(e) => deparse_a_indices(e, ctx),
        Node::AIndirection(e) => deparse_a_indirection(e, ctx),
        Node::AArrayExpr(e) => deparse_a_array_expr(e, ctx),
        Node::SubLink(e) => deparse_sub_link(e, ctx, node),
        Node::NullTest(e) => deparse_null_test(e, ctx, node),
        Node::BooleanTest(e) => deparse_boolean_test(e, ctx, node),
        Node::CaseExpr(e) => deparse_case(e, ctx),
        Node::CaseWhen(e) => deparse_case_when(e, ctx),
        Node::CoalesceExpr(e) => deparse_coalesce(e, ctx),
        Node::MinMaxExpr(e) => deparse_min_max(e, ctx, node),
        Node::RowExpr(e) => deparse_row(e, ctx),

        Node::ResTarget(t) => deparse_res_target(t, ctx),
        Node::RangeVar(r) => deparse_range_var(r),
        Node::RangeSubselect(r) => deparse_range_subselect(r),
        Node::RangeFunction(r) => deparse_range_function(r),
        Node::JoinExpr(j) => deparse_join(j),
        Node::SortBy(s) => deparse_sort_by(s),
        Node::WindowDef(w) => Ok(format!("({})", deparse_window_spec(w)?)),
        Node::WithClause(w) => deparse_with_clause(w),
        Node::CommonTableExpr(c) => deparse_cte(c),
        Node::LockingClause(l) => deparse_locking(l),
        Node::TypeName(t) => deparse_type_name(t),
        Node::ColumnDef(c) => deparse_column_def(c),
        Node::Constraint(c) => deparse_constraint(c),
        Node::DefElem(d) => deparse_def_elem(d),
        Node::IndexElem(i) => deparse_index_elem(i),
        Node::Alias(a) => Ok(deparse_alias(a)),
        Node::RoleSpec(r) => Ok(deparse_role_spec(r)),
        Node::AccessPriv(a) => Ok(deparse_access_priv(a)),

        _ => Err(unsupported(node)),
    }
}

// ============================================================================
// Values and leaves
// ============================================================================

fn deparse_string(s: &StringValue, ctx: Context) -> String {
    match ctx {
        Context::AConst => format!("'{}'", s.value.replace('\'', "''")),
        Context::FuncCall | Context::TypeName | Context::Operator | Context::DefnameAs => s.value.clone(),
        Context::Excluded => {
            if s.value.eq_ignore_ascii_case("excluded") {
                "EXCLUDED".to_string()
            } else {
                quote_ident(&s.value, true)
            }
        }
        _ => quote_ident(&s.value, true),
    }
}

/// `b1010` and `xFF` come back with their radix marker as the first byte.
fn deparse_bit_string(b: &BitString) -> String {
    match b.value.split_at(1) {
        ("x", rest) | ("X", rest) => format!("X'{}'", rest),
        (_, rest) => format!("B'{}'", rest),
    }
}

fn deparse_list(items: &[Node], ctx: Context) -> Result<String> {
    let parts = items.iter().map(|item| deparse_node(item, ctx)).collect::<Result<Vec<_>>>()?;
    Ok(parts.join(", "))
}

fn deparse_a_const(a_const: &AConst) -> Result<String> {
    match &a_const.val {
        Some(val) => deparse_node(val, Context::AConst),
        None => Ok("NULL".to_string()),
    }
}

fn deparse_column_ref(column_ref: &ColumnRef, ctx: Context) -> Result<String> {
    let fields =
        column_ref.fields.iter().map(|field| deparse_node(field, ctx)).collect::<Result<Vec<_>>>()?;
    Ok(fields.join("."))
}

// ============================================================================
// Expressions
// ============================================================================

fn operator_name(a_expr: &AExpr) -> Result<String> {
    match a_expr.name.first() {
        Some(name) => deparse_node(name, Context::Operator),
        None => Err(Error::UnsupportedNode { kind: "A_Expr".to_string(), payload: format!("{:?}", a_expr) }),
    }
}

fn deparse_a_expr(a_expr: &AExpr, ctx: Context) -> Result<String> {
    match a_expr.kind {
        a_expr_kind::OP => deparse_a_expr_op(a_expr, ctx),
        a_expr_kind::OP_ANY => {
            let op = operator_name(a_expr)?;
            Ok(format!("{} {} ANY({})", side(a_expr.lexpr.as_ref(), ctx, a_expr)?, op, side(a_expr.rexpr.as_ref(), ctx, a_expr)?))
        }
        a_expr_kind::OP_ALL => {
            let op = operator_name(a_expr)?;
            Ok(format!("{} {} ALL({})", side(a_expr.lexpr.as_ref(), ctx, a_expr)?, op, side(a_expr.rexpr.as_ref(), ctx, a_expr)?))
        }
        a_expr_kind::DISTINCT => {
            Ok(format!("{} IS DISTINCT FROM {}", side(a_expr.lexpr.as_ref(), ctx, a_expr)?, side(a_expr.rexpr.as_ref(), ctx, a_expr)?))
        }
        a_expr_kind::NULLIF => {
            Ok(format!("NULLIF({}, {})", side(a_expr.lexpr.as_ref(), ctx, a_expr)?, side(a_expr.rexpr.as_ref(), ctx, a_expr)?))
        }
        a_expr_kind::IN => deparse_a_expr_in(a_expr, ctx),
        a_expr_kind::LIKE => deparse_a_expr_like(a_expr, ctx, "~~", "LIKE", "NOT LIKE"),
        a_expr_kind::ILIKE => deparse_a_expr_like(a_expr, ctx, "~~*", "ILIKE", "NOT ILIKE"),
        a_expr_kind::BETWEEN => deparse_a_expr_between(a_expr, ctx, "BETWEEN"),
        a_expr_kind::NOT_BETWEEN => deparse_a_expr_between(a_expr, ctx, "NOT BETWEEN"),
        a_expr_kind::BETWEEN_SYM => deparse_a_expr_between(a_expr, ctx, "BETWEEN SYMMETRIC"),
        a_expr_kind::NOT_BETWEEN_SYM => deparse_a_expr_between(a_expr, ctx, "NOT BETWEEN SYMMETRIC"),
        kind => Err(Error::UnsupportedAExprKind { kind }),
    }
}

fn side(expr: Option<&Node>, ctx: Context, parent: &AExpr) -> Result<String> {
    match expr {
        Some(node) => deparse_node(node, operand_ctx(ctx)),
        None => Err(Error::UnsupportedNode { kind: "A_Expr".to_string(), payload: format!("{:?}", parent) }),
    }
}

/// Plain binary (or unary) operator. Nested operator expressions are
/// parenthesized while the outermost stays bare; the leaf context flows
/// through to the operands instead of being consumed by the marker.
fn deparse_a_expr_op(a_expr: &AExpr, ctx: Context) -> Result<String> {
    let op = operator_name(a_expr)?;
    let child_ctx = operand_ctx(ctx);
    let output = match (&a_expr.lexpr, &a_expr.rexpr) {
        (Some(lexpr), Some(rexpr)) => {
            format!("{} {} {}", nested_operand(lexpr, child_ctx)?, op, nested_operand(rexpr, child_ctx)?)
        }
        (None, Some(rexpr)) => format!("{}{}", op, nested_operand(rexpr, child_ctx)?),
        (Some(lexpr), None) => format!("{}{}", nested_operand(lexpr, child_ctx)?, op),
        (None, None) => {
            return Err(Error::UnsupportedNode { kind: "A_Expr".to_string(), payload: format!("{:?}", a_expr) })
        }
    };
    if ctx == Context::Precedence {
        Ok(format!("({})", output))
    } else {
        Ok(output)
    }
}

/// An operand of a binary expression: a nested operator expression keeps its
/// parentheses. With no leaf context the marker does the wrapping; with one
/// (EXCLUDED) the parentheses are added here so the context still reaches the
/// operand's leaves.
fn nested_operand(node: &Node, ctx: Context) -> Result<String> {
    match node {
        Node::AExpr(child) if child.kind == a_expr_kind::OP => {
            if ctx == Context::None {
                deparse_node(node, Context::Precedence)
            } else {
                Ok(format!("({})", deparse_node(node, ctx)?))
            }
        }
        _ => deparse_node(node, ctx),
    }
}

fn deparse_a_expr_in(a_expr: &AExpr, ctx: Context) -> Result<String> {
    let keyword = if operator_name(a_expr)? == "=" { "IN" } else { "NOT IN" };
    let lexpr = side(a_expr.lexpr.as_ref(), ctx, a_expr)?;
    let rexpr = side(a_expr.rexpr.as_ref(), ctx, a_expr)?;
    Ok(format!("{} {} ({})", lexpr, keyword, rexpr))
}

fn deparse_a_expr_like(a_expr: &AExpr, ctx: Context, positive_op: &str, positive: &str, negative: &str) -> Result<String> {
    let keyword = if operator_name(a_expr)? == positive_op { positive } else { negative };
    let lexpr = side(a_expr.lexpr.as_ref(), ctx, a_expr)?;
    let rexpr = side(a_expr.rexpr.as_ref(), ctx, a_expr)?;
    Ok(format!("{} {} {}", lexpr, keyword, rexpr))
}

fn deparse_a_expr_between(a_expr: &AExpr, ctx: Context, keyword: &str) -> Result<String> {
    let lexpr = side(a_expr.lexpr.as_ref(), ctx, a_expr)?;
    match a_expr.rexpr.as_ref() {
        Some(Node::List(bounds)) if bounds.len() == 2 => {
            let low = deparse_node(&bounds[0], operand_ctx(ctx))?;
            let high = deparse_node(&bounds[1], operand_ctx(ctx))?;
            Ok(format!("{} {} {} AND {}", lexpr, keyword, low, high))
        }
        _ => Err(Error::UnsupportedNode { kind: "A_Expr".to_string(), payload: format!("{:?}", a_expr) }),
    }
}

fn deparse_bool_expr(bool_expr: &BoolExpr, ctx: Context, node: &Node) -> Result<String> {
    let ctx = operand_ctx(ctx);
    match bool_expr.boolop {
        bool_op::AND | bool_op::OR => {
            let own_op = bool_expr.boolop;
            let parts = bool_expr
                .args
                .iter()
                .map(|arg| {
                    let rendered = deparse_node(arg, ctx)?;
                    // An OR under an AND keeps its parentheses; under an OR,
                    // both nested combinations do.
                    let wrap = match arg {
                        Node::BoolExpr(child) if own_op == bool_op::AND => child.boolop == bool_op::OR,
                        Node::BoolExpr(child) if own_op == bool_op::OR => {
                            child.boolop == bool_op::AND || child.boolop == bool_op::OR
                        }
                        _ => false,
                    };
                    Ok(if wrap { format!("({})", rendered) } else { rendered })
                })
                .collect::<Result<Vec<_>>>()?;
            let separator = if bool_expr.boolop == bool_op::AND { " AND " } else { " OR " };
            Ok(parts.join(separator))
        }
        bool_op::NOT => {
            let arg = bool_expr.args.first().ok_or_else(|| unsupported(node))?;
            let rendered = deparse_node(arg, ctx)?;
            match arg {
                Node::BoolExpr(child) if child.boolop != bool_op::NOT => Ok(format!("NOT ({})", rendered)),
                _ => Ok(format!("NOT {}", rendered)),
            }
        }
        _ => Err(unsupported(node)),
    }
}

fn deparse_null_test(null_test: &NullTest, ctx: Context, node: &Node) -> Result<String> {
    let arg = null_test.arg.as_ref().ok_or_else(|| unsupported(node))?;
    let keyword = match null_test.nulltesttype {
        null_test_type::IS_NULL => "IS NULL",
        null_test_type::IS_NOT_NULL => "IS NOT NULL",
        _ => return Err(unsupported(node)),
    };
    Ok(format!("{} {}", deparse_node(arg, operand_ctx(ctx))?, keyword))
}

fn deparse_boolean_test(boolean_test: &BooleanTest, ctx: Context, node: &Node) -> Result<String> {
    let arg = boolean_test.arg.as_ref().ok_or_else(|| unsupported(node))?;
    let keyword = match boolean_test.booltesttype {
        0 => "IS TRUE",
        1 => "IS NOT TRUE",
        2 => "IS FALSE",
        3 => "IS NOT FALSE",
        4 => "IS UNKNOWN",
        5 => "IS NOT UNKNOWN",
        _ => return Err(unsupported(node)),
    };
    Ok(format!("{} {}", deparse_node(arg, operand_ctx(ctx))?, keyword))
}

fn deparse_case(case: &CaseExpr, ctx: Context) -> Result<String> {
    let ctx = operand_ctx(ctx);
    let mut output = vec!["CASE".to_string()];
    if let Some(arg) = &case.arg {
        output.push(deparse_node(arg, ctx)?);
    }
    for when in &case.args {
        output.push(deparse_node(when, ctx)?);
    }
    if let Some(default) = &case.defresult {
        output.push("ELSE".to_string());
        output.push(deparse_node(default, ctx)?);
    }
    output.push("END".to_string());
    Ok(output.join(" "))
}

fn deparse_case_when(when: &CaseWhen, ctx: Context) -> Result<String> {
    let ctx = operand_ctx(ctx);
    let expr = when.expr.as_ref().map(|e| deparse_node(e, ctx)).transpose()?.unwrap_or_default();
    let result = when.result.as_ref().map(|r| deparse_node(r, ctx)).transpose()?.unwrap_or_default();
    Ok(format!("WHEN {} THEN {}", expr, result))
}

fn deparse_coalesce(coalesce: &CoalesceExpr, ctx: Context) -> Result<String> {
    Ok(format!("COALESCE({})", deparse_list(&coalesce.args, operand_ctx(ctx))?))
}

fn deparse_min_max(min_max: &MinMaxExpr, ctx: Context, node: &Node) -> Result<String> {
    let keyword = match min_max.op {
        min_max_op::GREATEST => "GREATEST",
        min_max_op::LEAST => "LEAST",
        _ => return Err(unsupported(node)),
    };
    Ok(format!("{}({})", keyword, deparse_list(&min_max.args, operand_ctx(ctx))?))
}

fn deparse_row(row: &RowExpr, ctx: Context) -> Result<String> {
    Ok(format!("({})", deparse_list(&row.args, operand_ctx(ctx))?))
}

fn deparse_a_array_expr(array: &AArrayExpr, ctx: Context) -> Result<String> {
    Ok(format!("ARRAY[{}]", deparse_list(&array.elements, operand_ctx(ctx))?))
}

fn deparse_a_indices(indices: &AIndices, ctx: Context) -> Result<String> {
    let ctx = operand_ctx(ctx);
    let uidx = indices.uidx.as_ref().map(|u| deparse_node(u, ctx)).transpose()?.unwrap_or_default();
    if indices.is_slice {
        let lidx = indices.lidx.as_ref().map(|l| deparse_node(l, ctx)).transpose()?.unwrap_or_default();
        Ok(format!("[{}:{}]", lidx, uidx))
    } else {
        Ok(format!("[{}]", uidx))
    }
}

fn deparse_a_indirection(indirection: &AIndirection, ctx: Context) -> Result<String> {
    let ctx = operand_ctx(ctx);
    let mut output = match &indirection.arg {
        Some(arg) => deparse_node(arg, ctx)?,
        None => String::new(),
    };
    for part in &indirection.indirection {
        match part {
            Node::String(s) => {
                output.push('.');
                output.push_str(&quote_ident(&s.value, true));
            }
            Node::AStar => output.push_str(".*"),
            other => output.push_str(&deparse_node(other, ctx)?),
        }
    }
    Ok(output)
}

fn deparse_sub_link(sub_link: &SubLink, ctx: Context, node: &Node) -> Result<String> {
    let subselect = match &sub_link.subselect {
        Some(subselect) => deparse_node(subselect, Context::None)?,
        None => return Err(unsupported(node)),
    };
    match sub_link.sub_link_type {
        sub_link_type::EXISTS => Ok(format!("EXISTS ({})", subselect)),
        sub_link_type::ALL => {
            let testexpr = sub_link.testexpr.as_ref().ok_or_else(|| unsupported(node))?;
            let op = match sub_link.oper_name.first() {
                Some(op) => deparse_node(op, Context::Operator)?,
                None => return Err(unsupported(node)),
            };
            Ok(format!("{} {} ALL ({})", deparse_node(testexpr, operand_ctx(ctx))?, op, subselect))
        }
        sub_link_type::ANY => {
            let testexpr = sub_link.testexpr.as_ref().ok_or_else(|| unsupported(node))?;
            Ok(format!("{} IN ({})", deparse_node(testexpr, operand_ctx(ctx))?, subselect))
        }
        sub_link_type::ARRAY => Ok(format!("ARRAY({})", subselect)),
        _ => Ok(format!("({})", subselect)),
    }
}

fn deparse_func_call(func_call: &FuncCall, ctx: Context) -> Result<String> {
    let arg_ctx = operand_ctx(ctx);
    let name = func_call
        .funcname
        .iter()
        .map(|part| deparse_node(part, Context::FuncCall))
        .collect::<Result<Vec<_>>>()?
        .join(".");

    // OVERLAY has keyword-separated arguments and cannot render as a plain
    // call.
    if name == "pg_catalog.overlay" && func_call.args.len() == 4 {
        let args = func_call.args.iter().map(|arg| deparse_node(arg, arg_ctx)).collect::<Result<Vec<_>>>()?;
        return Ok(format!("OVERLAY({} PLACING {} FROM {} FOR {})", args[0], args[1], args[2], args[3]));
    }

    let args = if func_call.agg_star {
        "*".to_string()
    } else {
        deparse_list(&func_call.args, arg_ctx)?
    };
    let distinct = if func_call.agg_distinct { "DISTINCT " } else { "" };

    let mut output = format!("{}({}{})", name, distinct, args);
    if let Some(filter) = &func_call.agg_filter {
        output.push_str(&format!(" FILTER (WHERE {})", deparse_node(filter, arg_ctx)?));
    }
    if let Some(over) = &func_call.over {
        output.push_str(" OVER ");
        match &over.name {
            Some(window_name) => output.push_str(window_name),
            None => output.push_str(&format!("({})", deparse_window_spec(over)?)),
        }
    }
    Ok(output)
}

fn deparse_named_arg(named_arg: &NamedArgExpr, ctx: Context) -> Result<String> {
    let arg =
        named_arg.arg.as_ref().map(|a| deparse_node(a, operand_ctx(ctx))).transpose()?.unwrap_or_default();
    Ok(format!("{} := {}", named_arg.name, arg))
}

fn deparse_sql_value_function(func: &SqlValueFunction, node: &Node) -> Result<String> {
    let keyword = match func.op {
        sql_value_function_op::CURRENT_DATE => "CURRENT_DATE",
        sql_value_function_op::CURRENT_TIME => "CURRENT_TIME",
        sql_value_function_op::CURRENT_TIMESTAMP => "CURRENT_TIMESTAMP",
        sql_value_function_op::LOCALTIME => "LOCALTIME",
        sql_value_function_op::LOCALTIMESTAMP => "LOCALTIMESTAMP",
        sql_value_function_op::CURRENT_ROLE => "CURRENT_ROLE",
        sql_value_function_op::CURRENT_USER => "CURRENT_USER",
        sql_value_function_op::USER => "USER",
        sql_value_function_op::SESSION_USER => "SESSION_USER",
        sql_value_function_op::CURRENT_CATALOG => "CURRENT_CATALOG",
        sql_value_function_op::CURRENT_SCHEMA => "CURRENT_SCHEMA",
        _ => return Err(unsupported(node)),
    };
    Ok(keyword.to_string())
}

fn deparse_type_cast(type_cast: &TypeCast, ctx: Context, node: &Node) -> Result<String> {
    let arg = type_cast.arg.as_ref().ok_or_else(|| unsupported(node))?;
    let type_name = type_cast.type_name.as_ref().ok_or_else(|| unsupported(node))?;
    let rendered_type = deparse_type_name(type_name)?;

    // Boolean literals parse as 't'/'f' string constants cast to bool.
    if rendered_type == "boolean" {
        if let Node::AConst(a_const) = arg {
            if let Some(Node::String(s)) = &a_const.val {
                return Ok(if s.value == "t" { "true".to_string() } else { "false".to_string() });
            }
        }
    }

    Ok(format!("{}::{}", deparse_node(arg, operand_ctx(ctx))?, rendered_type))
}

fn deparse_collate(collate: &CollateClause, ctx: Context) -> Result<String> {
    let arg =
        collate.arg.as_ref().map(|a| deparse_node(a, operand_ctx(ctx))).transpose()?.unwrap_or_default();
    let name = collate
        .collname
        .iter()
        .map(|part| deparse_node(part, Context::None))
        .collect::<Result<Vec<_>>>()?
        .join(".");
    Ok(format!("{} COLLATE {}", arg, name))
}

// ============================================================================
// Type names
// ============================================================================

fn deparse_type_name(type_name: &TypeName) -> Result<String> {
    let names = type_name
        .names
        .iter()
        .map(|part| deparse_node(part, Context::TypeName))
        .collect::<Result<Vec<_>>>()?;

    let args = if type_name.typmods.is_empty() {
        None
    } else {
        Some(deparse_list(&type_name.typmods, Context::None)?)
    };

    let mut output = String::new();
    if type_name.setof {
        output.push_str("SETOF ");
    }

    let base = if names.len() == 2 && names[0] == "pg_catalog" {
        if names[1] == "interval" {
            deparse_interval_type(type_name)?
        } else {
            typename::canonical_spelling(&names[1], args.as_deref())?
        }
    } else {
        match args {
            Some(args) => format!("{}({})", names.join("."), args),
            None => names.join("."),
        }
    };
    output.push_str(&base);

    if !type_name.array_bounds.is_empty() {
        output.push_str("[]");
    }
    Ok(output)
}

/// Pulls the integer out of a typmod entry.
fn typmod_int(node: &Node) -> Option<i64> {
    match node {
        Node::Integer(i) => Some(i.ival),
        Node::AConst(a_const) => match &a_const.val {
            Some(Node::Integer(i)) => Some(i.ival),
            _ => None,
        },
        _ => None,
    }
}

fn deparse_interval_type(type_name: &TypeName) -> Result<String> {
    let Some(mask) = type_name.typmods.first().and_then(typmod_int) else {
        return Ok("interval".to_string());
    };
    let tokens = typename::interval_qualifiers(mask as i32)
        .ok_or_else(|| Error::UnsupportedType { name: format!("interval typmod {}", mask) })?;
    if tokens.is_empty() {
        return Ok("interval".to_string());
    }

    let mut tokens: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    if type_name.typmods.len() == 2 && tokens.last().map(String::as_str) == Some("second") {
        if let Some(precision) = type_name.typmods.get(1).and_then(typmod_int) {
            *tokens.last_mut().expect("checked non-empty") = format!("second({})", precision);
        }
    }
    Ok(format!("interval {}", tokens.join(" to ")))
}

// ============================================================================
// Targets, ranges and clauses
// ============================================================================

fn deparse_res_target(target: &ResTarget, ctx: Context) -> Result<String> {
    match ctx {
        Context::Select => {
            let val = match &target.val {
                Some(val) => deparse_node(val, Context::None)?,
                None => return Ok(target.name.as_deref().map(|n| quote_ident(n, true)).unwrap_or_default()),
            };
            match &target.name {
                Some(name) => Ok(format!("{} AS {}", val, quote_ident(name, true))),
                None => Ok(val),
            }
        }
        Context::Update | Context::Excluded => {
            let name = match &target.name {
                Some(name) => quote_ident(name, true),
                None => return Err(Error::UnsupportedResTargetContext { context: format!("{:?}", ctx) }),
            };
            let val_ctx = if ctx == Context::Excluded { Context::Excluded } else { Context::None };
            let val = match &target.val {
                Some(val) => deparse_node(val, val_ctx)?,
                None => return Err(Error::UnsupportedResTargetContext { context: format!("{:?}", ctx) }),
            };
            Ok(format!("{} = {}", name, val))
        }
        other => Err(Error::UnsupportedResTargetContext { context: format!("{:?}", other) }),
    }
}

fn deparse_range_var(range_var: &RangeVar) -> Result<String> {
    let mut output = Vec::new();
    if !range_var.inh {
        output.push("ONLY".to_string());
    }
    let schema = match &range_var.schemaname {
        Some(schema) => format!("{}.", quote_ident(schema, false)),
        None => String::new(),
    };
    output.push(format!("{}{}", schema, quote_ident(&range_var.relname, true)));
    if let Some(alias) = &range_var.alias {
        output.push(deparse_alias(alias));
    }
    Ok(output.join(" "))
}

fn deparse_alias(alias: &Alias) -> String {
    let name = quote_ident(&alias.aliasname, false);
    if alias.colnames.is_empty() {
        name
    } else {
        let cols: Vec<String> = alias
            .colnames
            .iter()
            .filter_map(|col| match col {
                Node::String(s) => Some(quote_ident(&s.value, true)),
                _ => None,
            })
            .collect();
        format!("{} ({})", name, cols.join(", "))
    }
}

fn deparse_range_subselect(subselect: &RangeSubselect) -> Result<String> {
    let query = match &subselect.subquery {
        Some(query) => deparse_node(query, Context::None)?,
        None => String::new(),
    };
    let mut output = if subselect.lateral {
        format!("LATERAL ({})", query)
    } else {
        format!("({})", query)
    };
    if let Some(alias) = &subselect.alias {
        output.push(' ');
        output.push_str(&deparse_alias(alias));
    }
    Ok(output)
}

/// Only the first function of the first FROM entry is rendered;
/// `ROWS FROM (...)` lists are not supported.
fn deparse_range_function(range_function: &RangeFunction) -> Result<String> {
    let func = match range_function.functions.first() {
        Some(Node::List(items)) => items.first(),
        other => other,
    };
    let mut output = Vec::new();
    if range_function.lateral {
        output.push("LATERAL".to_string());
    }
    if let Some(func) = func {
        output.push(deparse_node(func, Context::None)?);
    }
    if range_function.ordinality {
        output.push("WITH ORDINALITY".to_string());
    }
    if let Some(alias) = &range_function.alias {
        output.push(deparse_alias(alias));
    }
    Ok(output.join(" "))
}

fn deparse_join(join: &JoinExpr) -> Result<String> {
    let larg = match &join.larg {
        Some(larg) => deparse_node(larg, Context::None)?,
        None => String::new(),
    };
    let rarg = match &join.rarg {
        Some(rarg) => deparse_node(rarg, Context::None)?,
        None => String::new(),
    };

    let keyword = match join.jointype {
        join_type::LEFT => "LEFT JOIN",
        join_type::FULL => "FULL JOIN",
        join_type::RIGHT => "RIGHT JOIN",
        _ => {
            if join.is_natural {
                "NATURAL JOIN"
            } else if join.quals.is_none() && join.using_clause.is_empty() {
                "CROSS JOIN"
            } else {
                "JOIN"
            }
        }
    };

    let mut output = vec![larg, keyword.to_string(), rarg];
    if let Some(quals) = &join.quals {
        output.push(format!("ON {}", deparse_node(quals, Context::None)?));
    }
    if !join.using_clause.is_empty() {
        let cols: Vec<String> = join
            .using_clause
            .iter()
            .filter_map(|col| match col {
                Node::String(s) => Some(quote_ident(&s.value, true)),
                _ => None,
            })
            .collect();
        output.push(format!("USING ({})", cols.join(", ")));
    }
    Ok(output.join(" "))
}

fn deparse_sort_by(sort_by: &SortBy) -> Result<String> {
    let mut output = Vec::new();
    if let Some(node) = &sort_by.node {
        output.push(deparse_node(node, Context::None)?);
    }
    match sort_by.sortby_dir {
        sort_by::ASC => output.push("ASC".to_string()),
        sort_by::DESC => output.push("DESC".to_string()),
        sort_by::USING => {
            if let Some(op) = sort_by.use_op.first() {
                output.push(format!("USING {}", deparse_node(op, Context::Operator)?));
            }
        }
        _ => {}
    }
    match sort_by.sortby_nulls {
        sort_by::NULLS_FIRST => output.push("NULLS FIRST".to_string()),
        sort_by::NULLS_LAST => output.push("NULLS LAST".to_string()),
        _ => {}
    }
    Ok(output.join(" "))
}

/// The inside of a window specification, without enclosing parentheses.
fn deparse_window_spec(window: &WindowDef) -> Result<String> {
    let mut output = Vec::new();
    if let Some(refname) = &window.refname {
        output.push(refname.clone());
    }
    if !window.partition_clause.is_empty() {
        output.push(format!("PARTITION BY {}", deparse_list(&window.partition_clause, Context::None)?));
    }
    if !window.order_clause.is_empty() {
        output.push(format!("ORDER BY {}", deparse_list(&window.order_clause, Context::None)?));
    }
    if window.frame_options & FRAME_NONDEFAULT != 0 {
        output.push(deparse_window_frame(window)?);
    }
    Ok(output.join(" "))
}

fn deparse_window_frame(window: &WindowDef) -> Result<String> {
    let options = window.frame_options;
    let mode = if options & FRAME_ROWS != 0 { "ROWS" } else { "RANGE" };

    let start = window_frame_bound(
        options,
        FRAME_START_UNBOUNDED_PRECEDING,
        FRAME_START_CURRENT_ROW,
        FRAME_START_OFFSET_PRECEDING,
        FRAME_START_OFFSET_FOLLOWING,
        window.start_offset.as_ref(),
    )?;

    if options & FRAME_BETWEEN != 0 {
        let end = window_frame_bound(
            options,
            0, // UNBOUNDED PRECEDING is not legal as an end bound
            FRAME_END_CURRENT_ROW,
            FRAME_END_OFFSET_PRECEDING,
            FRAME_END_OFFSET_FOLLOWING,
            window.end_offset.as_ref(),
        )
        .or_else(|_| {
            if options & FRAME_END_UNBOUNDED_FOLLOWING != 0 {
                Ok("UNBOUNDED FOLLOWING".to_string())
            } else {
                Err(Error::UnsupportedNode { kind: "WindowDef".to_string(), payload: format!("{:?}", window) })
            }
        })?;
        Ok(format!("{} BETWEEN {} AND {}", mode, start, end))
    } else {
        Ok(format!("{} {}", mode, start))
    }
}

fn window_frame_bound(
    options: i32,
    unbounded_preceding: i32,
    current_row: i32,
    offset_preceding: i32,
    offset_following: i32,
    offset: Option<&Node>,
) -> Result<String> {
    if unbounded_preceding != 0 && options & unbounded_preceding != 0 {
        Ok("UNBOUNDED PRECEDING".to_string())
    } else if options & current_row != 0 {
        Ok("CURRENT ROW".to_string())
    } else if options & offset_preceding != 0 {
        let offset = offset.map(|o| deparse_node(o, Context::None)).transpose()?.unwrap_or_default();
        Ok(format!("{} PRECEDING", offset))
    } else if options & offset_following != 0 {
        let offset = offset.map(|o| deparse_node(o, Context::None)).transpose()?.unwrap_or_default();
        Ok(format!("{} FOLLOWING", offset))
    } else {
        Err(Error::UnsupportedNode { kind: "WindowDef".to_string(), payload: format!("frame options {}", options) })
    }
}

fn deparse_locking(locking: &LockingClause) -> Result<String> {
    let strength = match locking.strength {
        lock_strength::FOR_KEY_SHARE => "FOR KEY SHARE",
        lock_strength::FOR_SHARE => "FOR SHARE",
        lock_strength::FOR_NO_KEY_UPDATE => "FOR NO KEY UPDATE",
        lock_strength::FOR_UPDATE => "FOR UPDATE",
        _ => {
            return Err(Error::UnsupportedNode {
                kind: "LockingClause".to_string(),
                payload: format!("{:?}", locking),
            })
        }
    };
    let mut output = vec![strength.to_string()];
    if !locking.locked_rels.is_empty() {
        output.push(format!("OF {}", deparse_list(&locking.locked_rels, Context::None)?));
    }
    match locking.wait_policy {
        lock_wait_policy::SKIP => output.push("SKIP LOCKED".to_string()),
        lock_wait_policy::ERROR => output.push("NOWAIT".to_string()),
        _ => {}
    }
    Ok(output.join(" "))
}

fn deparse_with_clause(with: &WithClause) -> Result<String> {
    let mut output = vec!["WITH".to_string()];
    if with.recursive {
        output.push("RECURSIVE".to_string());
    }
    let ctes = with.ctes.iter().map(|cte| deparse_node(cte, Context::None)).collect::<Result<Vec<_>>>()?;
    output.push(ctes.join(", "));
    Ok(output.join(" "))
}

fn deparse_cte(cte: &CommonTableExpr) -> Result<String> {
    let query = match &cte.ctequery {
        Some(query) => deparse_node(query, Context::None)?,
        None => String::new(),
    };
    let name = quote_ident(&cte.ctename, false);
    if cte.aliascolnames.is_empty() {
        Ok(format!("{} AS ({})", name, query))
    } else {
        let cols: Vec<String> = cte
            .aliascolnames
            .iter()
            .filter_map(|col| match col {
                Node::String(s) => Some(quote_ident(&s.value, true)),
                _ => None,
            })
            .collect();
        Ok(format!("{} ({}) AS ({})", name, cols.join(", "), query))
    }
}

fn deparse_column_def(column_def: &ColumnDef) -> Result<String> {
    let mut output = vec![quote_ident(&column_def.colname, true)];
    if let Some(type_name) = &column_def.type_name {
        output.push(deparse_type_name(type_name)?);
    }
    if let Some(default) = &column_def.raw_default {
        output.push("DEFAULT".to_string());
        output.push(deparse_node(default, Context::None)?);
    }
    for constraint in &column_def.constraints {
        output.push(deparse_node(constraint, Context::None)?);
    }
    Ok(output.join(" "))
}

fn deparse_constraint(constraint: &Constraint) -> Result<String> {
    let mut output = Vec::new();
    if let Some(conname) = &constraint.conname {
        output.push(format!("CONSTRAINT {}", quote_ident(conname, false)));
    }
    let keyword = match constraint.contype {
        constr_type::NULL => "NULL",
        constr_type::NOTNULL => "NOT NULL",
        constr_type::DEFAULT => "DEFAULT",
        constr_type::CHECK => "CHECK",
        constr_type::PRIMARY => "PRIMARY KEY",
        constr_type::UNIQUE => "UNIQUE",
        constr_type::EXCLUSION => "EXCLUSION",
        constr_type::FOREIGN => "FOREIGN KEY",
        _ => {
            return Err(Error::UnsupportedNode {
                kind: "Constraint".to_string(),
                payload: format!("{:?}", constraint),
            })
        }
    };
    output.push(keyword.to_string());

    if let Some(raw_expr) = &constraint.raw_expr {
        let mut expression = deparse_node(raw_expr, Context::None)?;
        // Bool and plain operator expressions keep their enclosing
        // parentheses; other expressions render bare.
        let wrap = match raw_expr {
            Node::BoolExpr(_) => true,
            Node::AExpr(a_expr) => a_expr.kind == a_expr_kind::OP,
            _ => false,
        };
        if wrap {
            expression = format!("({})", expression);
        }
        output.push(expression);
    }

    if !constraint.keys.is_empty() {
        let keys: Vec<String> = constraint
            .keys
            .iter()
            .filter_map(|key| match key {
                Node::String(s) => Some(quote_ident(&s.value, true)),
                _ => None,
            })
            .collect();
        output.push(format!("({})", keys.join(", ")));
    }

    if constraint.contype == constr_type::FOREIGN {
        if !constraint.fk_attrs.is_empty() {
            let attrs: Vec<String> = constraint
                .fk_attrs
                .iter()
                .filter_map(|attr| match attr {
                    Node::String(s) => Some(quote_ident(&s.value, true)),
                    _ => None,
                })
                .collect();
            output.push(format!("({})", attrs.join(", ")));
        }
        if let Some(pktable) = &constraint.pktable {
            output.push(format!("REFERENCES {}", deparse_range_var(pktable)?));
            if !constraint.pk_attrs.is_empty() {
                let attrs: Vec<String> = constraint
                    .pk_attrs
                    .iter()
                    .filter_map(|attr| match attr {
                        Node::String(s) => Some(quote_ident(&s.value, true)),
                        _ => None,
                    })
                    .collect();
                output.push(format!("({})", attrs.join(", ")));
            }
        }
        if let Some(action) = constraint.fk_del_action.as_deref().and_then(fk_action_words) {
            output.push(format!("ON DELETE {}", action));
        }
        if let Some(action) = constraint.fk_upd_action.as_deref().and_then(fk_action_words) {
            output.push(format!("ON UPDATE {}", action));
        }
    }

    Ok(output.join(" "))
}

fn fk_action_words(action: &str) -> Option<&'static str> {
    match action {
        "r" => Some("RESTRICT"),
        "c" => Some("CASCADE"),
        "n" => Some("SET NULL"),
        "d" => Some("SET DEFAULT"),
        _ => None,
    }
}

fn deparse_def_elem(def_elem: &DefElem) -> Result<String> {
    match &def_elem.arg {
        Some(arg) => Ok(format!("{} {}", def_elem.defname, deparse_node(arg, Context::DefnameAs)?)),
        None => Ok(def_elem.defname.clone()),
    }
}

fn deparse_index_elem(index_elem: &IndexElem) -> Result<String> {
    match (&index_elem.name, &index_elem.expr) {
        (Some(name), _) => Ok(quote_ident(name, true)),
        (None, Some(expr)) => deparse_node(expr, Context::None),
        (None, None) => Ok(String::new()),
    }
}

fn deparse_role_spec(role: &RoleSpec) -> String {
    match role.roletype {
        role_spec_type::CURRENT_USER => "CURRENT_USER".to_string(),
        role_spec_type::SESSION_USER => "SESSION_USER".to_string(),
        role_spec_type::PUBLIC => "PUBLIC".to_string(),
        _ => quote_ident(role.rolename.as_deref().unwrap_or_default(), false),
    }
}

fn deparse_access_priv(access_priv: &AccessPriv) -> String {
    let name = match &access_priv.priv_name {
        Some(name) => name.to_ascii_uppercase(),
        None => "ALL".to_string(),
    };
    if access_priv.cols.is_empty() {
        name
    } else {
        let cols: Vec<String> = access_priv
            .cols
            .iter()
            .filter_map(|col| match col {
                Node::String(s) => Some(quote_ident(&s.value, true)),
                _ => None,
            })
            .collect();
        format!("{} ({})", name, cols.join(", "))
    }
}

// ============================================================================
// SELECT
// ============================================================================

fn deparse_select(select: &SelectStmt) -> Result<String> {
    let mut output = Vec::new();

    if let Some(with) = &select.with_clause {
        output.push(deparse_with_clause(with)?);
    }

    // Set operations render the combination and nothing else.
    if select.op != set_op::NONE {
        let keyword = match select.op {
            set_op::UNION => "UNION",
            set_op::INTERSECT => "INTERSECT",
            set_op::EXCEPT => "EXCEPT",
            _ => {
                return Err(Error::UnsupportedNode {
                    kind: "SelectStmt".to_string(),
                    payload: format!("op {}", select.op),
                })
            }
        };
        let larg = deparse_set_op_operand(select.larg.as_deref(), select)?;
        let rarg = deparse_set_op_operand(select.rarg.as_deref(), select)?;
        let all = if select.all { "ALL " } else { "" };
        output.push(format!("{} {} {}{}", larg, keyword, all, rarg));
        return Ok(output.join(" "));
    }

    // VALUES-only statements (the body of a plain INSERT) carry no target
    // list and no SELECT keyword.
    if !select.target_list.is_empty() {
        output.push("SELECT".to_string());

        if !select.distinct_clause.is_empty() {
            // A plain DISTINCT arrives as a single empty entry; DISTINCT ON
            // carries the expressions.
            if matches!(select.distinct_clause.first(), Some(Node::Null)) {
                output.push("DISTINCT".to_string());
            } else {
                output.push(format!("DISTINCT ON ({})", deparse_list(&select.distinct_clause, Context::None)?));
            }
        }

        let targets = select
            .target_list
            .iter()
            .map(|target| deparse_node(target, Context::Select))
            .collect::<Result<Vec<_>>>()?;
        output.push(targets.join(", "));
    }

    if let Some(into) = &select.into_clause {
        if let Some(rel) = &into.rel {
            output.push(format!("INTO {}", deparse_range_var(rel)?));
        }
    }

    if !select.from_clause.is_empty() {
        output.push(format!("FROM {}", deparse_list(&select.from_clause, Context::None)?));
    }

    if let Some(where_clause) = &select.where_clause {
        output.push(format!("WHERE {}", deparse_node(where_clause, Context::None)?));
    }

    if !select.values_lists.is_empty() {
        let rows = select
            .values_lists
            .iter()
            .map(|row| Ok(format!("({})", deparse_values_row(row)?)))
            .collect::<Result<Vec<_>>>()?;
        output.push(format!("VALUES {}", rows.join(", ")));
    }

    if !select.group_clause.is_empty() {
        output.push(format!("GROUP BY {}", deparse_list(&select.group_clause, Context::None)?));
    }

    if let Some(having) = &select.having_clause {
        output.push(format!("HAVING {}", deparse_node(having, Context::None)?));
    }

    if !select.sort_clause.is_empty() {
        output.push(format!("ORDER BY {}", deparse_list(&select.sort_clause, Context::None)?));
    }

    if let Some(limit) = &select.limit_count {
        output.push(format!("LIMIT {}", deparse_node(limit, Context::None)?));
    }

    if let Some(offset) = &select.limit_offset {
        output.push(format!("OFFSET {}", deparse_node(offset, Context::None)?));
    }

    for locking in &select.locking_clause {
        output.push(deparse_node(locking, Context::None)?);
    }

    Ok(output.join(" "))
}

/// A set-operation operand keeps its own parentheses when it carries an
/// ORDER BY, otherwise the sort would attach to the combination.
fn deparse_set_op_operand(operand: Option<&SelectStmt>, parent: &SelectStmt) -> Result<String> {
    let operand = operand.ok_or_else(|| Error::UnsupportedNode {
        kind: "SelectStmt".to_string(),
        payload: format!("op {} with a missing operand", parent.op),
    })?;
    let rendered = deparse_select(operand)?;
    if operand.sort_clause.is_empty() {
        Ok(rendered)
    } else {
        Ok(format!("({})", rendered))
    }
}

fn deparse_values_row(row: &Node) -> Result<String> {
    match row {
        Node::List(items) => deparse_list(items, Context::None),
        other => deparse_node(other, Context::None),
    }
}

// ============================================================================
// DML statements
// ============================================================================

fn deparse_insert(insert: &InsertStmt) -> Result<String> {
    let mut output = Vec::new();
    if let Some(with) = &insert.with_clause {
        output.push(deparse_with_clause(with)?);
    }
    output.push("INSERT INTO".to_string());

    let relation = insert.relation.as_ref().ok_or_else(|| Error::UnsupportedNode {
        kind: "InsertStmt".to_string(),
        payload: format!("{:?}", insert),
    })?;
    output.push(deparse_range_var(relation)?);

    if !insert.cols.is_empty() {
        let cols: Vec<String> = insert
            .cols
            .iter()
            .filter_map(|col| match col {
                Node::ResTarget(target) => target.name.as_deref().map(|name| quote_ident(name, true)),
                _ => None,
            })
            .collect();
        output.push(format!("({})", cols.join(", ")));
    }

    match &insert.select_stmt {
        Some(select) => output.push(deparse_node(select, Context::None)?),
        None => output.push("DEFAULT VALUES".to_string()),
    }

    if let Some(on_conflict) = &insert.on_conflict_clause {
        output.push(deparse_on_conflict(on_conflict)?);
    }

    if !insert.returning_list.is_empty() {
        let returning = insert
            .returning_list
            .iter()
            .map(|target| deparse_node(target, Context::Select))
            .collect::<Result<Vec<_>>>()?;
        output.push(format!("RETURNING {}", returning.join(", ")));
    }
    Ok(output.join(" "))
}

fn deparse_on_conflict(on_conflict: &OnConflictClause) -> Result<String> {
    let mut output = vec!["ON CONFLICT".to_string()];

    if let Some(infer) = &on_conflict.infer {
        if !infer.index_elems.is_empty() {
            let elems = infer
                .index_elems
                .iter()
                .map(|elem| deparse_node(elem, Context::None))
                .collect::<Result<Vec<_>>>()?;
            output.push(format!("({})", elems.join(", ")));
        } else if let Some(conname) = &infer.conname {
            output.push(format!("ON CONSTRAINT {}", quote_ident(conname, false)));
        }
        if let Some(where_clause) = &infer.where_clause {
            output.push(format!("WHERE {}", deparse_node(where_clause, Context::None)?));
        }
    }

    match on_conflict.action {
        on_conflict_action::NOTHING => output.push("DO NOTHING".to_string()),
        on_conflict_action::UPDATE => {
            output.push("DO UPDATE SET".to_string());
            let targets = on_conflict
                .target_list
                .iter()
                .map(|target| deparse_node(target, Context::Excluded))
                .collect::<Result<Vec<_>>>()?;
            output.push(targets.join(", "));
            if let Some(where_clause) = &on_conflict.where_clause {
                output.push(format!("WHERE {}", deparse_node(where_clause, Context::None)?));
            }
        }
        _ => {
            return Err(Error::UnsupportedNode {
                kind: "OnConflictClause".to_string(),
                payload: format!("{:?}", on_conflict),
            })
        }
    }
    Ok(output.join(" "))
}

fn deparse_update(update: &UpdateStmt) -> Result<String> {
    let mut output = Vec::new();
    if let Some(with) = &update.with_clause {
        output.push(deparse_with_clause(with)?);
    }
    output.push("UPDATE".to_string());

    let relation = update.relation.as_ref().ok_or_else(|| Error::UnsupportedNode {
        kind: "UpdateStmt".to_string(),
        payload: format!("{:?}", update),
    })?;
    output.push(deparse_range_var(relation)?);

    output.push("SET".to_string());
    let targets = update
        .target_list
        .iter()
        .map(|target| deparse_node(target, Context::Update))
        .collect::<Result<Vec<_>>>()?;
    output.push(targets.join(", "));

    if !update.from_clause.is_empty() {
        output.push(format!("FROM {}", deparse_list(&update.from_clause, Context::None)?));
    }
    if let Some(where_clause) = &update.where_clause {
        output.push(format!("WHERE {}", deparse_node(where_clause, Context::None)?));
    }
    if !update.returning_list.is_empty() {
        let returning = update
            .returning_list
            .iter()
            .map(|target| deparse_node(target, Context::Select))
            .collect::<Result<Vec<_>>>()?;
        output.push(format!("RETURNING {}", returning.join(", ")));
    }
    Ok(output.join(" "))
}

fn deparse_delete(delete: &DeleteStmt) -> Result<String> {
    let mut output = Vec::new();
    if let Some(with) = &delete.with_clause {
        output.push(deparse_with_clause(with)?);
    }
    output.push("DELETE FROM".to_string());

    let relation = delete.relation.as_ref().ok_or_else(|| Error::UnsupportedNode {
        kind: "DeleteStmt".to_string(),
        payload: format!("{:?}", delete),
    })?;
    output.push(deparse_range_var(relation)?);

    if !delete.using_clause.is_empty() {
        output.push(format!("USING {}", deparse_list(&delete.using_clause, Context::None)?));
    }
    if let Some(where_clause) = &delete.where_clause {
        output.push(format!("WHERE {}", deparse_node(where_clause, Context::None)?));
    }
    if !delete.returning_list.is_empty() {
        let returning = delete
            .returning_list
            .iter()
            .map(|target| deparse_node(target, Context::Select))
            .collect::<Result<Vec<_>>>()?;
        output.push(format!("RETURNING {}", returning.join(", ")));
    }
    Ok(output.join(" "))
}

fn deparse_copy(copy: &CopyStmt) -> Result<String> {
    let mut output = vec!["COPY".to_string()];

    if let Some(relation) = &copy.relation {
        output.push(deparse_range_var(relation)?);
        if !copy.attlist.is_empty() {
            let cols: Vec<String> = copy
                .attlist
                .iter()
                .filter_map(|col| match col {
                    Node::String(s) => Some(quote_ident(&s.value, true)),
                    _ => None,
                })
                .collect();
            output.push(format!("({})", cols.join(", ")));
        }
    } else if let Some(query) = &copy.query {
        output.push(format!("({})", deparse_node(query, Context::None)?));
    }

    output.push(if copy.is_from { "FROM" } else { "TO" }.to_string());
    match &copy.filename {
        Some(filename) => output.push(format!("'{}'", filename.replace('\'', "''"))),
        None => output.push(if copy.is_from { "STDIN" } else { "STDOUT" }.to_string()),
    }

    if !copy.options.is_empty() {
        let options = copy
            .options
            .iter()
            .map(|option| deparse_node(option, Context::None))
            .collect::<Result<Vec<_>>>()?;
        output.push(format!("WITH ({})", options.join(", ")));
    }
    Ok(output.join(" "))
}

// ============================================================================
// DDL statements
// ============================================================================

fn object_kind_word(object_type: i32) -> Option<&'static str> {
    OBJECT_KIND_WORDS.iter().find(|(kind, _)| *kind == object_type).map(|(_, word)| *word)
}

fn persistence_word(relation: Option<&RangeVar>) -> Option<&'static str> {
    match relation.and_then(|rel| rel.relpersistence.as_deref()) {
        Some("t") => Some("TEMPORARY"),
        Some("u") => Some("UNLOGGED"),
        _ => None,
    }
}

fn deparse_create(create: &CreateStmt) -> Result<String> {
    let mut output = vec!["CREATE".to_string()];
    if let Some(word) = persistence_word(create.relation.as_ref()) {
        output.push(word.to_string());
    }
    output.push("TABLE".to_string());
    if create.if_not_exists {
        output.push("IF NOT EXISTS".to_string());
    }

    let relation = create.relation.as_ref().ok_or_else(|| Error::UnsupportedNode {
        kind: "CreateStmt".to_string(),
        payload: format!("{:?}", create),
    })?;
    output.push(deparse_range_var(relation)?);

    let elements = create
        .table_elts
        .iter()
        .map(|element| deparse_node(element, Context::None))
        .collect::<Result<Vec<_>>>()?;
    output.push(format!("({})", elements.join(", ")));

    if !create.inh_relations.is_empty() {
        output.push(format!("INHERITS ({})", deparse_list(&create.inh_relations, Context::None)?));
    }
    match create.oncommit {
        on_commit_action::DELETE_ROWS => output.push("ON COMMIT DELETE ROWS".to_string()),
        on_commit_action::DROP => output.push("ON COMMIT DROP".to_string()),
        _ => {}
    }
    Ok(output.join(" "))
}

fn deparse_create_table_as(ctas: &CreateTableAsStmt) -> Result<String> {
    let mut output = vec!["CREATE".to_string()];
    let into = ctas.into.as_ref().ok_or_else(|| Error::UnsupportedNode {
        kind: "CreateTableAsStmt".to_string(),
        payload: format!("{:?}", ctas),
    })?;

    if let Some(word) = persistence_word(into.rel.as_ref()) {
        output.push(word.to_string());
    }
    if ctas.relkind == object_type::MATVIEW {
        output.push("MATERIALIZED VIEW".to_string());
    } else {
        output.push("TABLE".to_string());
    }
    if ctas.if_not_exists {
        output.push("IF NOT EXISTS".to_string());
    }

    let rel = into.rel.as_ref().ok_or_else(|| Error::UnsupportedNode {
        kind: "IntoClause".to_string(),
        payload: format!("{:?}", into),
    })?;
    output.push(deparse_range_var(rel)?);

    output.push("AS".to_string());
    match &ctas.query {
        Some(query) => output.push(deparse_node(query, Context::None)?),
        None => {
            return Err(Error::UnsupportedNode { kind: "CreateTableAsStmt".to_string(), payload: format!("{:?}", ctas) })
        }
    }
    if into.skip_data {
        output.push("WITH NO DATA".to_string());
    }
    Ok(output.join(" "))
}

fn deparse_view(view: &ViewStmt) -> Result<String> {
    let mut output = vec!["CREATE".to_string()];
    if view.replace {
        output.push("OR REPLACE".to_string());
    }
    output.push("VIEW".to_string());

    let rel = view.view.as_ref().ok_or_else(|| Error::UnsupportedNode {
        kind: "ViewStmt".to_string(),
        payload: format!("{:?}", view),
    })?;
    output.push(deparse_range_var(rel)?);

    if !view.aliases.is_empty() {
        let cols: Vec<String> = view
            .aliases
            .iter()
            .filter_map(|col| match col {
                Node::String(s) => Some(quote_ident(&s.value, true)),
                _ => None,
            })
            .collect();
        output.push(format!("({})", cols.join(", ")));
    }

    output.push("AS".to_string());
    match &view.query {
        Some(query) => output.push(deparse_node(query, Context::None)?),
        None => return Err(Error::UnsupportedNode { kind: "ViewStmt".to_string(), payload: format!("{:?}", view) }),
    }
    Ok(output.join(" "))
}

fn deparse_alter_table(alter: &AlterTableStmt) -> Result<String> {
    let word = match alter.relkind {
        0 => "TABLE",
        other => object_kind_word(other).unwrap_or("TABLE"),
    };
    let mut output = vec!["ALTER".to_string(), word.to_string()];
    if alter.missing_ok {
        output.push("IF EXISTS".to_string());
    }

    let relation = alter.relation.as_ref().ok_or_else(|| Error::UnsupportedNode {
        kind: "AlterTableStmt".to_string(),
        payload: format!("{:?}", alter),
    })?;
    output.push(deparse_range_var(relation)?);

    let cmds = alter.cmds.iter().map(|cmd| deparse_node(cmd, Context::None)).collect::<Result<Vec<_>>>()?;
    output.push(cmds.join(", "));
    Ok(output.join(" "))
}

fn deparse_alter_table_cmd(cmd: &AlterTableCmd) -> Result<String> {
    let name = cmd.name.as_deref().map(|name| quote_ident(name, true));
    let cascade = cmd.behavior == drop_behavior::CASCADE;

    let mut output = match cmd.subtype {
        alter_table_type::ADD_COLUMN => {
            let def = cmd.def.as_ref().map(|def| deparse_node(def, Context::None)).transpose()?;
            format!("ADD COLUMN {}", def.unwrap_or_default())
        }
        alter_table_type::COLUMN_DEFAULT => match &cmd.def {
            Some(def) => {
                format!("ALTER COLUMN {} SET DEFAULT {}", name.unwrap_or_default(), deparse_node(def, Context::None)?)
            }
            None => format!("ALTER COLUMN {} DROP DEFAULT", name.unwrap_or_default()),
        },
        alter_table_type::DROP_NOT_NULL => format!("ALTER COLUMN {} DROP NOT NULL", name.unwrap_or_default()),
        alter_table_type::SET_NOT_NULL => format!("ALTER COLUMN {} SET NOT NULL", name.unwrap_or_default()),
        alter_table_type::DROP_COLUMN => format!("DROP COLUMN {}", name.unwrap_or_default()),
        alter_table_type::ADD_CONSTRAINT => {
            let def = cmd.def.as_ref().map(|def| deparse_node(def, Context::None)).transpose()?;
            format!("ADD {}", def.unwrap_or_default())
        }
        alter_table_type::DROP_CONSTRAINT => format!("DROP CONSTRAINT {}", name.unwrap_or_default()),
        alter_table_type::ALTER_COLUMN_TYPE => {
            let type_name = match &cmd.def {
                Some(Node::ColumnDef(column_def)) => {
                    column_def.type_name.as_ref().map(deparse_type_name).transpose()?
                }
                Some(other) => Some(deparse_node(other, Context::None)?),
                None => None,
            };
            format!("ALTER COLUMN {} TYPE {}", name.unwrap_or_default(), type_name.unwrap_or_default())
        }
        _ => {
            return Err(Error::UnsupportedNode {
                kind: "AlterTableCmd".to_string(),
                payload: format!("{:?}", cmd),
            })
        }
    };

    if cascade {
        output.push_str(" CASCADE");
    }
    Ok(output)
}

fn deparse_rename(rename: &RenameStmt) -> Result<String> {
    let relation = rename.relation.as_ref().ok_or_else(|| Error::UnsupportedNode {
        kind: "RenameStmt".to_string(),
        payload: format!("{:?}", rename),
    })?;
    let newname = rename.newname.as_deref().ok_or_else(|| Error::UnsupportedNode {
        kind: "RenameStmt".to_string(),
        payload: format!("{:?}", rename),
    })?;

    match rename.rename_type {
        object_type::COLUMN => {
            let subname = rename.subname.as_deref().unwrap_or_default();
            Ok(format!(
                "ALTER TABLE {} RENAME COLUMN {} TO {}",
                deparse_range_var(relation)?,
                quote_ident(subname, true),
                quote_ident(newname, true)
            ))
        }
        other => {
            let word = object_kind_word(other).ok_or_else(|| Error::UnsupportedNode {
                kind: "RenameStmt".to_string(),
                payload: format!("{:?}", rename),
            })?;
            Ok(format!("ALTER {} {} RENAME TO {}", word, deparse_range_var(relation)?, quote_ident(newname, true)))
        }
    }
}

fn deparse_truncate(truncate: &TruncateStmt) -> Result<String> {
    let mut output = vec!["TRUNCATE TABLE".to_string()];
    output.push(deparse_list(&truncate.relations, Context::None)?);
    if truncate.restart_seqs {
        output.push("RESTART IDENTITY".to_string());
    }
    if truncate.behavior == drop_behavior::CASCADE {
        output.push("CASCADE".to_string());
    }
    Ok(output.join(" "))
}

fn deparse_drop(drop: &DropStmt) -> Result<String> {
    let word = object_kind_word(drop.remove_type).ok_or_else(|| Error::UnsupportedNode {
        kind: "DropStmt".to_string(),
        payload: format!("{:?}", drop),
    })?;
    let mut output = vec!["DROP".to_string(), word.to_string()];
    if drop.concurrent {
        output.push("CONCURRENTLY".to_string());
    }
    if drop.missing_ok {
        output.push("IF EXISTS".to_string());
    }

    // DROP RULE and DROP TRIGGER name the object first, then its table.
    if matches!(drop.remove_type, object_type::RULE | object_type::TRIGGER) {
        let parts = match drop.objects.first() {
            Some(Node::List(parts)) if !parts.is_empty() => parts,
            _ => {
                return Err(Error::UnsupportedNode { kind: "DropStmt".to_string(), payload: format!("{:?}", drop) })
            }
        };
        let (object, table) = parts.split_last().expect("checked non-empty");
        output.push(deparse_node(object, Context::None)?);
        output.push("ON".to_string());
        let table = table.iter().map(|part| deparse_node(part, Context::None)).collect::<Result<Vec<_>>>()?;
        output.push(table.join("."));
    } else {
        let objects = drop
            .objects
            .iter()
            .map(|object| match object {
                Node::List(parts) => {
                    let parts = parts.iter().map(|part| deparse_node(part, Context::None)).collect::<Result<Vec<_>>>()?;
                    Ok(parts.join("."))
                }
                other => deparse_node(other, Context::None),
            })
            .collect::<Result<Vec<_>>>()?;
        output.push(objects.join(", "));
    }

    if drop.behavior == drop_behavior::CASCADE {
        output.push("CASCADE".to_string());
    }
    Ok(output.join(" "))
}

fn deparse_grant(grant: &GrantStmt) -> Result<String> {
    let mut output = vec![if grant.is_grant { "GRANT" } else { "REVOKE" }.to_string()];

    if grant.privileges.is_empty() {
        output.push("ALL".to_string());
    } else {
        output.push(deparse_list(&grant.privileges, Context::None)?);
    }

    output.push("ON".to_string());
    if grant.objtype == object_type::SEQUENCE {
        output.push("SEQUENCE".to_string());
    }
    output.push(deparse_list(&grant.objects, Context::None)?);

    output.push(if grant.is_grant { "TO" } else { "FROM" }.to_string());
    output.push(deparse_list(&grant.grantees, Context::None)?);

    if grant.is_grant && grant.grant_option {
        output.push("WITH GRANT OPTION".to_string());
    }
    Ok(output.join(" "))
}

fn deparse_lock(lock: &LockStmt) -> Result<String> {
    let mut output = vec!["LOCK TABLE".to_string()];
    output.push(deparse_list(&lock.relations, Context::None)?);

    let mode = LOCK_MODE_WORDS.iter().find(|(mode, _)| *mode == lock.mode).map(|(_, word)| *word);
    match mode {
        Some(word) => output.push(format!("IN {} MODE", word)),
        None => {
            return Err(Error::UnsupportedNode { kind: "LockStmt".to_string(), payload: format!("{:?}", lock) })
        }
    }
    if lock.nowait {
        output.push("NOWAIT".to_string());
    }
    Ok(output.join(" "))
}

fn deparse_vacuum(vacuum: &VacuumStmt) -> Result<String> {
    let mut output = vec![if vacuum.is_vacuumcmd { "VACUUM" } else { "ANALYZE" }.to_string()];
    for option in &vacuum.options {
        if let Node::DefElem(def_elem) = option {
            output.push(def_elem.defname.to_ascii_uppercase());
        }
    }
    for rel in &vacuum.rels {
        output.push(deparse_node(rel, Context::None)?);
    }
    Ok(output.join(" "))
}

fn deparse_vacuum_relation(vacuum_relation: &VacuumRelation) -> Result<String> {
    let relation = match &vacuum_relation.relation {
        Some(relation) => deparse_range_var(relation)?,
        None => String::new(),
    };
    if vacuum_relation.va_cols.is_empty() {
        Ok(relation)
    } else {
        let cols: Vec<String> = vacuum_relation
            .va_cols
            .iter()
            .filter_map(|col| match col {
                Node::String(s) => Some(quote_ident(&s.value, true)),
                _ => None,
            })
            .collect();
        Ok(format!("{} ({})", relation, cols.join(", ")))
    }
}

fn deparse_explain(explain: &ExplainStmt) -> Result<String> {
    let mut output = vec!["EXPLAIN".to_string()];
    if !explain.options.is_empty() {
        let options: Vec<String> = explain
            .options
            .iter()
            .filter_map(|option| match option {
                Node::DefElem(def_elem) => Some(def_elem.defname.to_ascii_uppercase()),
                _ => None,
            })
            .collect();
        output.push(format!("({})", options.join(", ")));
    }
    match &explain.query {
        Some(query) => output.push(deparse_node(query, Context::None)?),
        None => {
            return Err(Error::UnsupportedNode { kind: "ExplainStmt".to_string(), payload: format!("{:?}", explain) })
        }
    }
    Ok(output.join(" "))
}

fn deparse_transaction(transaction: &TransactionStmt) -> Result<String> {
    let savepoint = transaction.savepoint_name.as_deref();
    match transaction.kind {
        transaction_kind::BEGIN => Ok("BEGIN".to_string()),
        transaction_kind::COMMIT => Ok("COMMIT".to_string()),
        transaction_kind::ROLLBACK => Ok("ROLLBACK".to_string()),
        transaction_kind::SAVEPOINT => Ok(match savepoint {
            Some(name) => format!("SAVEPOINT {}", quote_ident(name, false)),
            None => "SAVEPOINT".to_string(),
        }),
        transaction_kind::RELEASE => Ok(match savepoint {
            Some(name) => format!("RELEASE SAVEPOINT {}", quote_ident(name, false)),
            None => "RELEASE SAVEPOINT".to_string(),
        }),
        transaction_kind::ROLLBACK_TO => Ok(match savepoint {
            Some(name) => format!("ROLLBACK TO SAVEPOINT {}", quote_ident(name, false)),
            None => "ROLLBACK TO SAVEPOINT".to_string(),
        }),
        kind => Err(Error::UnsupportedTransactionKind { kind }),
    }
}

fn deparse_variable_set(set: &VariableSetStmt, node: &Node) -> Result<String> {
    match set.kind {
        variable_set_kind::SET_VALUE => {
            let mut output = vec!["SET".to_string()];
            if set.is_local {
                output.push("LOCAL".to_string());
            }
            output.push(set.name.clone().unwrap_or_default());
            output.push("TO".to_string());
            output.push(deparse_list(&set.args, Context::None)?);
            Ok(output.join(" "))
        }
        variable_set_kind::RESET => Ok(format!("RESET {}", set.name.clone().unwrap_or_default())),
        _ => Err(unsupported(node)),
    }
}

fn deparse_variable_show(show: &VariableShowStmt) -> Result<String> {
    Ok(format!("SHOW {}", show.name.clone().unwrap_or_default()))
}

fn deparse_refresh_mat_view(refresh: &RefreshMatViewStmt) -> Result<String> {
    let mut output = vec!["REFRESH MATERIALIZED VIEW".to_string()];
    if refresh.concurrent {
        output.push("CONCURRENTLY".to_string());
    }
    let relation = refresh.relation.as_ref().ok_or_else(|| Error::UnsupportedNode {
        kind: "RefreshMatViewStmt".to_string(),
        payload: format!("{:?}", refresh),
    })?;
    output.push(deparse_range_var(relation)?);
    Ok(output.join(" "))
}
