//! Typed AST node definitions for PostgreSQL parse trees.
//!
//! These types mirror the parse tree emitted by the external parser. Every
//! node arrives as a JSON object with exactly one key (the node kind) whose
//! value is the payload object; payload structs below deserialize those
//! payloads, with absent fields falling back to their defaults. Fields that
//! always hold one specific node kind are typed directly and unwrapped from
//! their tag during deserialization; heterogeneous positions stay [`Node`].

use serde::Deserialize;

use crate::ast::convert::{self, default_true};

/// A raw statement wrapper with location information.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RawStmt {
    /// The statement node, absent for empty input.
    pub stmt: Option<Node>,
    /// Character offset in source where the statement starts.
    pub stmt_location: i32,
    /// Length of the statement in characters (0 means "rest of string").
    pub stmt_len: i32,
}

/// The main AST node enum containing all supported node kinds.
///
/// Kinds the walkers do not model are preserved as [`Node::Unknown`] so the
/// reference extractor stays forward compatible; the deparser rejects them.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // Primitive value types
    Integer(Integer),
    Float(Float),
    String(StringValue),
    BitString(BitString),
    Null,

    // Nested list (JSON arrays inside node fields)
    List(Vec<Node>),

    // Statement types
    RawStmt(Box<RawStmt>),
    SelectStmt(Box<SelectStmt>),
    InsertStmt(Box<InsertStmt>),
    UpdateStmt(Box<UpdateStmt>),
    DeleteStmt(Box<DeleteStmt>),
    CopyStmt(Box<CopyStmt>),

    // DDL statements
    CreateStmt(Box<CreateStmt>),
    AlterTableStmt(Box<AlterTableStmt>),
    AlterTableCmd(Box<AlterTableCmd>),
    RenameStmt(Box<RenameStmt>),
    DropStmt(Box<DropStmt>),
    TruncateStmt(Box<TruncateStmt>),
    IndexStmt(Box<IndexStmt>),
    CreateTrigStmt(Box<CreateTrigStmt>),
    RuleStmt(Box<RuleStmt>),
    ViewStmt(Box<ViewStmt>),
    CreateTableAsStmt(Box<CreateTableAsStmt>),
    RefreshMatViewStmt(Box<RefreshMatViewStmt>),

    // Administrative statements
    GrantStmt(Box<GrantStmt>),
    LockStmt(Box<LockStmt>),
    VacuumStmt(Box<VacuumStmt>),
    VacuumRelation(Box<VacuumRelation>),
    ExplainStmt(Box<ExplainStmt>),
    TransactionStmt(Box<TransactionStmt>),
    VariableSetStmt(Box<VariableSetStmt>),
    VariableShowStmt(Box<VariableShowStmt>),

    // Expression types
    AExpr(Box<AExpr>),
    ColumnRef(Box<ColumnRef>),
    ParamRef(Box<ParamRef>),
    AConst(Box<AConst>),
    TypeCast(Box<TypeCast>),
    CollateClause(Box<CollateClause>),
    FuncCall(Box<FuncCall>),
    NamedArgExpr(Box<NamedArgExpr>),
    SqlValueFunction(Box<SqlValueFunction>),
    AStar,
    AIndices(Box<AIndices>),
    AIndirection(Box<AIndirection>),
    AArrayExpr(Box<AArrayExpr>),
    SubLink(Box<SubLink>),
    BoolExpr(Box<BoolExpr>),
    NullTest(Box<NullTest>),
    BooleanTest(Box<BooleanTest>),
    CaseExpr(Box<CaseExpr>),
    CaseWhen(Box<CaseWhen>),
    CoalesceExpr(Box<CoalesceExpr>),
    MinMaxExpr(Box<MinMaxExpr>),
    RowExpr(Box<RowExpr>),
    SetToDefault,

    // Target/Result types
    ResTarget(Box<ResTarget>),

    // Table/Range types
    RangeVar(Box<RangeVar>),
    RangeSubselect(Box<RangeSubselect>),
    RangeFunction(Box<RangeFunction>),
    JoinExpr(Box<JoinExpr>),

    // Clause types
    SortBy(Box<SortBy>),
    WindowDef(Box<WindowDef>),
    WithClause(Box<WithClause>),
    CommonTableExpr(Box<CommonTableExpr>),
    IntoClause(Box<IntoClause>),
    OnConflictClause(Box<OnConflictClause>),
    InferClause(Box<InferClause>),
    LockingClause(Box<LockingClause>),

    // Type-related
    TypeName(Box<TypeName>),
    ColumnDef(Box<ColumnDef>),
    Constraint(Box<Constraint>),
    DefElem(Box<DefElem>),
    IndexElem(Box<IndexElem>),

    // Alias and role types
    Alias(Box<Alias>),
    RoleSpec(Box<RoleSpec>),
    AccessPriv(Box<AccessPriv>),

    // Fallback for unhandled node kinds - stores the raw payload
    Unknown { kind: String, payload: serde_json::Value },
}

impl Node {
    /// The node kind as spelled in the parse tree JSON.
    pub fn kind(&self) -> &str {
        match self {
            Node::Integer(_) => "Integer",
            Node::Float(_) => "Float",
            Node::String(_) => "String",
            Node::BitString(_) => "BitString",
            Node::Null => "Null",
            Node::List(_) => "List",
            Node::RawStmt(_) => "RawStmt",
            Node::SelectStmt(_) => "SelectStmt",
            Node::InsertStmt(_) => "InsertStmt",
            Node::UpdateStmt(_) => "UpdateStmt",
            Node::DeleteStmt(_) => "DeleteStmt",
            Node::CopyStmt(_) => "CopyStmt",
            Node::CreateStmt(_) => "CreateStmt",
            Node::AlterTableStmt(_) => "AlterTableStmt",
            Node::AlterTableCmd(_) => "AlterTableCmd",
            Node::RenameStmt(_) => "RenameStmt",
            Node::DropStmt(_) => "DropStmt",
            Node::TruncateStmt(_) => "TruncateStmt",
            Node::IndexStmt(_) => "IndexStmt",
            Node::CreateTrigStmt(_) => "CreateTrigStmt",
            Node::RuleStmt(_) => "RuleStmt",
            Node::ViewStmt(_) => "ViewStmt",
            Node::CreateTableAsStmt(_) => "CreateTableAsStmt",
            Node::RefreshMatViewStmt(_) => "RefreshMatViewStmt",
            Node::GrantStmt(_) => "GrantStmt",
            Node::LockStmt(_) => "LockStmt",
            Node::VacuumStmt(_) => "VacuumStmt",
            Node::VacuumRelation(_) => "VacuumRelation",
            Node::ExplainStmt(_) => "ExplainStmt",
            Node::TransactionStmt(_) => "TransactionStmt",
            Node::VariableSetStmt(_) => "VariableSetStmt",
            Node::VariableShowStmt(_) => "VariableShowStmt",
            Node::AExpr(_) => "A_Expr",
            Node::ColumnRef(_) => "ColumnRef",
            Node::ParamRef(_) => "ParamRef",
            Node::AConst(_) => "A_Const",
            Node::TypeCast(_) => "TypeCast",
            Node::CollateClause(_) => "CollateClause",
            Node::FuncCall(_) => "FuncCall",
            Node::NamedArgExpr(_) => "NamedArgExpr",
            Node::SqlValueFunction(_) => "SQLValueFunction",
            Node::AStar => "A_Star",
            Node::AIndices(_) => "A_Indices",
            Node::AIndirection(_) => "A_Indirection",
            Node::AArrayExpr(_) => "A_ArrayExpr",
            Node::SubLink(_) => "SubLink",
            Node::BoolExpr(_) => "BoolExpr",
            Node::NullTest(_) => "NullTest",
            Node::BooleanTest(_) => "BooleanTest",
            Node::CaseExpr(_) => "CaseExpr",
            Node::CaseWhen(_) => "CaseWhen",
            Node::CoalesceExpr(_) => "CoalesceExpr",
            Node::MinMaxExpr(_) => "MinMaxExpr",
            Node::RowExpr(_) => "RowExpr",
            Node::SetToDefault => "SetToDefault",
            Node::ResTarget(_) => "ResTarget",
            Node::RangeVar(_) => "RangeVar",
            Node::RangeSubselect(_) => "RangeSubselect",
            Node::RangeFunction(_) => "RangeFunction",
            Node::JoinExpr(_) => "JoinExpr",
            Node::SortBy(_) => "SortBy",
            Node::WindowDef(_) => "WindowDef",
            Node::WithClause(_) => "WithClause",
            Node::CommonTableExpr(_) => "CommonTableExpr",
            Node::IntoClause(_) => "IntoClause",
            Node::OnConflictClause(_) => "OnConflictClause",
            Node::InferClause(_) => "InferClause",
            Node::LockingClause(_) => "LockingClause",
            Node::TypeName(_) => "TypeName",
            Node::ColumnDef(_) => "ColumnDef",
            Node::Constraint(_) => "Constraint",
            Node::DefElem(_) => "DefElem",
            Node::IndexElem(_) => "IndexElem",
            Node::Alias(_) => "Alias",
            Node::RoleSpec(_) => "RoleSpec",
            Node::AccessPriv(_) => "AccessPriv",
            Node::Unknown { kind, .. } => kind,
        }
    }
}

// ============================================================================
// Primitive value types
// ============================================================================

/// Integer value
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Integer {
    pub ival: i64,
}

/// Float value (stored as string)
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Float {
    #[serde(rename = "str")]
    pub value: String,
}

/// String value
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct StringValue {
    #[serde(rename = "str")]
    pub value: String,
}

/// Bit string value
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct BitString {
    #[serde(rename = "str")]
    pub value: String,
}

// ============================================================================
// Core statement types
// ============================================================================

/// SELECT statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SelectStmt {
    #[serde(rename = "distinctClause")]
    pub distinct_clause: Vec<Node>,
    #[serde(rename = "intoClause", deserialize_with = "convert::tagged")]
    pub into_clause: Option<IntoClause>,
    #[serde(rename = "targetList")]
    pub target_list: Vec<Node>,
    #[serde(rename = "fromClause")]
    pub from_clause: Vec<Node>,
    #[serde(rename = "whereClause")]
    pub where_clause: Option<Node>,
    #[serde(rename = "groupClause")]
    pub group_clause: Vec<Node>,
    #[serde(rename = "havingClause")]
    pub having_clause: Option<Node>,
    #[serde(rename = "windowClause")]
    pub window_clause: Vec<Node>,
    #[serde(rename = "valuesLists")]
    pub values_lists: Vec<Node>,
    #[serde(rename = "sortClause")]
    pub sort_clause: Vec<Node>,
    #[serde(rename = "limitCount")]
    pub limit_count: Option<Node>,
    #[serde(rename = "limitOffset")]
    pub limit_offset: Option<Node>,
    #[serde(rename = "lockingClause")]
    pub locking_clause: Vec<Node>,
    #[serde(rename = "withClause", deserialize_with = "convert::tagged")]
    pub with_clause: Option<WithClause>,
    pub op: i32,
    pub all: bool,
    #[serde(deserialize_with = "convert::tagged_box")]
    pub larg: Option<Box<SelectStmt>>,
    #[serde(deserialize_with = "convert::tagged_box")]
    pub rarg: Option<Box<SelectStmt>>,
}

/// INSERT statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct InsertStmt {
    #[serde(deserialize_with = "convert::tagged")]
    pub relation: Option<RangeVar>,
    pub cols: Vec<Node>,
    #[serde(rename = "selectStmt")]
    pub select_stmt: Option<Node>,
    #[serde(rename = "onConflictClause", deserialize_with = "convert::tagged")]
    pub on_conflict_clause: Option<OnConflictClause>,
    #[serde(rename = "returningList")]
    pub returning_list: Vec<Node>,
    #[serde(rename = "withClause", deserialize_with = "convert::tagged")]
    pub with_clause: Option<WithClause>,
}

/// UPDATE statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct UpdateStmt {
    #[serde(deserialize_with = "convert::tagged")]
    pub relation: Option<RangeVar>,
    #[serde(rename = "targetList")]
    pub target_list: Vec<Node>,
    #[serde(rename = "whereClause")]
    pub where_clause: Option<Node>,
    #[serde(rename = "fromClause")]
    pub from_clause: Vec<Node>,
    #[serde(rename = "returningList")]
    pub returning_list: Vec<Node>,
    #[serde(rename = "withClause", deserialize_with = "convert::tagged")]
    pub with_clause: Option<WithClause>,
}

/// DELETE statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct DeleteStmt {
    #[serde(deserialize_with = "convert::tagged")]
    pub relation: Option<RangeVar>,
    #[serde(rename = "usingClause")]
    pub using_clause: Vec<Node>,
    #[serde(rename = "whereClause")]
    pub where_clause: Option<Node>,
    #[serde(rename = "returningList")]
    pub returning_list: Vec<Node>,
    #[serde(rename = "withClause", deserialize_with = "convert::tagged")]
    pub with_clause: Option<WithClause>,
}

/// COPY statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CopyStmt {
    #[serde(deserialize_with = "convert::tagged")]
    pub relation: Option<RangeVar>,
    pub query: Option<Node>,
    pub attlist: Vec<Node>,
    pub is_from: bool,
    pub is_program: bool,
    pub filename: Option<String>,
    pub options: Vec<Node>,
}

// ============================================================================
// DDL statement types
// ============================================================================

/// CREATE TABLE statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CreateStmt {
    #[serde(deserialize_with = "convert::tagged")]
    pub relation: Option<RangeVar>,
    #[serde(rename = "tableElts")]
    pub table_elts: Vec<Node>,
    #[serde(rename = "inhRelations")]
    pub inh_relations: Vec<Node>,
    pub constraints: Vec<Node>,
    pub options: Vec<Node>,
    pub oncommit: i32,
    pub if_not_exists: bool,
}

/// ALTER TABLE statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AlterTableStmt {
    #[serde(deserialize_with = "convert::tagged")]
    pub relation: Option<RangeVar>,
    pub cmds: Vec<Node>,
    #[serde(alias = "objtype")]
    pub relkind: i32,
    pub missing_ok: bool,
}

/// A single ALTER TABLE action
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AlterTableCmd {
    pub subtype: i32,
    pub name: Option<String>,
    pub def: Option<Node>,
    pub behavior: i32,
    pub missing_ok: bool,
}

/// ALTER ... RENAME statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RenameStmt {
    #[serde(rename = "renameType")]
    pub rename_type: i32,
    #[serde(deserialize_with = "convert::tagged")]
    pub relation: Option<RangeVar>,
    pub subname: Option<String>,
    pub newname: Option<String>,
    pub missing_ok: bool,
}

/// DROP statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct DropStmt {
    pub objects: Vec<Node>,
    #[serde(rename = "removeType")]
    pub remove_type: i32,
    pub behavior: i32,
    pub missing_ok: bool,
    pub concurrent: bool,
}

/// TRUNCATE statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TruncateStmt {
    pub relations: Vec<Node>,
    pub restart_seqs: bool,
    pub behavior: i32,
}

/// CREATE INDEX statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct IndexStmt {
    pub idxname: Option<String>,
    #[serde(deserialize_with = "convert::tagged")]
    pub relation: Option<RangeVar>,
    #[serde(rename = "accessMethod")]
    pub access_method: Option<String>,
    #[serde(rename = "indexParams")]
    pub index_params: Vec<Node>,
    #[serde(rename = "whereClause")]
    pub where_clause: Option<Node>,
    pub unique: bool,
    pub concurrent: bool,
    pub if_not_exists: bool,
}

/// CREATE TRIGGER statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CreateTrigStmt {
    pub trigname: String,
    #[serde(deserialize_with = "convert::tagged")]
    pub relation: Option<RangeVar>,
    pub funcname: Vec<Node>,
    pub args: Vec<Node>,
    pub row: bool,
    pub timing: i32,
    pub events: i32,
    pub columns: Vec<Node>,
    #[serde(rename = "whenClause")]
    pub when_clause: Option<Node>,
}

/// CREATE RULE statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RuleStmt {
    #[serde(deserialize_with = "convert::tagged")]
    pub relation: Option<RangeVar>,
    pub rulename: String,
    #[serde(rename = "whereClause")]
    pub where_clause: Option<Node>,
    pub event: i32,
    pub instead: bool,
    pub actions: Vec<Node>,
    pub replace: bool,
}

/// CREATE VIEW statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ViewStmt {
    #[serde(deserialize_with = "convert::tagged")]
    pub view: Option<RangeVar>,
    pub aliases: Vec<Node>,
    pub query: Option<Node>,
    pub replace: bool,
    pub options: Vec<Node>,
}

/// CREATE TABLE AS / CREATE MATERIALIZED VIEW AS statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CreateTableAsStmt {
    pub query: Option<Node>,
    #[serde(deserialize_with = "convert::tagged")]
    pub into: Option<IntoClause>,
    #[serde(alias = "objtype")]
    pub relkind: i32,
    pub is_select_into: bool,
    pub if_not_exists: bool,
}

/// REFRESH MATERIALIZED VIEW statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RefreshMatViewStmt {
    pub concurrent: bool,
    #[serde(rename = "skipData")]
    pub skip_data: bool,
    #[serde(deserialize_with = "convert::tagged")]
    pub relation: Option<RangeVar>,
}

// ============================================================================
// Administrative statement types
// ============================================================================

/// GRANT / REVOKE statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GrantStmt {
    pub is_grant: bool,
    pub targtype: i32,
    pub objtype: i32,
    pub objects: Vec<Node>,
    pub privileges: Vec<Node>,
    pub grantees: Vec<Node>,
    pub grant_option: bool,
    pub behavior: i32,
}

/// LOCK TABLE statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LockStmt {
    pub relations: Vec<Node>,
    pub mode: i32,
    pub nowait: bool,
}

/// VACUUM / ANALYZE statement
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VacuumStmt {
    pub options: Vec<Node>,
    pub rels: Vec<Node>,
    pub is_vacuumcmd: bool,
}

impl Default for VacuumStmt {
    fn default() -> Self {
        VacuumStmt { options: Vec::new(), rels: Vec::new(), is_vacuumcmd: true }
    }
}

/// A single relation targeted by VACUUM
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct VacuumRelation {
    #[serde(deserialize_with = "convert::tagged")]
    pub relation: Option<RangeVar>,
    pub va_cols: Vec<Node>,
}

/// EXPLAIN statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ExplainStmt {
    pub query: Option<Node>,
    pub options: Vec<Node>,
}

/// Transaction statement (BEGIN, COMMIT, ROLLBACK, savepoints)
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TransactionStmt {
    pub kind: i32,
    pub options: Vec<Node>,
    pub savepoint_name: Option<String>,
}

/// SET statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct VariableSetStmt {
    pub kind: i32,
    pub name: Option<String>,
    pub args: Vec<Node>,
    pub is_local: bool,
}

/// SHOW statement
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct VariableShowStmt {
    pub name: Option<String>,
}

// ============================================================================
// Expression types
// ============================================================================

/// An expression with an operator (e.g. `a + b`, `x = 1`)
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AExpr {
    pub kind: i32,
    pub name: Vec<Node>,
    pub lexpr: Option<Node>,
    pub rexpr: Option<Node>,
    pub location: Option<i32>,
}

/// Column reference (e.g. `t.column`)
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ColumnRef {
    pub fields: Vec<Node>,
    pub location: Option<i32>,
}

/// Parameter reference (`$1`, `$2`, ...)
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ParamRef {
    pub number: i32,
    pub location: Option<i32>,
}

/// A constant value; `val` holds the primitive node
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AConst {
    pub val: Option<Node>,
    pub location: Option<i32>,
}

/// Type cast expression
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TypeCast {
    pub arg: Option<Node>,
    #[serde(rename = "typeName", deserialize_with = "convert::tagged")]
    pub type_name: Option<TypeName>,
    pub location: Option<i32>,
}

/// COLLATE clause
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CollateClause {
    pub arg: Option<Node>,
    pub collname: Vec<Node>,
}

/// Function call
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct FuncCall {
    pub funcname: Vec<Node>,
    pub args: Vec<Node>,
    pub agg_order: Vec<Node>,
    pub agg_filter: Option<Node>,
    pub agg_star: bool,
    pub agg_distinct: bool,
    pub func_variadic: bool,
    #[serde(deserialize_with = "convert::tagged")]
    pub over: Option<WindowDef>,
    pub location: Option<i32>,
}

/// Named function argument (`name := value`)
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct NamedArgExpr {
    pub arg: Option<Node>,
    pub name: String,
    pub location: Option<i32>,
}

/// Keyword-spelled value function (CURRENT_DATE, SESSION_USER, ...)
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SqlValueFunction {
    pub op: i32,
    pub location: Option<i32>,
}

/// Array subscript or slice
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AIndices {
    pub is_slice: bool,
    pub lidx: Option<Node>,
    pub uidx: Option<Node>,
}

/// Subscripted or field-selected expression
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AIndirection {
    pub arg: Option<Node>,
    pub indirection: Vec<Node>,
}

/// ARRAY[...] constructor
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AArrayExpr {
    pub elements: Vec<Node>,
    pub location: Option<i32>,
}

/// Sub-select inside an expression
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SubLink {
    #[serde(rename = "subLinkType")]
    pub sub_link_type: i32,
    pub testexpr: Option<Node>,
    #[serde(rename = "operName")]
    pub oper_name: Vec<Node>,
    pub subselect: Option<Node>,
    pub location: Option<i32>,
}

/// AND / OR / NOT combination
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct BoolExpr {
    pub boolop: i32,
    pub args: Vec<Node>,
    pub location: Option<i32>,
}

/// IS [NOT] NULL test
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct NullTest {
    pub arg: Option<Node>,
    pub nulltesttype: i32,
    pub location: Option<i32>,
}

/// IS [NOT] TRUE / FALSE / UNKNOWN test
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct BooleanTest {
    pub arg: Option<Node>,
    pub booltesttype: i32,
    pub location: Option<i32>,
}

/// CASE expression
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CaseExpr {
    pub arg: Option<Node>,
    pub args: Vec<Node>,
    pub defresult: Option<Node>,
    pub location: Option<i32>,
}

/// A single WHEN arm of a CASE expression
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CaseWhen {
    pub expr: Option<Node>,
    pub result: Option<Node>,
    pub location: Option<i32>,
}

/// COALESCE(...)
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CoalesceExpr {
    pub args: Vec<Node>,
    pub location: Option<i32>,
}

/// GREATEST / LEAST
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MinMaxExpr {
    pub op: i32,
    pub args: Vec<Node>,
    pub location: Option<i32>,
}

/// Row constructor
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RowExpr {
    pub args: Vec<Node>,
    pub row_format: i32,
    pub location: Option<i32>,
}

// ============================================================================
// Target/Result types
// ============================================================================

/// A result target: a SELECT output column or a SET assignment
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ResTarget {
    pub name: Option<String>,
    pub indirection: Vec<Node>,
    pub val: Option<Node>,
    pub location: Option<i32>,
}

// ============================================================================
// Table/Range types
// ============================================================================

/// A schema-qualified table reference with optional alias
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RangeVar {
    pub schemaname: Option<String>,
    pub relname: String,
    #[serde(default = "default_true")]
    pub inh: bool,
    pub relpersistence: Option<String>,
    #[serde(deserialize_with = "convert::tagged")]
    pub alias: Option<Alias>,
    pub location: Option<i32>,
}

impl Default for RangeVar {
    fn default() -> Self {
        RangeVar { schemaname: None, relname: String::new(), inh: true, relpersistence: None, alias: None, location: None }
    }
}

/// A parenthesized sub-select in FROM
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RangeSubselect {
    pub lateral: bool,
    pub subquery: Option<Node>,
    #[serde(deserialize_with = "convert::tagged")]
    pub alias: Option<Alias>,
}

/// A function call in FROM
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RangeFunction {
    pub lateral: bool,
    pub ordinality: bool,
    pub functions: Vec<Node>,
    #[serde(deserialize_with = "convert::tagged")]
    pub alias: Option<Alias>,
}

/// JOIN between two FROM items
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct JoinExpr {
    pub jointype: i32,
    #[serde(rename = "isNatural")]
    pub is_natural: bool,
    pub larg: Option<Node>,
    pub rarg: Option<Node>,
    #[serde(rename = "usingClause")]
    pub using_clause: Vec<Node>,
    pub quals: Option<Node>,
    #[serde(deserialize_with = "convert::tagged")]
    pub alias: Option<Alias>,
}

// ============================================================================
// Clause types
// ============================================================================

/// ORDER BY item
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SortBy {
    pub node: Option<Node>,
    pub sortby_dir: i32,
    pub sortby_nulls: i32,
    #[serde(rename = "useOp")]
    pub use_op: Vec<Node>,
    pub location: Option<i32>,
}

/// Window specification for OVER and WINDOW clauses
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct WindowDef {
    pub name: Option<String>,
    pub refname: Option<String>,
    #[serde(rename = "partitionClause")]
    pub partition_clause: Vec<Node>,
    #[serde(rename = "orderClause")]
    pub order_clause: Vec<Node>,
    #[serde(rename = "frameOptions")]
    pub frame_options: i32,
    #[serde(rename = "startOffset")]
    pub start_offset: Option<Node>,
    #[serde(rename = "endOffset")]
    pub end_offset: Option<Node>,
    pub location: Option<i32>,
}

/// WITH clause
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct WithClause {
    pub ctes: Vec<Node>,
    pub recursive: bool,
}

/// A single common table expression
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CommonTableExpr {
    pub ctename: String,
    pub aliascolnames: Vec<Node>,
    pub ctequery: Option<Node>,
}

/// SELECT ... INTO / CREATE TABLE AS target
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct IntoClause {
    #[serde(deserialize_with = "convert::tagged")]
    pub rel: Option<RangeVar>,
    #[serde(rename = "colNames")]
    pub col_names: Vec<Node>,
    pub options: Vec<Node>,
    #[serde(rename = "onCommit")]
    pub on_commit: i32,
    pub skip_data: bool,
}

/// ON CONFLICT clause of INSERT
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct OnConflictClause {
    pub action: i32,
    #[serde(deserialize_with = "convert::tagged")]
    pub infer: Option<InferClause>,
    #[serde(rename = "targetList")]
    pub target_list: Vec<Node>,
    #[serde(rename = "whereClause")]
    pub where_clause: Option<Node>,
}

/// Conflict target of ON CONFLICT
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct InferClause {
    #[serde(rename = "indexElems")]
    pub index_elems: Vec<Node>,
    #[serde(rename = "whereClause")]
    pub where_clause: Option<Node>,
    pub conname: Option<String>,
}

/// FOR UPDATE / FOR SHARE clause
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LockingClause {
    #[serde(rename = "lockedRels")]
    pub locked_rels: Vec<Node>,
    pub strength: i32,
    #[serde(rename = "waitPolicy")]
    pub wait_policy: i32,
}

// ============================================================================
// Type-related
// ============================================================================

/// A (possibly qualified, possibly modified) type name
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TypeName {
    pub names: Vec<Node>,
    pub setof: bool,
    pub typmods: Vec<Node>,
    pub typemod: i32,
    #[serde(rename = "arrayBounds")]
    pub array_bounds: Vec<Node>,
    pub location: Option<i32>,
}

/// Column definition in CREATE TABLE / ALTER TABLE
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ColumnDef {
    pub colname: String,
    #[serde(rename = "typeName", deserialize_with = "convert::tagged")]
    pub type_name: Option<TypeName>,
    pub constraints: Vec<Node>,
    pub raw_default: Option<Node>,
}

/// Column or table constraint
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Constraint {
    pub contype: i32,
    pub conname: Option<String>,
    pub raw_expr: Option<Node>,
    pub keys: Vec<Node>,
    #[serde(deserialize_with = "convert::tagged")]
    pub pktable: Option<RangeVar>,
    pub fk_attrs: Vec<Node>,
    pub pk_attrs: Vec<Node>,
    pub fk_upd_action: Option<String>,
    pub fk_del_action: Option<String>,
}

/// Generic definition element (name/value option)
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct DefElem {
    pub defnamespace: Option<String>,
    pub defname: String,
    pub arg: Option<Node>,
    pub defaction: i32,
    pub location: Option<i32>,
}

/// Index column or expression
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct IndexElem {
    pub name: Option<String>,
    pub expr: Option<Node>,
    pub collation: Vec<Node>,
    pub opclass: Vec<Node>,
    pub ordering: i32,
    pub nulls_ordering: i32,
}

// ============================================================================
// Alias and role types
// ============================================================================

/// Table alias
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Alias {
    pub aliasname: String,
    pub colnames: Vec<Node>,
}

/// Role reference in GRANT and owner clauses
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RoleSpec {
    pub roletype: i32,
    pub rolename: Option<String>,
}

/// A single privilege in GRANT
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AccessPriv {
    pub priv_name: Option<String>,
    pub cols: Vec<Node>,
}

// ============================================================================
// Wire enumeration constants
// ============================================================================
//
// Integer discriminators as emitted by the parser. Frozen contract; only the
// values the walkers dispatch on are named.

/// `SelectStmt.op` set-operation codes.
pub mod set_op {
    pub const NONE: i32 = 0;
    pub const UNION: i32 = 1;
    pub const INTERSECT: i32 = 2;
    pub const EXCEPT: i32 = 3;
}

/// `JoinExpr.jointype` codes.
pub mod join_type {
    pub const INNER: i32 = 0;
    pub const LEFT: i32 = 1;
    pub const FULL: i32 = 2;
    pub const RIGHT: i32 = 3;
}

/// `BoolExpr.boolop` codes.
pub mod bool_op {
    pub const AND: i32 = 0;
    pub const OR: i32 = 1;
    pub const NOT: i32 = 2;
}

/// `A_Expr.kind` codes.
pub mod a_expr_kind {
    pub const OP: i32 = 0;
    pub const OP_ANY: i32 = 1;
    pub const OP_ALL: i32 = 2;
    pub const DISTINCT: i32 = 3;
    pub const NULLIF: i32 = 5;
    pub const IN: i32 = 7;
    pub const LIKE: i32 = 8;
    pub const ILIKE: i32 = 9;
    pub const BETWEEN: i32 = 11;
    pub const NOT_BETWEEN: i32 = 12;
    pub const BETWEEN_SYM: i32 = 13;
    pub const NOT_BETWEEN_SYM: i32 = 14;
}

/// `SubLink.subLinkType` codes.
pub mod sub_link_type {
    pub const EXISTS: i32 = 0;
    pub const ALL: i32 = 1;
    pub const ANY: i32 = 2;
    pub const ARRAY: i32 = 6;
}

/// `NullTest.nulltesttype` codes.
pub mod null_test_type {
    pub const IS_NULL: i32 = 0;
    pub const IS_NOT_NULL: i32 = 1;
}

/// `MinMaxExpr.op` codes.
pub mod min_max_op {
    pub const GREATEST: i32 = 0;
    pub const LEAST: i32 = 1;
}

/// `SortBy.sortby_dir` / `SortBy.sortby_nulls` codes.
pub mod sort_by {
    pub const ASC: i32 = 1;
    pub const DESC: i32 = 2;
    pub const USING: i32 = 3;
    pub const NULLS_FIRST: i32 = 1;
    pub const NULLS_LAST: i32 = 2;
}

/// `Constraint.contype` codes.
pub mod constr_type {
    pub const NULL: i32 = 0;
    pub const NOTNULL: i32 = 1;
    pub const DEFAULT: i32 = 2;
    pub const CHECK: i32 = 4;
    pub const PRIMARY: i32 = 5;
    pub const UNIQUE: i32 = 6;
    pub const EXCLUSION: i32 = 7;
    pub const FOREIGN: i32 = 8;
}

/// `OnConflictClause.action` codes.
pub mod on_conflict_action {
    pub const NOTHING: i32 = 1;
    pub const UPDATE: i32 = 2;
}

/// `TransactionStmt.kind` codes.
pub mod transaction_kind {
    pub const BEGIN: i32 = 0;
    pub const COMMIT: i32 = 2;
    pub const ROLLBACK: i32 = 3;
    pub const SAVEPOINT: i32 = 4;
    pub const RELEASE: i32 = 5;
    pub const ROLLBACK_TO: i32 = 6;
}

/// `LockingClause.strength` codes.
pub mod lock_strength {
    pub const FOR_KEY_SHARE: i32 = 1;
    pub const FOR_SHARE: i32 = 2;
    pub const FOR_NO_KEY_UPDATE: i32 = 3;
    pub const FOR_UPDATE: i32 = 4;
}

/// `LockingClause.waitPolicy` codes.
pub mod lock_wait_policy {
    pub const BLOCK: i32 = 0;
    pub const SKIP: i32 = 1;
    pub const ERROR: i32 = 2;
}

/// `RoleSpec.roletype` codes.
pub mod role_spec_type {
    pub const CURRENT_USER: i32 = 1;
    pub const SESSION_USER: i32 = 2;
    pub const PUBLIC: i32 = 3;
}

/// `IntoClause.onCommit` codes.
pub mod on_commit_action {
    pub const NOOP: i32 = 0;
    pub const DELETE_ROWS: i32 = 2;
    pub const DROP: i32 = 3;
}

/// `DropStmt.behavior` codes.
pub mod drop_behavior {
    pub const RESTRICT: i32 = 0;
    pub const CASCADE: i32 = 1;
}

/// Object kind codes shared by DROP, GRANT, RENAME and ALTER statements.
pub mod object_type {
    pub const AGGREGATE: i32 = 1;
    pub const COLUMN: i32 = 6;
    pub const DATABASE: i32 = 9;
    pub const DOMAIN: i32 = 12;
    pub const EXTENSION: i32 = 15;
    pub const FOREIGN_TABLE: i32 = 18;
    pub const FUNCTION: i32 = 19;
    pub const INDEX: i32 = 20;
    pub const MATVIEW: i32 = 23;
    pub const RULE: i32 = 31;
    pub const SCHEMA: i32 = 32;
    pub const SEQUENCE: i32 = 33;
    pub const TABLE: i32 = 37;
    pub const TRIGGER: i32 = 40;
    pub const TYPE: i32 = 45;
    pub const VIEW: i32 = 47;
}

/// `AlterTableCmd.subtype` codes.
pub mod alter_table_type {
    pub const ADD_COLUMN: i32 = 0;
    pub const COLUMN_DEFAULT: i32 = 3;
    pub const DROP_NOT_NULL: i32 = 4;
    pub const SET_NOT_NULL: i32 = 5;
    pub const DROP_COLUMN: i32 = 10;
    pub const ADD_CONSTRAINT: i32 = 14;
    pub const DROP_CONSTRAINT: i32 = 22;
    pub const ALTER_COLUMN_TYPE: i32 = 25;
}

/// `SQLValueFunction.op` codes.
pub mod sql_value_function_op {
    pub const CURRENT_DATE: i32 = 0;
    pub const CURRENT_TIME: i32 = 1;
    pub const CURRENT_TIMESTAMP: i32 = 3;
    pub const LOCALTIME: i32 = 5;
    pub const LOCALTIMESTAMP: i32 = 7;
    pub const CURRENT_ROLE: i32 = 9;
    pub const CURRENT_USER: i32 = 10;
    pub const USER: i32 = 11;
    pub const SESSION_USER: i32 = 12;
    pub const CURRENT_CATALOG: i32 = 13;
    pub const CURRENT_SCHEMA: i32 = 14;
}

/// LOCK TABLE lock mode numbers.
pub mod lock_mode {
    pub const ACCESS_SHARE: i32 = 1;
    pub const ROW_SHARE: i32 = 2;
    pub const ROW_EXCLUSIVE: i32 = 3;
    pub const SHARE_UPDATE_EXCLUSIVE: i32 = 4;
    pub const SHARE: i32 = 5;
    pub const SHARE_ROW_EXCLUSIVE: i32 = 6;
    pub const EXCLUSIVE: i32 = 7;
    pub const ACCESS_EXCLUSIVE: i32 = 8;
}

/// `VariableSetStmt.kind` codes.
pub mod variable_set_kind {
    pub const SET_VALUE: i32 = 0;
    pub const RESET: i32 = 4;
}
