//! Conversion from parse tree JSON to native AST types.
//!
//! Every node in the wire format is an object with exactly one key (the node
//! kind) whose value is the payload object. [`Node`] deserializes by reading
//! that key and dispatching to the matching payload struct; kinds without a
//! handler become [`Node::Unknown`] so the reference extractor can walk trees
//! produced by newer parsers than this crate knows about.

use serde::de::{self, Deserialize, DeserializeOwned, Deserializer};
use serde_json::Value;

use crate::ast::nodes::*;

/// Serde default helper for fields the parser emits as `true` when absent.
pub(crate) fn default_true() -> bool {
    true
}

/// Node kinds whose payloads unwrap into a specific struct.
///
/// Used by the `tagged` deserializers for fields that always hold one kind,
/// e.g. `SelectStmt.withClause` is always a `WithClause`.
pub(crate) trait Tagged {
    const KIND: &'static str;
}

macro_rules! tagged {
    ($($ty:ident => $kind:literal),* $(,)?) => {
        $(impl Tagged for $ty {
            const KIND: &'static str = $kind;
        })*
    };
}

tagged! {
    Alias => "Alias",
    InferClause => "InferClause",
    IntoClause => "IntoClause",
    OnConflictClause => "OnConflictClause",
    RangeVar => "RangeVar",
    SelectStmt => "SelectStmt",
    TypeName => "TypeName",
    WindowDef => "WindowDef",
    WithClause => "WithClause",
}

/// Deserializes an optional single-kind field, unwrapping its tag.
pub(crate) fn tagged<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Tagged,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Object(mut map) => {
            let payload = map
                .remove(T::KIND)
                .ok_or_else(|| de::Error::custom(format!("expected a {} node", T::KIND)))?;
            serde_json::from_value(payload).map(Some).map_err(de::Error::custom)
        }
        other => Err(de::Error::custom(format!("expected a {} node, found {}", T::KIND, other))),
    }
}

/// Like [`tagged`], producing a boxed value for recursive fields.
pub(crate) fn tagged_box<'de, D, T>(deserializer: D) -> Result<Option<Box<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Tagged,
{
    tagged(deserializer).map(|opt| opt.map(Box::new))
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        node_from_value(value).map_err(de::Error::custom)
    }
}

fn payload<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(value)
}

/// Converts one JSON value into a [`Node`].
///
/// Arrays become [`Node::List`], `null` becomes [`Node::Null`], and objects
/// dispatch on their single key.
pub(crate) fn node_from_value(value: Value) -> Result<Node, serde_json::Error> {
    use serde::de::Error as _;

    let map = match value {
        Value::Null => return Ok(Node::Null),
        Value::Array(items) => {
            let nodes = items.into_iter().map(node_from_value).collect::<Result<Vec<_>, _>>()?;
            return Ok(Node::List(nodes));
        }
        Value::Object(map) => map,
        other => return Err(serde_json::Error::custom(format!("expected a tagged node object, found {}", other))),
    };

    if map.len() != 1 {
        return Err(serde_json::Error::custom(format!("expected exactly one node kind key, found {}", map.len())));
    }
    let (kind, value) = map.into_iter().next().expect("length checked above");

    let node = match kind.as_str() {
        "Integer" => Node::Integer(payload(value)?),
        "Float" => Node::Float(payload(value)?),
        "String" => Node::String(payload(value)?),
        "BitString" => Node::BitString(payload(value)?),
        "Null" => Node::Null,
        "List" => Node::List(payload(value)?),
        "RawStmt" => Node::RawStmt(Box::new(payload(value)?)),
        "SelectStmt" => Node::SelectStmt(Box::new(payload(value)?)),
        "InsertStmt" => Node::InsertStmt(Box::new(payload(value)?)),
        "UpdateStmt" => Node::UpdateStmt(Box::new(payload(value)?)),
        "DeleteStmt" => Node::DeleteStmt(Box::new(payload(value)?)),
        "CopyStmt" => Node::CopyStmt(Box::new(payload(value)?)),
        "CreateStmt" => Node::CreateStmt(Box::new(payload(value)?)),
        "AlterTableStmt" => Node::AlterTableStmt(Box::new(payload(value)?)),
        "AlterTableCmd" => Node::AlterTableCmd(Box::new(payload(value)?)),
        "RenameStmt" => Node::RenameStmt(Box::new(payload(value)?)),
        "DropStmt" => Node::DropStmt(Box::new(payload(value)?)),
        "TruncateStmt" => Node::TruncateStmt(Box::new(payload(value)?)),
        "IndexStmt" => Node::IndexStmt(Box::new(payload(value)?)),
        "CreateTrigStmt" => Node::CreateTrigStmt(Box::new(payload(value)?)),
        "RuleStmt" => Node::RuleStmt(Box::new(payload(value)?)),
        "ViewStmt" => Node::ViewStmt(Box::new(payload(value)?)),
        "CreateTableAsStmt" => Node::CreateTableAsStmt(Box::new(payload(value)?)),
        "RefreshMatViewStmt" => Node::RefreshMatViewStmt(Box::new(payload(value)?)),
        "GrantStmt" => Node::GrantStmt(Box::new(payload(value)?)),
        "LockStmt" => Node::LockStmt(Box::new(payload(value)?)),
        "VacuumStmt" => Node::VacuumStmt(Box::new(payload(value)?)),
        "VacuumRelation" => Node::VacuumRelation(Box::new(payload(value)?)),
        "ExplainStmt" => Node::ExplainStmt(Box::new(payload(value)?)),
        "TransactionStmt" => Node::TransactionStmt(Box::new(payload(value)?)),
        "VariableSetStmt" => Node::VariableSetStmt(Box::new(payload(value)?)),
        "VariableShowStmt" => Node::VariableShowStmt(Box::new(payload(value)?)),
        "A_Expr" => Node::AExpr(Box::new(payload(value)?)),
        "ColumnRef" => Node::ColumnRef(Box::new(payload(value)?)),
        "ParamRef" => Node::ParamRef(Box::new(payload(value)?)),
        "A_Const" => Node::AConst(Box::new(payload(value)?)),
        "TypeCast" => Node::TypeCast(Box::new(payload(value)?)),
        "CollateClause" => Node::CollateClause(Box::new(payload(value)?)),
        "FuncCall" => Node::FuncCall(Box::new(payload(value)?)),
        "NamedArgExpr" => Node::NamedArgExpr(Box::new(payload(value)?)),
        "SQLValueFunction" => Node::SqlValueFunction(Box::new(payload(value)?)),
        "A_Star" => Node::AStar,
        "A_Indices" => Node::AIndices(Box::new(payload(value)?)),
        "A_Indirection" => Node::AIndirection(Box::new(payload(value)?)),
        "A_ArrayExpr" => Node::AArrayExpr(Box::new(payload(value)?)),
        "SubLink" => Node::SubLink(Box::new(payload(value)?)),
        "BoolExpr" => Node::BoolExpr(Box::new(payload(value)?)),
        "NullTest" => Node::NullTest(Box::new(payload(value)?)),
        "BooleanTest" => Node::BooleanTest(Box::new(payload(value)?)),
        "CaseExpr" => Node::CaseExpr(Box::new(payload(value)?)),
        "CaseWhen" => Node::CaseWhen(Box::new(payload(value)?)),
        "CoalesceExpr" => Node::CoalesceExpr(Box::new(payload(value)?)),
        "MinMaxExpr" => Node::MinMaxExpr(Box::new(payload(value)?)),
        "RowExpr" => Node::RowExpr(Box::new(payload(value)?)),
        "SetToDefault" => Node::SetToDefault,
        "ResTarget" => Node::ResTarget(Box::new(payload(value)?)),
        "RangeVar" => Node::RangeVar(Box::new(payload(value)?)),
        "RangeSubselect" => Node::RangeSubselect(Box::new(payload(value)?)),
        "RangeFunction" => Node::RangeFunction(Box::new(payload(value)?)),
        "JoinExpr" => Node::JoinExpr(Box::new(payload(value)?)),
        "SortBy" => Node::SortBy(Box::new(payload(value)?)),
        "WindowDef" => Node::WindowDef(Box::new(payload(value)?)),
        "WithClause" => Node::WithClause(Box::new(payload(value)?)),
        "CommonTableExpr" => Node::CommonTableExpr(Box::new(payload(value)?)),
        "IntoClause" => Node::IntoClause(Box::new(payload(value)?)),
        "OnConflictClause" => Node::OnConflictClause(Box::new(payload(value)?)),
        "InferClause" => Node::InferClause(Box::new(payload(value)?)),
        "LockingClause" => Node::LockingClause(Box::new(payload(value)?)),
        "TypeName" => Node::TypeName(Box::new(payload(value)?)),
        "ColumnDef" => Node::ColumnDef(Box::new(payload(value)?)),
        "Constraint" => Node::Constraint(Box::new(payload(value)?)),
        "DefElem" => Node::DefElem(Box::new(payload(value)?)),
        "IndexElem" => Node::IndexElem(Box::new(payload(value)?)),
        "Alias" => Node::Alias(Box::new(payload(value)?)),
        "RoleSpec" => Node::RoleSpec(Box::new(payload(value)?)),
        "AccessPriv" => Node::AccessPriv(Box::new(payload(value)?)),
        _ => Node::Unknown { kind, payload: value },
    };

    Ok(node)
}
