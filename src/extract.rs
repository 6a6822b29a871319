//! Table reference extraction.
//!
//! Walks a parse tree and reports every table a query touches, classified by
//! how the query uses it: read (`select`), written (`dml`), or structurally
//! altered (`ddl`). CTE names and table aliases are collected along the way,
//! and references to CTEs are not reported as tables.
//!
//! The walk is queue-driven rather than recursive: statement-like nodes,
//! expression nodes that may hide a sub-select, and candidate relation
//! references each go through their own queue, and the loop runs until all
//! queues drain. Unknown node kinds are skipped, so trees from newer parsers
//! degrade gracefully instead of failing.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::ast::*;

/// How a statement uses a referenced table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceType {
    /// Read by a SELECT (or the read side of COPY TO).
    Select,
    /// Written by INSERT, UPDATE, DELETE or COPY FROM.
    Dml,
    /// Structurally altered: CREATE, ALTER, DROP, TRUNCATE, VACUUM, GRANT,
    /// LOCK, index/trigger/rule/view statements.
    Ddl,
}

/// A single table reference found in a parse tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableReference {
    /// Schema qualifier, when the query spells one.
    pub schema: Option<String>,
    /// Relation name.
    pub relname: String,
    /// How the table is used.
    pub reference_type: ReferenceType,
    /// Character offset of the reference in the original SQL, when known.
    pub location: Option<i32>,
    /// Inheritance flag of the underlying RangeVar, when the reference came
    /// from one.
    pub inh: Option<bool>,
}

impl TableReference {
    /// The qualified name: `schema.relname` when a schema is present.
    pub fn name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.relname),
            None => self.relname.clone(),
        }
    }
}

/// Everything the extractor finds in one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tables {
    /// De-duplicated table references in discovery order.
    pub tables: Vec<TableReference>,
    /// Alias name to qualified table name. Last write wins on collision.
    pub aliases: HashMap<String, String>,
    /// CTE names in discovery order, de-duplicated.
    pub cte_names: Vec<String>,
}

impl Tables {
    /// Qualified names of every referenced table.
    pub fn names(&self) -> Vec<String> {
        self.tables.iter().map(TableReference::name).collect()
    }

    /// Qualified names of tables read by SELECT.
    pub fn select_tables(&self) -> Vec<String> {
        self.names_of(ReferenceType::Select)
    }

    /// Qualified names of tables written by DML.
    pub fn dml_tables(&self) -> Vec<String> {
        self.names_of(ReferenceType::Dml)
    }

    /// Qualified names of tables touched by DDL.
    pub fn ddl_tables(&self) -> Vec<String> {
        self.names_of(ReferenceType::Ddl)
    }

    fn names_of(&self, reference_type: ReferenceType) -> Vec<String> {
        self.tables.iter().filter(|t| t.reference_type == reference_type).map(TableReference::name).collect()
    }
}

/// A statement-queue entry. Set-operation operands arrive as bare
/// `SelectStmt` payloads rather than wrapped nodes, so the queue carries both.
enum StmtItem<'a> {
    Node(&'a Node),
    Select(&'a SelectStmt),
}

/// A candidate relation reference with its usage tag attached.
enum FromItem<'a> {
    Node(&'a Node),
    Range(&'a RangeVar),
}

/// Extracts table references, aliases and CTE names from a parse tree.
///
/// Never fails: unknown node kinds contribute no references and missing
/// optional fields are treated as absent.
pub fn extract_tables(stmts: &[RawStmt]) -> Tables {
    Walk::default().run(stmts)
}

#[derive(Default)]
struct Walk<'a> {
    statements: VecDeque<StmtItem<'a>>,
    subselect_items: VecDeque<&'a Node>,
    from_clause_items: VecDeque<(FromItem<'a>, ReferenceType)>,
    tables: Vec<TableReference>,
    aliases: HashMap<String, String>,
    cte_names: Vec<String>,
}

impl<'a> Walk<'a> {
    fn run(mut self, stmts: &'a [RawStmt]) -> Tables {
        for raw in stmts {
            if let Some(stmt) = &raw.stmt {
                self.statements.push_back(StmtItem::Node(stmt));
            }
        }

        loop {
            if let Some(item) = self.statements.pop_front() {
                match item {
                    StmtItem::Node(node) => self.statement(node),
                    StmtItem::Select(select) => self.select(select),
                }
            }

            if let Some(expr) = self.subselect_items.pop_front() {
                self.subselect(expr);
            }

            if self.statements.is_empty() && self.subselect_items.is_empty() {
                break;
            }
        }

        self.drain_from_clause_items();

        dedup(&mut self.tables);
        dedup(&mut self.cte_names);

        Tables { tables: self.tables, aliases: self.aliases, cte_names: self.cte_names }
    }

    /// Dispatches one statement-like node and harvests its expression fields.
    fn statement(&mut self, node: &'a Node) {
        match node {
            Node::RawStmt(raw) => {
                if let Some(stmt) = &raw.stmt {
                    self.statements.push_back(StmtItem::Node(stmt));
                }
            }
            Node::SelectStmt(select) => self.select(select),
            Node::InsertStmt(insert) => {
                self.relation(insert.relation.as_ref(), ReferenceType::Dml);
                if let Some(query) = &insert.select_stmt {
                    self.statements.push_back(StmtItem::Node(query));
                }
                self.with_clause(insert.with_clause.as_ref());
            }
            Node::UpdateStmt(update) => {
                self.relation(update.relation.as_ref(), ReferenceType::Dml);
                self.with_clause(update.with_clause.as_ref());
                self.harvest(&update.target_list, update.where_clause.as_ref(), &[], &[], None);
            }
            Node::DeleteStmt(delete) => {
                self.relation(delete.relation.as_ref(), ReferenceType::Dml);
                self.with_clause(delete.with_clause.as_ref());
                self.harvest(&[], delete.where_clause.as_ref(), &[], &[], None);
            }
            Node::CopyStmt(copy) => {
                let reference_type = if copy.is_from { ReferenceType::Dml } else { ReferenceType::Select };
                self.relation(copy.relation.as_ref(), reference_type);
                if let Some(query) = &copy.query {
                    self.statements.push_back(StmtItem::Node(query));
                }
            }
            Node::AlterTableStmt(alter) => self.relation(alter.relation.as_ref(), ReferenceType::Ddl),
            Node::CreateStmt(create) => self.relation(create.relation.as_ref(), ReferenceType::Ddl),
            Node::IndexStmt(index) => self.relation(index.relation.as_ref(), ReferenceType::Ddl),
            Node::CreateTrigStmt(trig) => self.relation(trig.relation.as_ref(), ReferenceType::Ddl),
            Node::RuleStmt(rule) => self.relation(rule.relation.as_ref(), ReferenceType::Ddl),
            Node::RefreshMatViewStmt(refresh) => self.relation(refresh.relation.as_ref(), ReferenceType::Ddl),
            Node::ViewStmt(view) => {
                self.relation(view.view.as_ref(), ReferenceType::Ddl);
                if let Some(query) = &view.query {
                    self.statements.push_back(StmtItem::Node(query));
                }
            }
            Node::CreateTableAsStmt(ctas) => {
                if let Some(into) = &ctas.into {
                    self.relation(into.rel.as_ref(), ReferenceType::Ddl);
                }
                if let Some(query) = &ctas.query {
                    self.statements.push_back(StmtItem::Node(query));
                }
            }
            Node::TruncateStmt(truncate) => {
                for rel in &truncate.relations {
                    self.from_clause_items.push_back((FromItem::Node(rel), ReferenceType::Ddl));
                }
            }
            Node::LockStmt(lock) => {
                for rel in &lock.relations {
                    self.from_clause_items.push_back((FromItem::Node(rel), ReferenceType::Ddl));
                }
            }
            Node::VacuumStmt(vacuum) => {
                for rel in &vacuum.rels {
                    if let Node::VacuumRelation(vr) = rel {
                        self.relation(vr.relation.as_ref(), ReferenceType::Ddl);
                    }
                }
            }
            Node::GrantStmt(grant) => {
                // COLUMN and SEQUENCE grants are currently elided.
                if grant.objtype == object_type::TABLE {
                    for object in &grant.objects {
                        self.from_clause_items.push_back((FromItem::Node(object), ReferenceType::Ddl));
                    }
                }
            }
            Node::DropStmt(drop) => self.drop_stmt(drop),
            Node::ExplainStmt(explain) => {
                if let Some(query) = &explain.query {
                    self.statements.push_back(StmtItem::Node(query));
                }
            }
            // Unknown statement kinds contribute nothing.
            _ => {}
        }
    }

    /// Leaf or set-operation SELECT.
    fn select(&mut self, select: &'a SelectStmt) {
        if select.op == set_op::NONE {
            for item in &select.from_clause {
                if let Node::RangeSubselect(sub) = item {
                    if let Some(query) = &sub.subquery {
                        self.statements.push_back(StmtItem::Node(query));
                    }
                } else {
                    self.from_clause_items.push_back((FromItem::Node(item), ReferenceType::Select));
                }
            }
            self.with_clause(select.with_clause.as_ref());
        } else {
            if let Some(larg) = select.larg.as_deref() {
                self.statements.push_back(StmtItem::Select(larg));
            }
            if let Some(rarg) = select.rarg.as_deref() {
                self.statements.push_back(StmtItem::Select(rarg));
            }
        }

        self.harvest(
            &select.target_list,
            select.where_clause.as_ref(),
            &select.sort_clause,
            &select.group_clause,
            select.having_clause.as_ref(),
        );
    }

    /// Collects expression sources that may contain sub-selects.
    fn harvest(
        &mut self,
        target_list: &'a [Node],
        where_clause: Option<&'a Node>,
        sort_clause: &'a [Node],
        group_clause: &'a [Node],
        having_clause: Option<&'a Node>,
    ) {
        self.subselect_items.extend(target_list);
        if let Some(expr) = where_clause {
            self.subselect_items.push_back(expr);
        }
        for item in sort_clause {
            if let Node::SortBy(sort_by) = item {
                if let Some(expr) = &sort_by.node {
                    self.subselect_items.push_back(expr);
                }
            }
        }
        self.subselect_items.extend(group_clause);
        if let Some(expr) = having_clause {
            self.subselect_items.push_back(expr);
        }
    }

    /// Steps one expression looking for sub-selects.
    fn subselect(&mut self, expr: &'a Node) {
        match expr {
            Node::AExpr(a_expr) => {
                for side in [a_expr.lexpr.as_ref(), a_expr.rexpr.as_ref()].into_iter().flatten() {
                    match side {
                        Node::List(items) => self.subselect_items.extend(items),
                        other => self.subselect_items.push_back(other),
                    }
                }
            }
            Node::BoolExpr(bool_expr) => self.subselect_items.extend(&bool_expr.args),
            Node::ResTarget(target) => {
                if let Some(val) = &target.val {
                    self.subselect_items.push_back(val);
                }
            }
            Node::SubLink(sub_link) => {
                if let Some(subselect) = &sub_link.subselect {
                    self.statements.push_back(StmtItem::Node(subselect));
                }
            }
            _ => {}
        }
    }

    /// Expands the candidate relation queue into table references.
    fn drain_from_clause_items(&mut self) {
        while let Some((item, reference_type)) = self.from_clause_items.pop_front() {
            let node = match item {
                FromItem::Range(range_var) => {
                    self.range_var(range_var, reference_type);
                    continue;
                }
                FromItem::Node(node) => node,
            };
            match node {
                Node::JoinExpr(join) => {
                    if let Some(larg) = &join.larg {
                        self.from_clause_items.push_back((FromItem::Node(larg), reference_type));
                    }
                    if let Some(rarg) = &join.rarg {
                        self.from_clause_items.push_back((FromItem::Node(rarg), reference_type));
                    }
                }
                Node::RowExpr(row) => {
                    for arg in &row.args {
                        self.from_clause_items.push_back((FromItem::Node(arg), reference_type));
                    }
                }
                Node::RangeSubselect(sub) => {
                    if let Some(query) = &sub.subquery {
                        self.from_clause_items.push_back((FromItem::Node(query), reference_type));
                    }
                }
                Node::SelectStmt(select) => {
                    for item in &select.from_clause {
                        self.from_clause_items.push_back((FromItem::Node(item), reference_type));
                    }
                }
                Node::RangeVar(range_var) => self.range_var(range_var, reference_type),
                _ => {}
            }
        }
    }

    /// Emits one RangeVar as a table reference, unless it names a CTE.
    fn range_var(&mut self, range_var: &RangeVar, reference_type: ReferenceType) {
        if range_var.relname.is_empty() {
            return;
        }
        if range_var.schemaname.is_none() && self.cte_names.iter().any(|cte| *cte == range_var.relname) {
            return;
        }

        let reference = TableReference {
            schema: range_var.schemaname.clone(),
            relname: range_var.relname.clone(),
            reference_type,
            location: range_var.location,
            inh: Some(range_var.inh),
        };
        if let Some(alias) = &range_var.alias {
            self.aliases.insert(alias.aliasname.clone(), reference.name());
        }
        self.tables.push(reference);
    }

    /// Queues a typed relation field.
    fn relation(&mut self, relation: Option<&'a RangeVar>, reference_type: ReferenceType) {
        if let Some(range_var) = relation {
            self.from_clause_items.push_back((FromItem::Range(range_var), reference_type));
        }
    }

    /// Records CTE names and queues their queries as statements.
    fn with_clause(&mut self, with: Option<&'a WithClause>) {
        if let Some(with) = with {
            for cte in &with.ctes {
                if let Node::CommonTableExpr(cte) = cte {
                    self.cte_names.push(cte.ctename.clone());
                    if let Some(query) = &cte.ctequery {
                        self.statements.push_back(StmtItem::Node(query));
                    }
                }
            }
        }
    }

    /// DROP TABLE objects arrive as lists of name parts; emit them directly.
    /// For DROP RULE and DROP TRIGGER the trailing part names the object, not
    /// the table, and is discarded.
    fn drop_stmt(&mut self, drop: &DropStmt) {
        let drop_last = matches!(drop.remove_type, object_type::RULE | object_type::TRIGGER);
        if drop.remove_type != object_type::TABLE && !drop_last {
            return;
        }

        for object in &drop.objects {
            let mut parts: Vec<&str> = match object {
                Node::List(items) => items
                    .iter()
                    .filter_map(|item| match item {
                        Node::String(s) => Some(s.value.as_str()),
                        _ => None,
                    })
                    .collect(),
                Node::String(s) => vec![s.value.as_str()],
                _ => continue,
            };
            if drop_last {
                parts.pop();
            }
            let Some(relname) = parts.pop() else { continue };
            let schema = if parts.is_empty() { None } else { Some(parts.join(".")) };
            self.tables.push(TableReference {
                schema,
                relname: relname.to_string(),
                reference_type: ReferenceType::Ddl,
                location: None,
                inh: None,
            });
        }
    }
}

/// Removes duplicates, keeping the first occurrence of each value.
fn dedup<T: Clone + Eq + std::hash::Hash>(items: &mut Vec<T>) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}
