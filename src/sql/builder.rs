//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from entity and view descriptors.

use crate::model::{Entity, View};
use serde_json::{Map, Value};

/// Quote identifier for PostgreSQL. Embedded quotes are doubled.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
    /// False for statements without a result set; the store reports affected rows instead.
    pub returns_rows: bool,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
            returns_rows: true,
        }
    }

    /// Statement without parameters.
    pub fn raw(sql: impl Into<String>) -> Self {
        QueryBuf {
            sql: sql.into(),
            params: Vec::new(),
            returns_rows: true,
        }
    }

    fn push_param(&mut self, v: Value) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// Exact-match condition on an entity column.
#[derive(Clone, Debug)]
pub enum Condition {
    Eq(&'static str, Value),
    NotEq(&'static str, Value),
}

/// Exact-match condition on a column of one of a view's sources.
#[derive(Clone, Debug)]
pub struct ViewCondition {
    pub alias: &'static str,
    pub column: &'static str,
    pub value: Value,
}

impl ViewCondition {
    pub fn new(alias: &'static str, column: &'static str, value: impl Into<Value>) -> Self {
        ViewCondition {
            alias,
            column,
            value: value.into(),
        }
    }
}

/// `$n::type` for typed columns, `$n` for the primary key and unknown columns.
fn placeholder(entity: &Entity, column: &str, n: usize) -> String {
    match entity.column(column) {
        Some(c) => format!("${}::{}", n, c.pg_type),
        None => format!("${}", n),
    }
}

/// SELECT/RETURNING list: pk then columns; custom enum types as text so rows decode to strings.
pub fn select_column_list(entity: &Entity) -> String {
    std::iter::once(quoted(entity.pk))
        .chain(entity.columns.iter().map(|c| {
            let q = quoted(c.name);
            if c.is_custom_type() {
                format!("{}::text AS {}", q, q)
            } else {
                q
            }
        }))
        .collect::<Vec<_>>()
        .join(", ")
}

fn where_clause(q: &mut QueryBuf, entity: &Entity, conditions: &[Condition]) -> String {
    if conditions.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = conditions
        .iter()
        .map(|cond| {
            let (col, op, val) = match cond {
                Condition::Eq(col, val) => (*col, "=", val),
                Condition::NotEq(col, val) => (*col, "<>", val),
            };
            let n = q.push_param(val.clone());
            format!("{} {} {}", quoted(col), op, placeholder(entity, col, n))
        })
        .collect();
    format!(" WHERE {}", parts.join(" AND "))
}

/// SELECT by primary key.
pub fn select_by_id(entity: &Entity, id: i64) -> QueryBuf {
    select_where(entity, &[Condition::Eq(entity.pk, Value::from(id))])
}

/// SELECT with exact-match conditions joined by AND, ORDER BY pk.
pub fn select_where(entity: &Entity, conditions: &[Condition]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(&mut q, entity, conditions);
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}",
        select_column_list(entity),
        quoted(entity.table),
        where_sql,
        quoted(entity.pk)
    );
    q
}

/// SELECT through a view: base table, LEFT JOINs, aliased fields, optional conditions, ORDER BY base pk.
pub fn select_view(view: &View, conditions: &[ViewCondition]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let fields: Vec<String> = view
        .fields
        .iter()
        .map(|f| {
            let expr = format!("{}.{}", quoted(f.alias), quoted(f.column));
            let expr = if f.as_text { format!("{}::text", expr) } else { expr };
            format!("{} AS {}", expr, quoted(f.output))
        })
        .collect();
    let base = &view.base;
    let mut from = format!("{} AS {}", quoted(base.entity.table), quoted(base.alias));
    for j in view.joins {
        from.push_str(&format!(
            " LEFT JOIN {} AS {} ON {}.{} = {}.{}",
            quoted(j.target.entity.table),
            quoted(j.target.alias),
            quoted(j.left_alias),
            quoted(j.left_column),
            quoted(j.target.alias),
            quoted(j.right_column)
        ));
    }
    let where_parts: Vec<String> = conditions
        .iter()
        .map(|c| {
            let n = q.push_param(c.value.clone());
            format!("{}.{} = ${}", quoted(c.alias), quoted(c.column), n)
        })
        .collect();
    let where_sql = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}.{}",
        fields.join(", "),
        from,
        where_sql,
        quoted(base.alias),
        quoted(base.entity.pk)
    );
    q
}

/// INSERT the entity columns present in body, in entity column order. Returns the inserted row.
/// With `on_conflict`, a row colliding on those columns is skipped and nothing is returned.
pub fn insert(entity: &Entity, body: &Map<String, Value>, on_conflict: Option<&[&str]>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in entity.columns {
        let Some(val) = body.get(c.name) else { continue };
        let n = q.push_param(val.clone());
        cols.push(quoted(c.name));
        placeholders.push(format!("${}::{}", n, c.pg_type));
    }
    let conflict = on_conflict
        .map(|targets| {
            let targets: Vec<String> = targets.iter().map(|t| quoted(t)).collect();
            format!(" ON CONFLICT ({}) DO NOTHING", targets.join(", "))
        })
        .unwrap_or_default();
    let table = quoted(entity.table);
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES{} RETURNING {}", table, conflict, select_column_list(entity))
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}){} RETURNING {}",
            table,
            cols.join(", "),
            placeholders.join(", "),
            conflict,
            select_column_list(entity)
        )
    };
    q
}

/// UPDATE by id: SET only entity columns present in body. Returns the updated row.
/// A body without any entity column degrades to a SELECT by id.
pub fn update(entity: &Entity, id: i64, body: &Map<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in entity.columns {
        let Some(val) = body.get(c.name) else { continue };
        let n = q.push_param(val.clone());
        sets.push(format!("{} = ${}::{}", quoted(c.name), n, c.pg_type));
    }
    if sets.is_empty() {
        return select_by_id(entity, id);
    }
    let id_param = q.push_param(Value::from(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        quoted(entity.table),
        sets.join(", "),
        quoted(entity.pk),
        id_param,
        select_column_list(entity)
    );
    q
}

/// DELETE by id. No result set.
pub fn delete_by_id(entity: &Entity, id: i64) -> QueryBuf {
    delete_where(entity, &[Condition::Eq(entity.pk, Value::from(id))])
}

/// DELETE with exact-match conditions. No result set.
pub fn delete_where(entity: &Entity, conditions: &[Condition]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(&mut q, entity, conditions);
    q.sql = format!("DELETE FROM {}{}", quoted(entity.table), where_sql);
    q.returns_rows = false;
    q
}
