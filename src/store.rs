//! Query execution against the relational store.

use crate::error::AppError;
use crate::sql::{PgBindValue, QueryBuf};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};

/// Rows returned by a statement plus the number of rows it produced or affected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryOutcome {
    pub rows: Vec<Value>,
    pub row_count: u64,
}

impl QueryOutcome {
    pub fn rows(rows: Vec<Value>) -> Self {
        let row_count = rows.len() as u64;
        QueryOutcome { rows, row_count }
    }

    pub fn affected(row_count: u64) -> Self {
        QueryOutcome {
            rows: Vec::new(),
            row_count,
        }
    }

    pub fn first(self) -> Option<Value> {
        self.rows.into_iter().next()
    }
}

/// The single capability handlers and gates need from the database.
#[async_trait]
pub trait Store: Send + Sync {
    async fn query(&self, q: &QueryBuf) -> Result<QueryOutcome, AppError>;
}

/// PostgreSQL store over a shared sqlx pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(PgStore { pool })
    }
}

#[async_trait]
impl Store for PgStore {
    async fn query(&self, q: &QueryBuf) -> Result<QueryOutcome, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from(p));
        }
        if q.returns_rows {
            let rows = query.fetch_all(&self.pool).await?;
            Ok(QueryOutcome::rows(rows.iter().map(row_to_json).collect()))
        } else {
            let result = query.execute(&self.pool).await?;
            Ok(QueryOutcome::affected(result.rows_affected()))
        }
    }
}

fn row_to_json(row: &PgRow) -> Value {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    Value::Object(map)
}

fn cell_to_value(row: &PgRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i16>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDate>, _>(name) {
        return Value::String(d.format("%Y-%m-%d").to_string());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDateTime>, _>(name) {
        return Value::String(d.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<Value>, _>(name) {
        return j;
    }
    Value::Null
}
