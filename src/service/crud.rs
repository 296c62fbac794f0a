//! Generic CRUD execution against the store.

use crate::error::AppError;
use crate::model::{Entity, View};
use crate::sql::{
    delete_by_id, delete_where, insert, select_by_id, select_view, select_where, update, Condition, ViewCondition,
};
use crate::store::Store;
use serde_json::{Map, Value};

pub struct CrudService;

impl CrudService {
    /// Insert one row. Returns the created row.
    pub async fn create(store: &dyn Store, entity: &Entity, body: &Map<String, Value>) -> Result<Value, AppError> {
        let q = insert(entity, body, None);
        store
            .query(&q)
            .await?
            .first()
            .ok_or_else(|| AppError::Internal(format!("insert into {} returned no row", entity.table)))
    }

    /// Insert one row unless it collides on `conflict` columns. None when skipped.
    pub async fn create_unless_exists(
        store: &dyn Store,
        entity: &Entity,
        body: &Map<String, Value>,
        conflict: &[&str],
    ) -> Result<Option<Value>, AppError> {
        let q = insert(entity, body, Some(conflict));
        Ok(store.query(&q).await?.first())
    }

    /// Fetch one row by primary key.
    pub async fn read(store: &dyn Store, entity: &Entity, id: i64) -> Result<Option<Value>, AppError> {
        let q = select_by_id(entity, id);
        Ok(store.query(&q).await?.first())
    }

    /// Fetch rows matching every condition.
    pub async fn find(store: &dyn Store, entity: &Entity, conditions: &[Condition]) -> Result<Vec<Value>, AppError> {
        let q = select_where(entity, conditions);
        Ok(store.query(&q).await?.rows)
    }

    /// First row matching every condition.
    pub async fn find_one(
        store: &dyn Store,
        entity: &Entity,
        conditions: &[Condition],
    ) -> Result<Option<Value>, AppError> {
        let q = select_where(entity, conditions);
        Ok(store.query(&q).await?.first())
    }

    /// Whether any row matches every condition.
    pub async fn exists(store: &dyn Store, entity: &Entity, conditions: &[Condition]) -> Result<bool, AppError> {
        let q = select_where(entity, conditions);
        Ok(store.query(&q).await?.row_count > 0)
    }

    /// Rows of a joined view.
    pub async fn list_view(
        store: &dyn Store,
        view: &View,
        conditions: &[ViewCondition],
    ) -> Result<Vec<Value>, AppError> {
        let q = select_view(view, conditions);
        Ok(store.query(&q).await?.rows)
    }

    /// Update one row by id. Returns the updated row, None when the id is gone.
    pub async fn update(
        store: &dyn Store,
        entity: &Entity,
        id: i64,
        body: &Map<String, Value>,
    ) -> Result<Option<Value>, AppError> {
        let q = update(entity, id, body);
        Ok(store.query(&q).await?.first())
    }

    /// Delete one row by id. Returns the number of deleted rows.
    pub async fn delete(store: &dyn Store, entity: &Entity, id: i64) -> Result<u64, AppError> {
        let q = delete_by_id(entity, id);
        Ok(store.query(&q).await?.row_count)
    }

    /// Delete rows matching every condition. Returns the number of deleted rows.
    pub async fn delete_matching(
        store: &dyn Store,
        entity: &Entity,
        conditions: &[Condition],
    ) -> Result<u64, AppError> {
        let q = delete_where(entity, conditions);
        Ok(store.query(&q).await?.row_count)
    }
}

/// Integer column of a row, if present and non-null.
pub fn row_i64(row: &Value, column: &str) -> Option<i64> {
    row.get(column).and_then(Value::as_i64)
}
