#![allow(dead_code)]

use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use devprojects::{api_router, AppError, AppState, QueryBuf, QueryOutcome, Store};
use serde_json::Value;
use sqlx::error::{DatabaseError, ErrorKind};
use tower::ServiceExt;

/// Driver-side error carrying a SQLSTATE, as PostgreSQL would report it.
#[derive(Debug)]
pub struct SqlState {
    code: &'static str,
}

impl fmt::Display for SqlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "constraint failed ({})", self.code)
    }
}

impl std::error::Error for SqlState {}

impl DatabaseError for SqlState {
    fn message(&self) -> &str {
        "constraint failed"
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.code))
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        match self.code {
            "23505" => ErrorKind::UniqueViolation,
            "23503" => ErrorKind::ForeignKeyViolation,
            "23502" => ErrorKind::NotNullViolation,
            "23514" => ErrorKind::CheckViolation,
            _ => ErrorKind::Other,
        }
    }
}

pub fn db_error(code: &'static str) -> AppError {
    AppError::Db(sqlx::Error::Database(Box::new(SqlState { code })))
}

/// Store that replays queued outcomes in order and records every statement it receives.
#[derive(Default)]
pub struct ScriptedStore {
    outcomes: Mutex<VecDeque<Result<QueryOutcome, AppError>>>,
    executed: Mutex<Vec<QueryBuf>>,
}

#[async_trait]
impl Store for ScriptedStore {
    async fn query(&self, q: &QueryBuf) -> Result<QueryOutcome, AppError> {
        self.executed.lock().unwrap().push(q.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Internal(format!("unscripted query: {}", q.sql))))
    }
}

/// Test harness around the full router and its scripted store.
#[derive(Clone)]
pub struct TestApp {
    pub store: Arc<ScriptedStore>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(ScriptedStore::default());
        let state = AppState { store: store.clone() };
        TestApp {
            store,
            router: api_router(state, 64 * 1024),
        }
    }

    /// Queue a result set for the next statement.
    pub fn rows(&self, rows: Vec<Value>) -> &Self {
        self.push(Ok(QueryOutcome::rows(rows)))
    }

    /// Queue an affected-row count for the next statement.
    pub fn affected(&self, n: u64) -> &Self {
        self.push(Ok(QueryOutcome::affected(n)))
    }

    pub fn fail(&self, err: AppError) -> &Self {
        self.push(Err(err))
    }

    fn push(&self, outcome: Result<QueryOutcome, AppError>) -> &Self {
        self.store.outcomes.lock().unwrap().push_back(outcome);
        self
    }

    pub fn executed(&self) -> Vec<QueryBuf> {
        self.store.executed.lock().unwrap().clone()
    }

    pub fn executed_sql(&self) -> Vec<String> {
        self.executed().into_iter().map(|q| q.sql).collect()
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
