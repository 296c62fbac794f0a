//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

pub const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl AppError {
    /// Extractor rejection: a body over the size limit stays 413, anything else is a 400.
    pub fn rejected(status: StatusCode, message: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(message)
        } else {
            AppError::BadRequest(message)
        }
    }

    /// Status and client-facing message. Driver errors are classified by SQLSTATE.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Validation(m) | AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            AppError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
            AppError::PayloadTooLarge(m) => (StatusCode::PAYLOAD_TOO_LARGE, m.clone()),
            AppError::Db(sqlx::Error::RowNotFound) => (StatusCode::NOT_FOUND, "Resource not found".into()),
            AppError::Db(sqlx::Error::Database(db)) => match db.kind() {
                ErrorKind::UniqueViolation => (StatusCode::CONFLICT, "Resource already exists".into()),
                ErrorKind::ForeignKeyViolation => (StatusCode::NOT_FOUND, "Referenced resource not found".into()),
                ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                    (StatusCode::BAD_REQUEST, format!("Invalid value: {}", db.message()))
                }
                _ if db.code().is_some_and(|c| c.starts_with("22")) => {
                    (StatusCode::BAD_REQUEST, format!("Invalid value: {}", db.message()))
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.into()),
            },
            AppError::Db(_) | AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ErrorBody { message })).into_response()
    }
}
