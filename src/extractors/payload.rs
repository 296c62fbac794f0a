//! JSON object body with rejections mapped to `AppError`.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde_json::{Map, Value};

/// Request body that must be a JSON object. Malformed or missing bodies answer 400 `{ message }`.
#[derive(Clone, Debug)]
pub struct JsonPayload(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::rejected(rejection.status(), rejection.body_text()))?;
        match value {
            Value::Object(map) => Ok(JsonPayload(map)),
            _ => Err(AppError::BadRequest("body must be a JSON object".into())),
        }
    }
}
