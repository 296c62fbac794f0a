//! Developer info profile: created once per developer, then patched in place.
//!
//! Creation runs two statements (insert the info, link it from the developer) without a transaction.

use crate::error::AppError;
use crate::extractors::{JsonPayload, ResourceId};
use crate::model::{DEVELOPERS, DEVELOPER_INFOS, DEVELOPER_INFO_CREATE, DEVELOPER_INFO_UPDATE};
use crate::response::{created, ok};
use crate::service::{row_i64, CrudService, RequestValidator};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};
use serde_json::{Map, Value};

fn infos_not_found() -> AppError {
    AppError::NotFound("Developer infos not found".into())
}

pub async fn create_developer_info(
    State(state): State<AppState>,
    ResourceId(developer_id): ResourceId,
    JsonPayload(body): JsonPayload,
) -> Result<impl IntoResponse, AppError> {
    let data = RequestValidator::strict(body, &DEVELOPER_INFO_CREATE)?;
    let store = state.store.as_ref();
    let developer = CrudService::read(store, &DEVELOPERS, developer_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Developer not found".into()))?;
    if row_i64(&developer, "developerInfoId").is_some() {
        return Err(AppError::Conflict("Developer infos already exists".into()));
    }

    let info = CrudService::create(store, &DEVELOPER_INFOS, &data).await?;
    let info_id = row_i64(&info, "id")
        .ok_or_else(|| AppError::Internal("developer info row without id".into()))?;
    let mut link = Map::new();
    link.insert("developerInfoId".into(), Value::from(info_id));
    CrudService::update(store, &DEVELOPERS, developer_id, &link).await?;
    tracing::debug!(developer_id, info_id, "developer info linked");
    Ok(created(info))
}

pub async fn update_developer_info(
    State(state): State<AppState>,
    ResourceId(developer_id): ResourceId,
    JsonPayload(body): JsonPayload,
) -> Result<impl IntoResponse, AppError> {
    let store = state.store.as_ref();
    let developer = CrudService::read(store, &DEVELOPERS, developer_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Developer not found".into()))?;
    let info_id = row_i64(&developer, "developerInfoId").ok_or_else(infos_not_found)?;
    let data = RequestValidator::partial(body, &DEVELOPER_INFO_UPDATE)?;
    let row = CrudService::update(store, &DEVELOPER_INFOS, info_id, &data)
        .await?
        .ok_or_else(infos_not_found)?;
    Ok(ok(row))
}
