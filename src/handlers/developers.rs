//! Developer CRUD handlers.

use crate::error::AppError;
use crate::extractors::{JsonPayload, ResourceId};
use crate::model::{DEVELOPERS, DEVELOPER_CREATE, DEVELOPER_PROJECTS_VIEW, DEVELOPER_UPDATE, DEVELOPER_VIEW};
use crate::response::{created, no_content, ok};
use crate::service::{CrudService, RequestValidator};
use crate::sql::ViewCondition;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

fn developer_not_found() -> AppError {
    AppError::NotFound("Developer not found".into())
}

pub async fn create_developer(
    State(state): State<AppState>,
    JsonPayload(body): JsonPayload,
) -> Result<impl IntoResponse, AppError> {
    let data = RequestValidator::strict(body, &DEVELOPER_CREATE)?;
    let row = CrudService::create(state.store.as_ref(), &DEVELOPERS, &data).await?;
    Ok(created(row))
}

/// Developer joined with its info profile.
pub async fn read_developer(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::list_view(
        state.store.as_ref(),
        &DEVELOPER_VIEW,
        &[ViewCondition::new("d", "id", id)],
    )
    .await?;
    let row = rows.into_iter().next().ok_or_else(developer_not_found)?;
    Ok(ok(row))
}

/// One row per project and technology of the developer.
pub async fn list_developer_projects(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::list_view(
        state.store.as_ref(),
        &DEVELOPER_PROJECTS_VIEW,
        &[ViewCondition::new("d", "id", id)],
    )
    .await?;
    Ok(ok(rows))
}

pub async fn list_developers(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::list_view(state.store.as_ref(), &DEVELOPER_VIEW, &[]).await?;
    Ok(ok(rows))
}

pub async fn update_developer(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    JsonPayload(body): JsonPayload,
) -> Result<impl IntoResponse, AppError> {
    let data = RequestValidator::partial(body, &DEVELOPER_UPDATE)?;
    let row = CrudService::update(state.store.as_ref(), &DEVELOPERS, id, &data)
        .await?
        .ok_or_else(developer_not_found)?;
    Ok(ok(row))
}

pub async fn delete_developer(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<impl IntoResponse, AppError> {
    if CrudService::delete(state.store.as_ref(), &DEVELOPERS, id).await? == 0 {
        return Err(developer_not_found());
    }
    Ok(no_content())
}
