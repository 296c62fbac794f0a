//! Project CRUD handlers.

use crate::error::AppError;
use crate::extractors::{JsonPayload, ResourceId};
use crate::model::{PROJECTS, PROJECT_CREATE, PROJECT_UPDATE, PROJECT_VIEW};
use crate::response::{created, no_content, ok};
use crate::service::{CrudService, RequestValidator};
use crate::sql::ViewCondition;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

fn project_not_found() -> AppError {
    AppError::NotFound("Project not found".into())
}

pub async fn create_project(
    State(state): State<AppState>,
    JsonPayload(body): JsonPayload,
) -> Result<impl IntoResponse, AppError> {
    let data = RequestValidator::strict(body, &PROJECT_CREATE)?;
    let row = CrudService::create(state.store.as_ref(), &PROJECTS, &data).await?;
    Ok(created(row))
}

pub async fn list_projects(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::list_view(state.store.as_ref(), &PROJECT_VIEW, &[]).await?;
    Ok(ok(rows))
}

/// One project row, joined with a technology when it has any.
pub async fn read_project(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<impl IntoResponse, AppError> {
    let row = CrudService::list_view(
        state.store.as_ref(),
        &PROJECT_VIEW,
        &[ViewCondition::new("p", "id", id)],
    )
    .await?
    .into_iter()
    .next()
    .ok_or_else(project_not_found)?;
    Ok(ok(row))
}

pub async fn update_project(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    JsonPayload(body): JsonPayload,
) -> Result<impl IntoResponse, AppError> {
    let data = RequestValidator::partial(body, &PROJECT_UPDATE)?;
    let row = CrudService::update(state.store.as_ref(), &PROJECTS, id, &data)
        .await?
        .ok_or_else(project_not_found)?;
    Ok(ok(row))
}

pub async fn delete_project(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<impl IntoResponse, AppError> {
    if CrudService::delete(state.store.as_ref(), &PROJECTS, id).await? == 0 {
        return Err(project_not_found());
    }
    Ok(no_content())
}
