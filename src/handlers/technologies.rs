//! Attach and detach catalog technologies on a project.

use crate::error::AppError;
use crate::extractors::{JsonPayload, ResourceId};
use crate::model::{PROJECTS_TECHNOLOGIES, TECHNOLOGIES, TECHNOLOGY_ATTACH, TECHNOLOGY_PROJECTS_VIEW};
use crate::response::{created, no_content};
use crate::service::{row_i64, CrudService, RequestValidator};
use crate::sql::{Condition, ViewCondition};
use crate::state::AppState;
use crate::store::Store;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::{Map, Value};

const PAIRING_KEY: &[&str] = &["projectId", "technologyId"];

fn already_attached() -> AppError {
    AppError::Conflict("Technology already added to the project".into())
}

fn pairing(project_id: i64, technology_id: i64) -> [Condition; 2] {
    [
        Condition::Eq("projectId", Value::from(project_id)),
        Condition::Eq("technologyId", Value::from(technology_id)),
    ]
}

async fn lookup_technology(store: &dyn Store, name: &str) -> Result<Option<i64>, AppError> {
    let row = CrudService::find_one(store, &TECHNOLOGIES, &[Condition::Eq("name", Value::from(name))]).await?;
    Ok(row.as_ref().and_then(|r| row_i64(r, "id")))
}

async fn unsupported(store: &dyn Store) -> Result<AppError, AppError> {
    let names: Vec<String> = CrudService::find(store, &TECHNOLOGIES, &[])
        .await?
        .iter()
        .filter_map(|r| r.get("name").and_then(Value::as_str).map(str::to_owned))
        .collect();
    Ok(AppError::Validation(format!(
        "Technology not supported. Options are: {}",
        names.join(", ")
    )))
}

pub async fn attach_technology(
    State(state): State<AppState>,
    ResourceId(project_id): ResourceId,
    JsonPayload(body): JsonPayload,
) -> Result<impl IntoResponse, AppError> {
    let data = RequestValidator::strict(body, &TECHNOLOGY_ATTACH)?;
    let name = data
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::Validation("name must be a string".into()))?;
    let store = state.store.as_ref();
    let Some(technology_id) = lookup_technology(store, name).await? else {
        return Err(unsupported(store).await?);
    };
    if CrudService::exists(store, &PROJECTS_TECHNOLOGIES, &pairing(project_id, technology_id)).await? {
        return Err(already_attached());
    }

    let mut row = Map::new();
    row.insert("technologyId".into(), Value::from(technology_id));
    row.insert("projectId".into(), Value::from(project_id));
    if let Some(added_in) = data.get("addedIn").filter(|v| !v.is_null()) {
        row.insert("addedIn".into(), added_in.clone());
    }
    CrudService::create_unless_exists(store, &PROJECTS_TECHNOLOGIES, &row, PAIRING_KEY)
        .await?
        .ok_or_else(already_attached)?;

    let attached = CrudService::list_view(
        store,
        &TECHNOLOGY_PROJECTS_VIEW,
        &[
            ViewCondition::new("t", "id", technology_id),
            ViewCondition::new("p", "id", project_id),
        ],
    )
    .await?
    .into_iter()
    .next()
    .ok_or_else(|| AppError::Internal("attached technology not readable".into()))?;
    Ok(created(attached))
}

pub async fn detach_technology(
    State(state): State<AppState>,
    ResourceId(project_id): ResourceId,
    Path((_, name)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let store = state.store.as_ref();
    let not_found = || AppError::NotFound(format!("Technology {} not found", name));
    let technology_id = lookup_technology(store, &name).await?.ok_or_else(not_found)?;
    let pairing = pairing(project_id, technology_id);
    if !CrudService::exists(store, &PROJECTS_TECHNOLOGIES, &pairing).await? {
        return Err(not_found());
    }
    CrudService::delete_matching(store, &PROJECTS_TECHNOLOGIES, &pairing).await?;
    Ok(no_content())
}
