//! Developer and developer info routes.

use crate::gates::{guard, Gate};
use crate::handlers::{
    create_developer, create_developer_info, delete_developer, list_developer_projects, list_developers,
    read_developer, update_developer, update_developer_info,
};
use crate::state::AppState;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};

pub fn developer_routes(state: AppState) -> Router {
    let s = &state;
    Router::new()
        .route("/developers", guard(post(create_developer), s, &[Gate::EmailAvailable]))
        .route("/developers", get(list_developers))
        .route("/developers/:id", guard(get(read_developer), s, &[Gate::DeveloperExists]))
        .route(
            "/developers/:id",
            guard(patch(update_developer), s, &[Gate::DeveloperExists, Gate::EmailAvailable]),
        )
        .route("/developers/:id", guard(delete(delete_developer), s, &[Gate::DeveloperExists]))
        .route(
            "/developers/:id/projects",
            guard(get(list_developer_projects), s, &[Gate::DeveloperExists]),
        )
        .route(
            "/developers/:id/infos",
            guard(post(create_developer_info), s, &[Gate::DeveloperExists]),
        )
        .route("/developers/:id/infos", patch(update_developer_info))
        .with_state(state.clone())
}
