//! Project and project technology routes.

use crate::gates::{guard, Gate};
use crate::handlers::{
    attach_technology, create_project, delete_project, detach_technology, list_projects, read_project, update_project,
};
use crate::state::AppState;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};

pub fn project_routes(state: AppState) -> Router {
    let s = &state;
    Router::new()
        .route("/projects", guard(post(create_project), s, &[Gate::ProjectDeveloperExists]))
        .route("/projects", get(list_projects))
        .route("/projects/:id", guard(get(read_project), s, &[Gate::ProjectExists]))
        .route(
            "/projects/:id",
            guard(patch(update_project), s, &[Gate::ProjectExists, Gate::ProjectDeveloperExists]),
        )
        .route("/projects/:id", guard(delete(delete_project), s, &[Gate::ProjectExists]))
        .route(
            "/projects/:id/technologies",
            guard(post(attach_technology), s, &[Gate::ProjectExists]),
        )
        .route(
            "/projects/:id/technologies/:name",
            guard(delete(detach_technology), s, &[Gate::ProjectExists]),
        )
        .with_state(state.clone())
}
