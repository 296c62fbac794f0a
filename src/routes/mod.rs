//! Route table: method + path → gates → handler.

pub mod common;
pub mod developers;
pub mod projects;

pub use common::{common_routes, common_routes_with_ready};
pub use developers::developer_routes;
pub use projects::project_routes;

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full API: operational routes, developer routes and project routes, with request tracing and a body size cap.
pub fn api_router(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(developer_routes(state.clone()))
        .merge(project_routes(state))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
}
