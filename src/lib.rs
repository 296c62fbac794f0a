//! devprojects: REST backend for developers, developer infos, projects and project technologies.

pub mod config;
pub mod error;
pub mod extractors;
pub mod gates;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError};
pub use gates::Gate;
pub use routes::{api_router, common_routes, common_routes_with_ready, developer_routes, project_routes};
pub use service::{CrudService, RequestValidator};
pub use sql::QueryBuf;
pub use state::AppState;
pub use store::{PgStore, QueryOutcome, Store};
