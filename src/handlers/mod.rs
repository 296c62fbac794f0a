//! HTTP handlers for developers, developer infos, projects and project technologies.

pub mod developer_infos;
pub mod developers;
pub mod projects;
pub mod technologies;
pub use developer_infos::*;
pub use developers::*;
pub use projects::*;
pub use technologies::*;
