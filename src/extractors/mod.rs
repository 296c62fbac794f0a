//! Request extractors shared by gates and handlers.

pub mod payload;
pub mod resource_id;

pub use payload::JsonPayload;
pub use resource_id::{parse_id, ResourceId};
