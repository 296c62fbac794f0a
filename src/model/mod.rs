//! Static table, view and payload descriptors for the developers/projects store.

pub mod entity;
pub mod payload;
pub mod tables;
pub mod views;

pub use entity::*;
pub use payload::*;
pub use tables::*;
pub use views::*;
