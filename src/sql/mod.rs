//! Safe SQL builder: identifiers from static descriptors, values as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
