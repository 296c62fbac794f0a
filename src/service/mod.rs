//! CrudService: generic CRUD using the safe SQL builder; RequestValidator: payload key sets.

mod crud;
mod validation;
pub use crud::{row_i64, CrudService};
pub use validation::RequestValidator;
