//! `/api` endpoints, one module per resource. Paths are relative to the
//! `/api` nest.

pub mod categories;
pub mod data;
pub mod generate;
pub mod providers;
pub mod templates;
