//! Database module: schema, row models and the actor that owns the pool.
//!
//! Layout:
//! - `schema.rs`: SQL DDL applied at start-up (SQLite)
//! - `models.rs`: Rust structs mirroring DB rows
//! - `write.rs`: validated create/update payloads
//! - `repo/`: per-table statements and operations
//! - `snapshot.rs`: export, import and reset of the whole dataset
//! - `actor.rs`: `DbActor` and its cloneable handle

pub mod actor;
pub mod models;
pub mod repo;
pub mod schema;
pub mod snapshot;
pub mod write;

pub use actor::{DbActorHandle, spawn};
pub use models::{DbApiProvider, DbCategory, DbPromptTemplate};
pub use schema::SQLITE_INIT;
pub use snapshot::ImportSummary;
pub use write::{CategoryWrite, ProviderWrite, TemplateWrite};
