//! Per-table statements and the operations built from them.
//!
//! Functions taking `&mut SqliteConnection` are single statements and can run
//! on a pooled connection or inside a transaction. Functions taking
//! `&SqlitePool` are full operations with validation.

pub mod categories;
pub mod providers;
pub mod templates;
