//! SQLite persistence plumbing for bookshelf.
//!
//! Modules own their schema (as [`Migration`]s) and their queries (as
//! [`Repository`] implementations); this crate only provides the pool, the
//! migration runner, and the shared error type.

pub mod error;
pub mod migrate;
pub mod pool;
pub mod repository;

pub use error::DbError;
pub use migrate::{run_migrations, Migration};
pub use pool::Database;
pub use repository::Repository;
