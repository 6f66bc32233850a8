//! Storage handle for the Geist service.
//!
//! Provides the process-wide SQLite connection pool (via `r2d2`) and a small
//! explicit schema vocabulary used by the entity crates to declare their
//! tables.
//!
//! # Design decisions
//!
//! - **Shared-cache SQLite**: the database file is opened through a
//!   `file:` URI with `cache=shared&mode=rwc`, so every pooled connection
//!   shares one page cache and the file is created on first start.
//! - **Explicit schema**: tables are declared as plain column lists and
//!   created with `CREATE TABLE IF NOT EXISTS`. There is no migration
//!   history; table creation is idempotent and that is all.

mod pool;
mod schema;

pub use pool::{create_pool, sqlite_uri, DbPool, DbRuntimeSettings, PoolError};
pub use schema::{Column, SchemaError, Table};
