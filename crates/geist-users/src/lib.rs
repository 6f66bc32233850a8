//! The user entity for the Geist service.
//!
//! Declares the shape of a persisted user, the `users` table definition,
//! input validation for new users, and the [`UserStore`] capability the HTTP
//! layer talks to. Two stores are provided: [`SqliteUserStore`] over the
//! shared connection pool and [`MemoryUserStore`] for tests.

mod memory;
mod sqlite;
mod store;
mod validate;

use chrono::{DateTime, Utc};
use geist_db::{Column, SchemaError, Table};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use memory::MemoryUserStore;
pub use sqlite::SqliteUserStore;
pub use store::UserStore;
pub use validate::{is_valid_email, CreateUser, ValidationError};

/// The `users` table.
///
/// `created_at` is nullable and defaults to the insertion time when the
/// insert omits it.
pub const USERS_TABLE: Table = Table {
    name: "users",
    columns: &[
        Column {
            name: "id",
            sql_type: "INTEGER",
            constraints: "PRIMARY KEY AUTOINCREMENT",
        },
        Column {
            name: "name",
            sql_type: "TEXT",
            constraints: "NOT NULL",
        },
        Column {
            name: "email",
            sql_type: "TEXT",
            constraints: "NOT NULL",
        },
        Column {
            name: "created_at",
            sql_type: "TIMESTAMP",
            constraints: "DEFAULT CURRENT_TIMESTAMP",
        },
    ],
};

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("database connection failed: {0}")]
    Pool(#[from] r2d2::Error),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("user not found: {0}")]
    NotFound(i64),
    #[error("user store lock poisoned")]
    Poisoned,
}

/// A persisted user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Auto-assigned primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Creation timestamp. Only absent for rows written outside this service.
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A validated user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// `None` lets the store stamp the row with the current time.
    pub created_at: Option<DateTime<Utc>>,
}
