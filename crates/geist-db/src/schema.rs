//! Explicit table definitions.
//!
//! A table is declared as a static list of columns. The only DDL ever issued
//! is `CREATE TABLE IF NOT EXISTS`, so ensuring a table is safe to repeat.

use rusqlite::Connection;
use thiserror::Error;

/// A single column of a table definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Column name as stored in SQLite.
    pub name: &'static str,
    /// Declared SQL type (e.g. `INTEGER`, `TEXT`, `TIMESTAMP`).
    pub sql_type: &'static str,
    /// Constraint clause appended after the type. May be empty.
    pub constraints: &'static str,
}

impl Column {
    fn definition(&self) -> String {
        if self.constraints.is_empty() {
            format!("\"{}\" {}", self.name, self.sql_type)
        } else {
            format!("\"{}\" {} {}", self.name, self.sql_type, self.constraints)
        }
    }
}

/// A fixed table definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    /// Table name.
    pub name: &'static str,
    /// Columns in declaration order.
    pub columns: &'static [Column],
}

/// Errors that can occur while creating a table.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The store rejected the create statement.
    #[error("failed to create table '{table}': {source}")]
    CreateFailed {
        /// The table that could not be created.
        table: &'static str,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },
}

impl Table {
    /// Renders the idempotent `CREATE TABLE IF NOT EXISTS` statement.
    pub fn create_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(Column::definition)
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE IF NOT EXISTS \"{}\" ({})", self.name, columns)
    }

    /// Comma-separated column names, for `SELECT` and `RETURNING` lists.
    pub fn column_list(&self) -> String {
        self.columns
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Creates the table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::CreateFailed` if SQLite rejects the statement
    /// (read-only file, corruption, conflicting definition syntax).
    pub fn ensure(&self, conn: &Connection) -> Result<(), SchemaError> {
        conn.execute_batch(&self.create_sql())
            .map_err(|source| SchemaError::CreateFailed {
                table: self.name,
                source,
            })?;
        tracing::debug!(table = self.name, "table ensured");
        Ok(())
    }
}
