//! SQLite-backed user store.

use geist_db::DbPool;
use rusqlite::{params, OptionalExtension, Row};

use crate::{NewUser, User, UserError, UserStore, USERS_TABLE};

fn select_users() -> String {
    format!(
        "SELECT {} FROM {}",
        USERS_TABLE.column_list(),
        USERS_TABLE.name
    )
}

/// [`UserStore`] over the shared SQLite pool, issuing parameterized
/// statements against [`USERS_TABLE`].
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: DbPool,
}

impl SqliteUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn map_row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        created_at: row.get(3)?,
    })
}

impl UserStore for SqliteUserStore {
    fn ensure_schema(&self) -> Result<(), UserError> {
        let conn = self.pool.get()?;
        USERS_TABLE.ensure(&conn)?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<User>, UserError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY id ASC", select_users()))?;

        let rows = stmt.query_map([], map_row_to_user)?;
        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    fn create(&self, new_user: &NewUser) -> Result<User, UserError> {
        let conn = self.pool.get()?;
        let returning = USERS_TABLE.column_list();
        // An unset timestamp is left out so the column default applies.
        let user = match new_user.created_at {
            Some(created_at) => conn.query_row(
                &format!(
                    "INSERT INTO users (name, email, created_at) VALUES (?1, ?2, ?3) RETURNING {returning}"
                ),
                params![new_user.name, new_user.email, created_at],
                map_row_to_user,
            )?,
            None => conn.query_row(
                &format!("INSERT INTO users (name, email) VALUES (?1, ?2) RETURNING {returning}"),
                params![new_user.name, new_user.email],
                map_row_to_user,
            )?,
        };

        tracing::debug!(user_id = user.id, "user inserted");
        Ok(user)
    }

    fn get(&self, id: i64) -> Result<User, UserError> {
        let conn = self.pool.get()?;
        conn.query_row(
            &format!("{} WHERE id = ?1", select_users()),
            [id],
            map_row_to_user,
        )
        .optional()?
        .ok_or(UserError::NotFound(id))
    }
}
