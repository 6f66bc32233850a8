//! In-memory user store.

use std::sync::Mutex;

use chrono::Utc;

use crate::{NewUser, User, UserError, UserStore};

#[derive(Debug, Default)]
struct Rows {
    last_id: i64,
    users: Vec<User>,
}

/// A [`UserStore`] that keeps rows in a mutex-guarded vector.
///
/// Ids start at 1 and are never reused. Intended for tests and for wiring
/// the HTTP layer without a database file.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    rows: Mutex<Rows>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryUserStore {
    fn ensure_schema(&self) -> Result<(), UserError> {
        Ok(())
    }

    fn list(&self) -> Result<Vec<User>, UserError> {
        let rows = self.rows.lock().map_err(|_| UserError::Poisoned)?;
        Ok(rows.users.clone())
    }

    fn create(&self, new_user: &NewUser) -> Result<User, UserError> {
        let mut rows = self.rows.lock().map_err(|_| UserError::Poisoned)?;
        rows.last_id += 1;

        let user = User {
            id: rows.last_id,
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            created_at: Some(new_user.created_at.unwrap_or_else(Utc::now)),
        };
        rows.users.push(user.clone());
        Ok(user)
    }

    fn get(&self, id: i64) -> Result<User, UserError> {
        let rows = self.rows.lock().map_err(|_| UserError::Poisoned)?;
        rows.users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(UserError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            created_at: None,
        }
    }

    #[test]
    fn ids_increase_from_one() {
        let store = MemoryUserStore::new();
        let a = store.create(&new_user("Ada")).unwrap();
        let b = store.create(&new_user("Grace")).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(a.created_at.is_some(), "unset timestamp should become now");
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = MemoryUserStore::new();
        store.create(&new_user("Ada")).unwrap();
        assert!(matches!(store.get(42), Err(UserError::NotFound(42))));
    }

    #[test]
    fn list_returns_insertion_order() {
        let store = MemoryUserStore::new();
        for name in ["Ada", "Grace", "Barbara"] {
            store.create(&new_user(name)).unwrap();
        }
        let names: Vec<String> = store.list().unwrap().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Ada", "Grace", "Barbara"]);
    }
}
