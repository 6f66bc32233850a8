use crate::{NewUser, User, UserError};

/// Persistence capability for users.
///
/// Methods block; async callers run them on the blocking thread pool.
pub trait UserStore: Send + Sync {
    /// Creates the backing table if it is missing. Safe to call repeatedly.
    fn ensure_schema(&self) -> Result<(), UserError>;

    /// Returns every user ordered by ascending id.
    fn list(&self) -> Result<Vec<User>, UserError>;

    /// Inserts `new_user` and returns the stored row, including its
    /// assigned id and effective creation time.
    fn create(&self, new_user: &NewUser) -> Result<User, UserError>;

    /// Fetches one user. Returns [`UserError::NotFound`] when no row has
    /// this id.
    fn get(&self, id: i64) -> Result<User, UserError>;
}
