//! Storage trait definitions.

use crate::core::users::NamedUser;
use crate::error::Result;

/// Storage backend for the local named-user directory.
pub trait UserStore: Send + Sync {
    /// Load the stored users.
    ///
    /// Returns `None` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails or the stored
    /// data cannot be decoded.
    fn load_users(&self) -> Result<Option<Vec<NamedUser>>>;

    /// Replace the stored users.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn save_users(&self, users: &[NamedUser]) -> Result<()>;
}
