//! In-memory storage backend for testing.

use crate::core::users::NamedUser;
use crate::error::Result;
use crate::storage::traits::UserStore;
use std::sync::{PoisonError, RwLock};

/// In-memory storage backend for testing.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    users: RwLock<Option<Vec<NamedUser>>>,
}

impl MemoryBackend {
    /// Create a new, empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryBackend {
    fn load_users(&self) -> Result<Option<Vec<NamedUser>>> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        Ok(users.clone())
    }

    fn save_users(&self, users: &[NamedUser]) -> Result<()> {
        let mut stored = self.users.write().unwrap_or_else(PoisonError::into_inner);
        *stored = Some(users.to_vec());
        Ok(())
    }
}
