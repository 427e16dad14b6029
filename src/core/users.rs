//! Local directory of named users.
//!
//! Names are display-only and never sent to the server; the numeric id is
//! the history partition key.

use crate::api::UserId;
use crate::error::{Error, Result};
use crate::storage::UserStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A locally known user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedUser {
    /// History partition key.
    pub id: UserId,

    /// Friendly name.
    pub name: String,

    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}

impl NamedUser {
    /// Entry used when nothing is stored yet.
    #[must_use]
    pub fn first() -> Self {
        Self {
            id: UserId::FIRST,
            name: "User 1".to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Named users backed by a `UserStore`.
pub struct UserDirectory<'a> {
    store: &'a dyn UserStore,
    users: Vec<NamedUser>,
}

impl<'a> UserDirectory<'a> {
    /// Load the directory; an empty store yields a single `User 1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load(store: &'a dyn UserStore) -> Result<Self> {
        let users = match store.load_users()? {
            Some(users) if !users.is_empty() => users,
            _ => vec![NamedUser::first()],
        };
        Ok(Self { store, users })
    }

    /// All users in creation order.
    #[must_use]
    pub fn users(&self) -> &[NamedUser] {
        &self.users
    }

    /// Look up a user by id.
    #[must_use]
    pub fn find(&self, id: UserId) -> Option<&NamedUser> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Friendly name for an id, falling back to `User {id}`.
    #[must_use]
    pub fn display_name(&self, id: UserId) -> String {
        self.find(id)
            .map_or_else(|| format!("User {id}"), |u| u.name.clone())
    }

    /// Add a user with the next free id and persist the directory.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name, or a storage error.
    pub fn create_user(&mut self, name: &str) -> Result<NamedUser> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("Please enter a user name.".to_string()));
        }

        let next = self
            .users
            .iter()
            .map(|u| u.id.get())
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| Error::Validation("No user IDs left.".to_string()))?;
        let user = NamedUser {
            id: UserId::new(next)?,
            name: name.to_string(),
            created_at: Utc::now(),
        };

        self.users.push(user.clone());
        self.store.save_users(&self.users)?;
        debug!(id = %user.id, "created named user");
        Ok(user)
    }

    /// Remove a user and persist the directory.
    ///
    /// Returns the user to switch to when `id` was the `active` one.
    ///
    /// # Errors
    ///
    /// Refuses to remove the last user, reports unknown ids, and
    /// propagates storage errors.
    pub fn delete_user(&mut self, id: UserId, active: UserId) -> Result<Option<UserId>> {
        if self.find(id).is_none() {
            return Err(Error::UserNotFound(id.get()));
        }
        // Stored lists may repeat an id, so count what would remain
        let remaining: Vec<NamedUser> = self
            .users
            .iter()
            .filter(|u| u.id != id)
            .cloned()
            .collect();
        let Some(first) = remaining.first().map(|u| u.id) else {
            return Err(Error::Validation("Cannot delete the last user.".to_string()));
        };

        self.users = remaining;
        self.store.save_users(&self.users)?;
        debug!(%id, "deleted named user");

        Ok((id == active).then_some(first))
    }
}
