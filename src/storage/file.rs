//! File-based storage backend.

use crate::core::users::NamedUser;
use crate::error::Result;
use crate::storage::traits::UserStore;
use std::fs;
use std::path::PathBuf;

/// Name of the user directory file under the scout home.
const USERS_FILE: &str = "users.json";

/// File-based storage backend with atomic writes.
#[derive(Debug)]
pub struct FileBackend {
    base_dir: PathBuf,
}

impl FileBackend {
    /// Create a new file backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Path to the user directory file.
    #[must_use]
    pub fn users_path(&self) -> PathBuf {
        self.base_dir.join(USERS_FILE)
    }
}

impl UserStore for FileBackend {
    fn load_users(&self) -> Result<Option<Vec<NamedUser>>> {
        let path = self.users_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        let users: Vec<NamedUser> = serde_json::from_str(&contents)?;
        Ok(Some(users))
    }

    fn save_users(&self, users: &[NamedUser]) -> Result<()> {
        let path = self.users_path();
        let temp = path.with_extension("tmp");

        let contents = serde_json::to_string_pretty(users)?;
        fs::write(&temp, &contents)?;

        // Rename is atomic, readers never see a half-written file
        fs::rename(&temp, &path)?;

        Ok(())
    }
}
