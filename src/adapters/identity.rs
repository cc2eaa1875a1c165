//! Caller identity storage backends.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::traits::{IdentityError, IdentityProvider};

const APP_DIR: &str = "ragchat";
const USER_ID_FILE: &str = "user_id";

/// Stores the caller identifier as a single line in a text file.
#[derive(Debug, Clone)]
pub struct FileIdentity {
    path: PathBuf,
}

impl FileIdentity {
    /// Use `<config dir>/ragchat/user_id`.
    pub fn new() -> Result<Self, IdentityError> {
        let dir = dirs::config_dir().ok_or(IdentityError::NoStorageLocation)?;
        Ok(Self {
            path: dir.join(APP_DIR).join(USER_ID_FILE),
        })
    }

    /// Use an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IdentityProvider for FileIdentity {
    fn load(&self) -> Result<Option<String>, IdentityError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| IdentityError::LoadFailed(format!("{}: {}", self.path.display(), e)))?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }

    fn save(&self, user_id: &str) -> Result<(), IdentityError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                IdentityError::SaveFailed(format!("{}: {}", parent.display(), e))
            })?;
        }
        fs::write(&self.path, format!("{}\n", user_id))
            .map_err(|e| IdentityError::SaveFailed(format!("{}: {}", self.path.display(), e)))
    }
}

/// Keeps the identifier in memory for the lifetime of the value.
#[derive(Debug, Default)]
pub struct InMemoryIdentity {
    user_id: Mutex<Option<String>>,
}

impl InMemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_id(user_id: &str) -> Self {
        Self {
            user_id: Mutex::new(Some(user_id.to_string())),
        }
    }
}

impl IdentityProvider for InMemoryIdentity {
    fn load(&self) -> Result<Option<String>, IdentityError> {
        let guard = self
            .user_id
            .lock()
            .map_err(|e| IdentityError::LoadFailed(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, user_id: &str) -> Result<(), IdentityError> {
        let mut guard = self
            .user_id
            .lock()
            .map_err(|e| IdentityError::SaveFailed(e.to_string()))?;
        *guard = Some(user_id.to_string());
        Ok(())
    }
}
