//! Caller identity provider trait abstraction.
//!
//! The backend wants a stable `user` string on every request. Where it lives
//! (a file, a keychain, a browser store) is up to the embedding application;
//! the client only needs to load it, or create and remember one.

use uuid::Uuid;

/// Identity storage errors.
#[derive(Debug, Clone, PartialEq)]
pub enum IdentityError {
    /// Failed to load the identifier
    LoadFailed(String),
    /// Failed to save the identifier
    SaveFailed(String),
    /// No storage location is available on this platform
    NoStorageLocation,
}

impl std::fmt::Display for IdentityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentityError::LoadFailed(msg) => write!(f, "Failed to load user id: {}", msg),
            IdentityError::SaveFailed(msg) => write!(f, "Failed to save user id: {}", msg),
            IdentityError::NoStorageLocation => write!(f, "No location to store the user id"),
        }
    }
}

impl std::error::Error for IdentityError {}

/// Trait for persistent caller identity storage.
pub trait IdentityProvider: Send + Sync {
    /// Load the stored identifier.
    ///
    /// # Returns
    /// - `Ok(Some(id))` if an identifier is stored
    /// - `Ok(None)` if nothing is stored yet
    /// - `Err(error)` if loading failed
    fn load(&self) -> Result<Option<String>, IdentityError>;

    /// Store the identifier, replacing any previous one.
    fn save(&self, user_id: &str) -> Result<(), IdentityError>;
}

/// Load the stored caller identifier, or generate and store a new one.
///
/// Generated identifiers have the form `user-<uuid v4>`.
pub fn resolve_user_id<P: IdentityProvider + ?Sized>(provider: &P) -> Result<String, IdentityError> {
    if let Some(existing) = provider.load()? {
        let existing = existing.trim();
        if !existing.is_empty() {
            return Ok(existing.to_string());
        }
    }

    let user_id = format!("user-{}", Uuid::new_v4());
    provider.save(&user_id)?;
    tracing::info!(%user_id, "generated new user id");
    Ok(user_id)
}
