//! Client configuration.
//!
//! Settings come from the builder methods or from the environment:
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `RAGCHAT_BASE_URL` | API base, `/chat-messages` is appended | `http://localhost/v1` |
//! | `RAGCHAT_API_KEY` | bearer token | none (no `Authorization` header) |
//! | `RAGCHAT_USER` | caller identifier | resolved through an `IdentityProvider` |
//!
//! # Example
//!
//! ```ignore
//! use ragchat::config::ClientConfig;
//!
//! let config = ClientConfig::from_env()
//!     .with_base_url("https://chat.example.com/v1")
//!     .with_api_key("app-xxxx");
//! ```

use thiserror::Error;

/// Default API base when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost/v1";

pub const ENV_BASE_URL: &str = "RAGCHAT_BASE_URL";
pub const ENV_API_KEY: &str = "RAGCHAT_API_KEY";
pub const ENV_USER: &str = "RAGCHAT_USER";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid base URL '{0}': expected http:// or https://")]
    InvalidBaseUrl(String),
}

/// Connection settings for a [`crate::client::ChatClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API base URL without trailing slash
    pub base_url: String,
    /// Bearer token sent in the `Authorization` header
    pub api_key: Option<String>,
    /// Fixed caller identifier; when unset the identity provider is used
    pub user: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            user: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from `RAGCHAT_*` environment variables.
    ///
    /// Empty values count as unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = env_non_empty(ENV_BASE_URL) {
            config = config.with_base_url(&url);
        }
        config.api_key = env_non_empty(ENV_API_KEY);
        config.user = env_non_empty(ENV_USER);
        config
    }

    /// Set the API base URL. A trailing `/` is dropped.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn with_user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }

    /// Check that the base URL is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lower = self.base_url.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidBaseUrl(self.base_url.clone()))
        }
    }

    /// Endpoint that accepts chat turns.
    pub fn chat_messages_url(&self) -> String {
        format!("{}/chat-messages", self.base_url)
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
