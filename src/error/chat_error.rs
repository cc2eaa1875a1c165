//! Unified error type for the chat client.
//!
//! `ChatError` is what the error callback receives and what `ask` returns.
//! Its `Display` output is the human-readable failure description.

use thiserror::Error;

use super::category::ErrorCategory;
use super::network::NetworkError;
use super::stream::StreamError;
use crate::config::ConfigError;
use crate::traits::{HttpError, IdentityError};

/// Unified error type for the chat client.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Transport failures: connection, non-success status, body read errors.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Failures while consuming the event stream, including backend `error` events.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// Invalid client configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The caller identifier could not be loaded or stored.
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

impl ChatError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChatError::Network(NetworkError::HttpStatus { status, .. }) if *status < 500 => {
                ErrorCategory::Client
            }
            ChatError::Network(NetworkError::HttpStatus { .. }) => ErrorCategory::Server,
            ChatError::Network(NetworkError::InvalidResponse { .. }) => ErrorCategory::Client,
            ChatError::Network(_) => ErrorCategory::Network,
            ChatError::Stream(StreamError::ConnectionLost { .. }) => ErrorCategory::Network,
            ChatError::Stream(StreamError::InvalidJson { .. }) => ErrorCategory::Client,
            ChatError::Stream(_) => ErrorCategory::Server,
            ChatError::Config(_) => ErrorCategory::Configuration,
            ChatError::Identity(_) => ErrorCategory::System,
        }
    }

    /// Check if this error is likely transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            ChatError::Network(err) => err.is_retryable(),
            ChatError::Stream(err) => err.is_retryable(),
            ChatError::Config(_) | ChatError::Identity(_) => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Network(err) => err.user_message(),
            ChatError::Stream(err) => err.user_message(),
            ChatError::Config(err) => format!("Configuration problem: {}", err),
            ChatError::Identity(err) => format!("Could not access the user identity: {}", err),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::Network(err) => err.error_code(),
            ChatError::Stream(err) => err.error_code(),
            ChatError::Config(_) => "E_CONFIG",
            ChatError::Identity(_) => "E_IDENTITY",
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }

    /// True when the backend itself signalled the failure through the stream.
    pub fn is_backend_error(&self) -> bool {
        matches!(self, ChatError::Stream(StreamError::BackendError { .. }))
    }
}

impl From<HttpError> for ChatError {
    fn from(err: HttpError) -> Self {
        ChatError::Network(err.into())
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::Stream(StreamError::InvalidJson {
            message: err.to_string(),
        })
    }
}
