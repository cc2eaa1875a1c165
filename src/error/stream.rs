//! Streaming-related error types.
//!
//! Errors that end a turn while the event stream is being consumed.

use std::fmt;

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError {
    /// The byte source failed after the response started.
    ConnectionLost {
        message: String,
    },

    /// Invalid JSON where a well-formed document was required.
    InvalidJson {
        message: String,
    },

    /// Backend reported an error via an `error` event.
    BackendError {
        code: Option<String>,
        message: String,
    },

    /// Generic stream error.
    Other {
        message: String,
    },
}

impl StreamError {
    /// Check if this error is likely transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StreamError::ConnectionLost { .. })
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::ConnectionLost { .. } => {
                "Connection to the chat server was lost. Partial answers are kept.".to_string()
            }
            StreamError::InvalidJson { .. } => {
                "Received invalid data from the server. Please try again.".to_string()
            }
            StreamError::BackendError { message, .. } => format!("Server error: {}", message),
            StreamError::Other { message } => format!("Stream error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::ConnectionLost { .. } => "E_STREAM_CONN",
            StreamError::InvalidJson { .. } => "E_STREAM_JSON",
            StreamError::BackendError { .. } => "E_STREAM_BACKEND",
            StreamError::Other { .. } => "E_STREAM_OTHER",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::ConnectionLost { message } => {
                write!(f, "Stream connection lost: {}", message)
            }
            StreamError::InvalidJson { message } => write!(f, "Invalid JSON: {}", message),
            // The backend message is shown verbatim; it is already human-readable.
            StreamError::BackendError { code, message } => match code {
                Some(c) => write!(f, "{} [{}]", message, c),
                None => write!(f, "{}", message),
            },
            StreamError::Other { message } => write!(f, "Stream error: {}", message),
        }
    }
}

impl std::error::Error for StreamError {}
