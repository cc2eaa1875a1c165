//! Error category classification.
//!
//! Categories let the caller decide what to tell the user and whether a new
//! turn is worth attempting. The client itself never retries.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection problems, lost streams.
    Network,

    /// Backend errors: 5xx responses and `error` events in the stream.
    Server,

    /// Requests the backend rejected (4xx) or data we could not interpret.
    Client,

    /// Invalid or missing settings.
    Configuration,

    /// Local filesystem problems (identity storage).
    System,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::System => "system",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your connection and send the message again",
            ErrorCategory::Server => "The server may be busy. Try again in a moment",
            ErrorCategory::Client => "Rephrase the question or reset the conversation",
            ErrorCategory::Configuration => {
                "Check RAGCHAT_BASE_URL, RAGCHAT_API_KEY and RAGCHAT_USER"
            }
            ErrorCategory::System => "Check permissions on the configuration directory",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
