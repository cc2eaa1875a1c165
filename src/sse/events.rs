//! Typed stream events and frame parse errors.

use serde::Serialize;

use crate::models::Article;

/// One event decoded from the chat stream.
///
/// Serializes to the normalized record handed to presentation layers:
/// `{"type": "chunk" | "end" | "complete" | "error", "messageId": ..., ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum StreamEvent {
    /// A piece of the assistant answer.
    Chunk { content: String, message_id: String },
    /// The message is finished; carries the validated supporting articles.
    End {
        message_id: String,
        resources: Vec<Article>,
        metadata: serde_json::Value,
    },
    /// The turn is complete; the session has been updated.
    Complete {
        message_id: String,
        /// Final answer text, serialized as `content`
        #[serde(rename = "content")]
        answer: Option<String>,
    },
    /// The backend reported an error. Terminal for the stream.
    Error {
        message: String,
        code: Option<String>,
    },
}

impl StreamEvent {
    /// Wire discriminator this event was decoded from.
    pub fn event_type_name(&self) -> &'static str {
        match self {
            StreamEvent::Chunk { .. } => "message",
            StreamEvent::End { .. } => "message_end",
            StreamEvent::Complete { .. } => "workflow_finished",
            StreamEvent::Error { .. } => "error",
        }
    }

    /// Message id, if the event belongs to a message.
    pub fn message_id(&self) -> Option<&str> {
        match self {
            StreamEvent::Chunk { message_id, .. }
            | StreamEvent::End { message_id, .. }
            | StreamEvent::Complete { message_id, .. } => Some(message_id),
            StreamEvent::Error { .. } => None,
        }
    }

    /// True for the one event kind that ends dispatch.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Error { .. })
    }
}

/// Errors that can occur while decoding a single frame.
#[derive(Debug, Clone, PartialEq)]
pub enum SseParseError {
    /// The payload after `data: ` is not a JSON event object
    InvalidJson { source: String },
}

impl std::fmt::Display for SseParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SseParseError::InvalidJson { source } => write!(f, "Invalid JSON in frame: {}", source),
        }
    }
}

impl std::error::Error for SseParseError {}
