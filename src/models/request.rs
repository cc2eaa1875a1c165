use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The only response mode this client speaks.
pub const RESPONSE_MODE_STREAMING: &str = "streaming";

/// Body of `POST /chat-messages`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    /// Workflow inputs; always sent, usually empty
    pub inputs: Map<String, Value>,
    pub query: String,
    pub response_mode: String,
    /// Empty string starts a new conversation
    pub conversation_id: String,
    pub user: String,
    pub files: Vec<Value>,
}

impl ChatRequest {
    /// Create a streaming request. Pass `""` as `conversation_id` for a new
    /// conversation.
    pub fn new(
        query: impl Into<String>,
        conversation_id: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            inputs: Map::new(),
            query: query.into(),
            response_mode: RESPONSE_MODE_STREAMING.to_string(),
            conversation_id: conversation_id.into(),
            user: user.into(),
            files: Vec::new(),
        }
    }
}
