//! Conversation continuity across turns.

/// Holds the backend's conversation id between turns.
///
/// Set from `workflow_finished` by the dispatcher and sent verbatim with
/// every later request until [`reset`](Self::reset).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationSession {
    conversation_id: Option<String>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    /// Value for the request body's `conversation_id` field.
    pub fn request_value(&self) -> &str {
        self.conversation_id().unwrap_or("")
    }

    pub fn is_active(&self) -> bool {
        self.conversation_id.is_some()
    }

    /// Record the id reported by the backend. Empty ids are ignored.
    pub(crate) fn update(&mut self, conversation_id: &str) {
        if conversation_id.is_empty() {
            return;
        }
        if self.conversation_id.as_deref() != Some(conversation_id) {
            tracing::info!(conversation_id, "conversation started");
        }
        self.conversation_id = Some(conversation_id.to_string());
    }

    /// Forget the conversation; the next request starts a new one.
    pub fn reset(&mut self) {
        if let Some(previous) = self.conversation_id.take() {
            tracing::info!(conversation_id = %previous, "conversation reset");
        }
    }
}
