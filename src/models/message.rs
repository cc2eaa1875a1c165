use serde::Serialize;

use super::Article;

/// Assistant message being assembled from stream events.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccumulatedMessage {
    pub message_id: String,
    /// Concatenation of every chunk received so far
    pub content: String,
    /// Set at most once, by the end event
    pub resources: Option<Vec<Article>>,
    /// No more chunks are appended once sealed
    pub sealed: bool,
}

impl AccumulatedMessage {
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            ..Default::default()
        }
    }

    pub fn articles(&self) -> &[Article] {
        self.resources.as_deref().unwrap_or(&[])
    }
}

/// A finished request/response exchange, as returned by
/// [`ChatClient::ask`](crate::client::ChatClient::ask).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub query: String,
    pub messages: Vec<AccumulatedMessage>,
    /// Final answer from `workflow_finished`, if the backend sent one
    pub answer: Option<String>,
    /// Conversation the turn belongs to, after the turn
    pub conversation_id: Option<String>,
}

impl ChatTurn {
    /// The text to show for this turn.
    ///
    /// Prefers the streamed content and falls back to the final answer.
    pub fn text(&self) -> String {
        let streamed: String = self.messages.iter().map(|m| m.content.as_str()).collect();
        if streamed.is_empty() {
            self.answer.clone().unwrap_or_default()
        } else {
            streamed
        }
    }

    pub fn articles(&self) -> impl Iterator<Item = &Article> {
        self.messages.iter().flat_map(|m| m.articles().iter())
    }
}
