//! Assembles assistant messages from stream events.

use crate::models::{AccumulatedMessage, Article};
use crate::sse::StreamEvent;

/// Builds [`AccumulatedMessage`]s from a turn's events.
///
/// Only the most recent message is open for appends. A chunk with a new
/// message id starts a new message; earlier messages are never merged or
/// reopened.
#[derive(Debug, Default)]
pub struct MessageAccumulator {
    messages: Vec<AccumulatedMessage>,
    answer: Option<String>,
}

impl MessageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one event. Returns the running content after a chunk was
    /// appended, for live display.
    pub fn apply(&mut self, event: &StreamEvent) -> Option<&str> {
        match event {
            StreamEvent::Chunk {
                content,
                message_id,
            } => self.push_chunk(message_id, content),
            StreamEvent::End {
                message_id,
                resources,
                ..
            } => {
                self.finish(message_id, resources.clone());
                None
            }
            StreamEvent::Complete { message_id, answer } => {
                self.complete(message_id, answer.clone());
                None
            }
            StreamEvent::Error { .. } => None,
        }
    }

    /// Append a chunk, opening a new message when the id changes.
    pub fn push_chunk(&mut self, message_id: &str, content: &str) -> Option<&str> {
        let same_id = self
            .messages
            .last()
            .is_some_and(|m| m.message_id == message_id);

        if !same_id {
            self.messages.push(AccumulatedMessage::new(message_id));
        }

        let message = self.messages.last_mut()?;
        if message.sealed {
            tracing::warn!(message_id, "chunk for sealed message ignored");
            return None;
        }
        message.content.push_str(content);
        Some(message.content.as_str())
    }

    /// Attach resources to the open message with this id and seal it.
    ///
    /// Returns false, dropping the resources, when the open message has a
    /// different id or already carries resources.
    pub fn finish(&mut self, message_id: &str, resources: Vec<Article>) -> bool {
        match self.messages.last_mut() {
            Some(message) if message.message_id == message_id && message.resources.is_none() => {
                message.resources = Some(resources);
                message.sealed = true;
                true
            }
            _ => {
                tracing::debug!(
                    message_id,
                    count = resources.len(),
                    "no open message for end event, resources dropped"
                );
                false
            }
        }
    }

    /// Seal the open message with this id and keep the final answer.
    pub fn complete(&mut self, message_id: &str, answer: Option<String>) {
        if let Some(message) = self.messages.last_mut() {
            if message.message_id == message_id {
                message.sealed = true;
            }
        }
        if answer.is_some() {
            self.answer = answer;
        }
    }

    /// The message currently receiving chunks.
    pub fn current(&self) -> Option<&AccumulatedMessage> {
        self.messages.last()
    }

    pub fn messages(&self) -> &[AccumulatedMessage] {
        &self.messages
    }

    /// Final answer from the last `Complete`, if any.
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn into_parts(self) -> (Vec<AccumulatedMessage>, Option<String>) {
        (self.messages, self.answer)
    }
}
