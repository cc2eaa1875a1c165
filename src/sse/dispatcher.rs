//! Event dispatch: frames in, typed events out.
//!
//! The dispatcher owns the only write access to the conversation session
//! during a turn. It records the conversation id from `workflow_finished`
//! and stops handling frames once an `error` event has been seen.

use crate::resources::ResourceExtractor;
use crate::session::ConversationSession;
use crate::sse::events::StreamEvent;
use crate::sse::parser::parse_frame;
use crate::sse::payloads::WireEvent;

/// Routes frames of one stream into [`StreamEvent`]s.
#[derive(Debug)]
pub struct EventDispatcher<'a> {
    session: &'a mut ConversationSession,
    extractor: ResourceExtractor,
    terminated: bool,
}

impl<'a> EventDispatcher<'a> {
    pub fn new(session: &'a mut ConversationSession) -> Self {
        Self {
            session,
            extractor: ResourceExtractor::new(),
            terminated: false,
        }
    }

    /// Use a specific extractor (fixed clock in tests).
    pub fn with_extractor(mut self, extractor: ResourceExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// True once an `error` event has been dispatched.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Handle one frame.
    ///
    /// Returns `None` for frames that carry no event: no `data: ` prefix,
    /// undecodable payloads (logged and skipped), unknown discriminators, and
    /// every frame after a terminal `error` event.
    pub fn dispatch(&mut self, frame: &str) -> Option<StreamEvent> {
        if self.terminated {
            return None;
        }

        let payload = match parse_frame(frame) {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, frame_len = frame.len(), "skipping undecodable frame");
                return None;
            }
        };

        match payload {
            WireEvent::Message(message) => Some(StreamEvent::Chunk {
                content: message.answer.unwrap_or_default(),
                message_id: message.message_id.unwrap_or_default(),
            }),
            WireEvent::MessageEnd(end) => {
                let resources = self.extractor.extract_values(end.retriever_resources());
                Some(StreamEvent::End {
                    message_id: end.message_id.unwrap_or_default(),
                    resources,
                    metadata: end.metadata.unwrap_or(serde_json::Value::Null),
                })
            }
            WireEvent::WorkflowFinished(finished) => {
                let answer = finished.answer();
                if let Some(conversation_id) = finished.conversation_id.as_deref() {
                    self.session.update(conversation_id);
                }
                Some(StreamEvent::Complete {
                    message_id: finished.message_id.unwrap_or_default(),
                    answer,
                })
            }
            WireEvent::Error(error) => {
                self.terminated = true;
                let code = error.code_string();
                let message = error
                    .message_text()
                    .unwrap_or_else(|| "Unknown error".to_string());
                tracing::error!(%message, code = ?code, "backend reported an error");
                Some(StreamEvent::Error { message, code })
            }
            WireEvent::Unknown => {
                tracing::trace!("ignoring unknown event");
                None
            }
        }
    }
}
