//! SSE payload deserialization structs
//!
//! The JSON object after `data: ` is validated here into a closed set of
//! variants keyed by its `event` field. Unknown discriminators land in
//! [`WireEvent::Unknown`] so new backend events never break a stream.

use serde::Deserialize;
use serde_json::Value;

/// Decoded frame payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub(crate) enum WireEvent {
    Message(MessagePayload),
    MessageEnd(MessageEndPayload),
    WorkflowFinished(WorkflowFinishedPayload),
    Error(ErrorPayload),
    #[serde(other)]
    Unknown,
}

/// `message`: one answer chunk
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct MessagePayload {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
}

/// `message_end`: message finished, resources in `metadata.retriever_resources`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct MessageEndPayload {
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl MessageEndPayload {
    /// Raw resource entries, untouched. Each one is validated separately.
    pub fn retriever_resources(&self) -> &[Value] {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("retriever_resources"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// `workflow_finished`: turn complete, carries the conversation id
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct WorkflowFinishedPayload {
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl WorkflowFinishedPayload {
    /// Final answer at `data.outputs.answer`, when the workflow reports one.
    pub fn answer(&self) -> Option<String> {
        self.data
            .as_ref()
            .and_then(|d| d.pointer("/outputs/answer"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

/// `error`: backend failure
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct ErrorPayload {
    /// Usually a string; any other JSON is shown as its JSON text
    #[serde(default)]
    pub message: Option<Value>,
    /// String or numeric code, depending on the backend version
    #[serde(default)]
    pub code: Option<Value>,
}

impl ErrorPayload {
    pub fn message_text(&self) -> Option<String> {
        match &self.message {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        }
    }

    pub fn code_string(&self) -> Option<String> {
        match &self.code {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        }
    }
}
