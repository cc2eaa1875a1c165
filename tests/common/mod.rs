//! Common test utilities for integration tests.
//!
//! Frame builders for the chat event stream and shared mock setup.
//!
//! # Example
//!
//! ```ignore
//! use common::{message_frame, sse_body};
//!
//! let body = sse_body(&[message_frame("m1", "Hello")]);
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use serde_json::{json, Value};

/// Encode one event as a complete `data: <json>\n\n` frame.
pub fn frame(event: &Value) -> String {
    format!("data: {}\n\n", event)
}

pub fn message_frame(message_id: &str, answer: &str) -> String {
    frame(&json!({
        "event": "message",
        "message_id": message_id,
        "answer": answer,
    }))
}

/// `message_end` with `retriever_resources` built from `(content, score)` pairs.
pub fn end_frame(message_id: &str, resources: &[(&str, f64)]) -> String {
    let resources: Vec<Value> = resources
        .iter()
        .map(|(content, score)| json!({"content": content, "score": score}))
        .collect();
    frame(&json!({
        "event": "message_end",
        "message_id": message_id,
        "metadata": {"retriever_resources": resources},
    }))
}

pub fn finished_frame(message_id: &str, conversation_id: &str) -> String {
    frame(&json!({
        "event": "workflow_finished",
        "message_id": message_id,
        "conversation_id": conversation_id,
        "data": {"outputs": {"answer": null}},
    }))
}

pub fn error_frame(message: &str) -> String {
    frame(&json!({"event": "error", "message": message}))
}

/// Join frames into one response body.
pub fn sse_body(frames: &[String]) -> String {
    frames.concat()
}

/// A full turn: two chunks, an end with one valid and one invalid resource,
/// and a finish that sets `conversation_id`.
pub fn standard_turn(conversation_id: &str) -> String {
    sse_body(&[
        message_frame("msg-1", "Retrieval-augmented "),
        message_frame("msg-1", "generation."),
        end_frame(
            "msg-1",
            &[
                ("title: **RAG** basics;content: Grounding answers;slug: rag-basics", 0.92),
                ("title: A;content: B", 0.5),
            ],
        ),
        finished_frame("msg-1", conversation_id),
    ])
}
