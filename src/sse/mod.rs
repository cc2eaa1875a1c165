//! SSE (Server-Sent Events) stream decoding
//!
//! The chat backend answers with frames of the form `data: <json>` followed
//! by a blank line. The JSON object carries an `event` discriminator:
//! `message`, `message_end`, `workflow_finished` or `error`.
//!
//! # Module structure
//! - `reader` - bytes to frames (UTF-8 decoding, reassembly across reads)
//! - `parser` - frame to typed payload
//! - `payloads` - internal payload deserialization structs
//! - `dispatcher` - payload to [`StreamEvent`], session update, error cut-off
//! - `events` - [`StreamEvent`] and [`SseParseError`]

mod dispatcher;
mod events;
mod parser;
mod payloads;
mod reader;

pub use dispatcher::EventDispatcher;
pub use events::{SseParseError, StreamEvent};
pub use parser::{frame_payload, DATA_PREFIX};
pub use reader::{frame_stream, FrameReader, Utf8Decoder, FRAME_DELIMITER};
