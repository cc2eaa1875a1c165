//! Frame parsing.
//!
//! A frame carries an event only when it starts with `data: `; anything else
//! (comments, keep-alives, `event:` lines) is not for us.

use crate::sse::events::SseParseError;
use crate::sse::payloads::WireEvent;

/// Prefix marking an event-carrying frame.
pub const DATA_PREFIX: &str = "data: ";

/// Payload text of a frame, or `None` when the frame carries no event.
pub fn frame_payload(frame: &str) -> Option<&str> {
    frame.strip_prefix(DATA_PREFIX)
}

/// Parse a frame into its typed payload.
///
/// Returns:
/// - `Ok(Some(event))` - the frame carried a JSON event object
/// - `Ok(None)` - the frame has no `data: ` prefix
/// - `Err(error)` - the payload is not a valid event object
pub(crate) fn parse_frame(frame: &str) -> Result<Option<WireEvent>, SseParseError> {
    let Some(payload) = frame_payload(frame) else {
        return Ok(None);
    };

    serde_json::from_str::<WireEvent>(payload)
        .map(Some)
        .map_err(|e| SseParseError::InvalidJson {
            source: e.to_string(),
        })
}
