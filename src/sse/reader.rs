//! Frame reassembly for the response byte stream.
//!
//! Bytes arrive in arbitrary chunks: a multi-byte character or a whole frame
//! may be split across reads. [`Utf8Decoder`] carries incomplete code points
//! over to the next chunk and [`FrameReader`] carries the unterminated tail
//! of the text, so a frame is only emitted once its blank-line terminator
//! has been seen.

use futures::stream::{self, Stream};
use futures::StreamExt;
use std::collections::VecDeque;

use crate::traits::{ByteStream, HttpError};

/// Frames end with a blank line.
pub const FRAME_DELIMITER: &str = "\n\n";

/// Stateful UTF-8 decoder.
///
/// Invalid sequences become U+FFFD; a truncated sequence at the end of a
/// chunk is held back until the next chunk completes it.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one chunk, prefixed by any bytes held back from the last one.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest: &[u8] = &bytes;
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&rest[..valid]));
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &rest[valid + len..];
                        }
                        None => {
                            self.pending = rest[valid..].to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Flush at end of input. A dangling partial sequence becomes U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            char::REPLACEMENT_CHARACTER.to_string()
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Splits decoded text into frames, buffering the unterminated tail.
#[derive(Debug, Default)]
pub struct FrameReader {
    decoder: Utf8Decoder,
    buffer: String,
}

impl FrameReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of raw bytes; returns every frame it completed, in order.
    ///
    /// CR characters are dropped so `\r\n\r\n` terminates a frame as well.
    /// Empty frames (runs of blank lines) are skipped.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let text = self.decoder.decode(chunk);
        // Already-scanned text holds no delimiter; only its last byte can
        // start one that completes in the new text.
        let mut search_from = self
            .buffer
            .len()
            .saturating_sub(FRAME_DELIMITER.len() - 1);
        self.buffer.extend(text.chars().filter(|c| *c != '\r'));

        let mut frames = Vec::new();
        while let Some(pos) = find_delimiter(&self.buffer, search_from) {
            let frame: String = self.buffer.drain(..pos + FRAME_DELIMITER.len()).collect();
            let frame = &frame[..pos];
            if !frame.is_empty() {
                frames.push(frame.to_string());
            }
            search_from = 0;
        }
        frames
    }

    /// End of input: the unterminated tail is not a frame and is discarded.
    ///
    /// Returns the number of bytes thrown away.
    pub fn finish(&mut self) -> usize {
        let tail = self.decoder.finish();
        self.buffer.push_str(&tail);
        let discarded = self.buffer.trim_end_matches('\n').len();
        self.buffer.clear();
        discarded
    }

    /// Bytes of text currently waiting for a terminator.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }
}

/// Byte offset of the first delimiter at or after `from`.
///
/// Works on bytes so `from` need not sit on a char boundary.
fn find_delimiter(buffer: &str, from: usize) -> Option<usize> {
    buffer.as_bytes()[from..]
        .windows(FRAME_DELIMITER.len())
        .position(|w| w == FRAME_DELIMITER.as_bytes())
        .map(|offset| from + offset)
}

/// Turn a response byte stream into a lazy stream of frames.
///
/// The source is polled one chunk at a time and only when no complete frame
/// is waiting. A transport error is yielded once and ends the stream.
pub fn frame_stream(source: ByteStream) -> impl Stream<Item = Result<String, HttpError>> + Send {
    stream::unfold(
        (source, FrameReader::new(), VecDeque::new(), false),
        |(mut source, mut reader, mut ready, mut failed)| async move {
            loop {
                if let Some(frame) = ready.pop_front() {
                    return Some((Ok(frame), (source, reader, ready, failed)));
                }
                if failed {
                    return None;
                }

                match source.next().await {
                    Some(Ok(chunk)) => {
                        ready.extend(reader.feed(&chunk));
                    }
                    Some(Err(e)) => {
                        failed = true;
                        return Some((Err(e), (source, reader, ready, failed)));
                    }
                    None => {
                        let discarded = reader.finish();
                        if discarded > 0 {
                            tracing::debug!(discarded, "discarding unterminated trailing frame");
                        }
                        return None;
                    }
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_single_complete_frame() {
        let mut reader = FrameReader::new();
        let frames = reader.feed(b"data: {\"event\":\"message\"}\n\n");
        assert_eq!(frames, vec!["data: {\"event\":\"message\"}".to_string()]);
        assert_eq!(reader.buffered_len(), 0);
    }

    #[test]
    fn test_frame_split_across_reads() {
        let mut reader = FrameReader::new();
        assert!(reader.feed(b"data: {\"event\":\"mess").is_empty());
        let frames = reader.feed(b"age\",\"answer\":\"Hi\"}\n\n");
        assert_eq!(
            frames,
            vec!["data: {\"event\":\"message\",\"answer\":\"Hi\"}".to_string()]
        );
    }

    #[test]
    fn test_delimiter_split_across_reads() {
        let mut reader = FrameReader::new();
        assert!(reader.feed(b"data: 1\n").is_empty());
        assert_eq!(reader.feed(b"\ndata: 2\n\n"), vec!["data: 1", "data: 2"]);
    }

    #[test]
    fn test_large_frame_fed_one_byte_at_a_time() {
        let answer = "ü日".repeat(2_000);
        let body = format!("data: {}\n\ndata: next\n\n", answer);

        let mut reader = FrameReader::new();
        let mut frames = Vec::new();
        for byte in body.as_bytes() {
            frames.extend(reader.feed(std::slice::from_ref(byte)));
        }

        assert_eq!(frames, vec![format!("data: {}", answer), "data: next".to_string()]);
        assert_eq!(reader.buffered_len(), 0);
    }

    #[test]
    fn test_delimiter_after_multibyte_tail() {
        let mut reader = FrameReader::new();
        assert!(reader.feed("data: 日\n".as_bytes()).is_empty());
        assert_eq!(reader.feed(b"\n"), vec!["data: 日"]);
    }

    #[test]
    fn test_multiple_frames_in_one_read() {
        let mut reader = FrameReader::new();
        let frames = reader.feed(b"data: a\n\ndata: b\n\ndata: c");
        assert_eq!(frames, vec!["data: a", "data: b"]);
        assert_eq!(reader.feed(b"\n\n"), vec!["data: c"]);
    }

    #[test]
    fn test_crlf_delimiters() {
        let mut reader = FrameReader::new();
        assert_eq!(reader.feed(b"data: a\r\n\r\ndata: b\r\n\r\n"), vec!["data: a", "data: b"]);
    }

    #[test]
    fn test_blank_line_runs_produce_no_empty_frames() {
        let mut reader = FrameReader::new();
        assert_eq!(reader.feed(b"data: a\n\n\n\ndata: b\n\n"), vec!["data: a", "data: b"]);
    }

    #[test]
    fn test_multibyte_character_split_across_reads() {
        // "é" is 0xC3 0xA9, "日" is 0xE6 0x97 0xA5
        let mut reader = FrameReader::new();
        assert!(reader.feed(b"data: caf\xC3").is_empty());
        assert!(reader.feed(b"\xA9 \xE6\x97").is_empty());
        let frames = reader.feed(b"\xA5\n\n");
        assert_eq!(frames, vec!["data: café 日".to_string()]);
    }

    #[test]
    fn test_decoder_replaces_invalid_bytes() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.decode(b"a\xFFb"), "a\u{FFFD}b");
        assert!(!decoder.has_pending());
    }

    #[test]
    fn test_decoder_flushes_dangling_sequence() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.decode(b"ok\xE6\x97"), "ok");
        assert!(decoder.has_pending());
        assert_eq!(decoder.finish(), "\u{FFFD}");
        assert!(!decoder.has_pending());
    }

    #[test]
    fn test_finish_discards_unterminated_tail() {
        let mut reader = FrameReader::new();
        assert!(reader.feed(b"data: {\"event\":\"message\"}").is_empty());
        assert_eq!(reader.finish(), "data: {\"event\":\"message\"}".len());
        assert_eq!(reader.buffered_len(), 0);
    }

    #[tokio::test]
    async fn test_frame_stream_reassembles_and_drops_tail() {
        let chunks: Vec<Result<Bytes, HttpError>> = vec![
            Ok(Bytes::from_static(b"data: one\n")),
            Ok(Bytes::from_static(b"\ndata: tw")),
            Ok(Bytes::from_static(b"o\n\ndata: partial")),
        ];
        let source: ByteStream = Box::pin(stream::iter(chunks));

        let frames: Vec<_> = frame_stream(source).collect().await;
        let frames: Vec<String> = frames.into_iter().map(|f| f.unwrap()).collect();
        assert_eq!(frames, vec!["data: one", "data: two"]);
    }

    #[tokio::test]
    async fn test_frame_stream_stops_after_transport_error() {
        let chunks: Vec<Result<Bytes, HttpError>> = vec![
            Ok(Bytes::from_static(b"data: one\n\n")),
            Err(HttpError::Io("connection reset".to_string())),
            Ok(Bytes::from_static(b"data: never\n\n")),
        ];
        let source: ByteStream = Box::pin(stream::iter(chunks));

        let items: Vec<_> = frame_stream(source).collect().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], Ok("data: one".to_string()));
        assert_eq!(items[1], Err(HttpError::Io("connection reset".to_string())));
    }
}
