//! End-to-end stream handling over the scripted transport.
//!
//! The mock transport lets these tests choose exactly where chunk
//! boundaries fall, which real HTTP servers do not.

mod common;

use bytes::Bytes;
use common::*;
use ragchat::accumulator::MessageAccumulator;
use ragchat::client::TurnOutcome;
use ragchat::error::{ChatError, StreamError};
use ragchat::sse::StreamEvent;

async fn collect(
    client: &mut ragchat::client::ChatClient<MockHttpClient>,
) -> (Vec<StreamEvent>, Vec<ChatError>, TurnOutcome) {
    let mut events = Vec::new();
    let mut errors = Vec::new();
    let outcome = client
        .subscribe("q", |e| events.push(e), |e| errors.push(e))
        .await;
    (events, errors, outcome)
}

#[tokio::test]
async fn test_any_chunking_gives_same_events() {
    let body = sse_body(&[
        message_frame("m1", "Grüße "),
        message_frame("m1", "aus 東京 🚀"),
        end_frame("m1", &[("title: Köln;content: Dom", 0.4)]),
        finished_frame("m1", "conv-utf8"),
    ]);

    let mut reference = mock_client_with_body(&body);
    let (expected, _, _) = collect(&mut reference).await;
    assert_eq!(expected.len(), 4);

    for size in [1, 2, 3, 5, 7, 64] {
        let mut client = mock_client_with_chunks(byte_chunks(&body, size));
        let (events, errors, outcome) = collect(&mut client).await;

        assert_eq!(outcome, TurnOutcome::Finished, "chunk size {}", size);
        assert!(errors.is_empty(), "chunk size {}", size);
        // createdAt is stamped at extraction time, so compare the rest
        assert_eq!(events.len(), expected.len(), "chunk size {}", size);
        assert_eq!(events[0], expected[0], "chunk size {}", size);
        assert_eq!(events[1], expected[1], "chunk size {}", size);
        assert_eq!(events[3], expected[3], "chunk size {}", size);
        assert_eq!(client.conversation_id(), Some("conv-utf8"));
    }
}

#[tokio::test]
async fn test_accumulated_text_is_concatenation_of_chunks() {
    let pieces = ["The ", "quick ", "brown ", "fox"];
    let frames: Vec<String> = pieces.iter().map(|p| message_frame("m1", p)).collect();
    let mut client = mock_client_with_body(&sse_body(&frames));

    let mut accumulator = MessageAccumulator::new();
    let mut running = Vec::new();
    client
        .subscribe(
            "q",
            |e| {
                if let Some(text) = accumulator.apply(&e) {
                    running.push(text.to_string());
                }
            },
            |_| {},
        )
        .await;

    assert_eq!(
        running,
        vec!["The ", "The quick ", "The quick brown ", "The quick brown fox"]
    );
    assert_eq!(accumulator.current().unwrap().content, pieces.concat());
}

#[tokio::test]
async fn test_crlf_delimited_frames() {
    let body = sse_body(&[message_frame("m1", "a"), message_frame("m1", "b")])
        .replace("\n\n", "\r\n\r\n");
    let mut client = mock_client_with_body(&body);

    let (events, errors, _) = collect(&mut client).await;
    assert!(errors.is_empty());
    assert_eq!(events.len(), 2);
}

#[tokio::test]
async fn test_keepalive_and_garbage_frames_skipped() {
    let body = format!(
        "{}: ping\n\n{}data: {{not json}}\n\n{}data: {{\"event\":\"agent_thought\"}}\n\n",
        message_frame("m1", "one"),
        "event: ping\n\n",
        message_frame("m1", "two"),
    );
    let mut client = mock_client_with_body(&body);

    let (events, errors, outcome) = collect(&mut client).await;
    assert_eq!(outcome, TurnOutcome::Finished);
    assert!(errors.is_empty());
    let contents: Vec<String> = events
        .into_iter()
        .filter_map(|e| match e {
            StreamEvent::Chunk { content, .. } => Some(content),
            _ => None,
        })
        .collect();
    assert_eq!(contents, vec!["one", "two"]);
}

#[tokio::test]
async fn test_unterminated_trailing_frame_discarded() {
    let mut body = message_frame("m1", "kept");
    body.push_str("data: {\"event\":\"message\",\"answer\":\"lost\",\"message_id\":\"m1\"}");
    let mut client = mock_client_with_body(&body);

    let (events, errors, outcome) = collect(&mut client).await;
    assert_eq!(outcome, TurnOutcome::Finished);
    assert!(errors.is_empty());
    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn test_transport_failure_fires_error_once() {
    let mock = MockHttpClient::new();
    mock.push_response(MockResponse::ChunksThenError(
        vec![Bytes::from(message_frame("m1", "partial"))],
        HttpError::Io("connection reset by peer".to_string()),
    ));
    let mut client = ragchat::client::ChatClient::new(
        ragchat::config::ClientConfig::new(),
        mock,
        TEST_USER,
    );

    let (events, errors, outcome) = collect(&mut client).await;
    assert_eq!(outcome, TurnOutcome::TransportFailed);
    assert_eq!(events.len(), 1);
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        ChatError::Stream(StreamError::ConnectionLost { .. })
    ));
    assert!(errors[0].is_retryable());
}

#[tokio::test]
async fn test_error_without_message_reports_unknown() {
    let body = "data: {\"event\":\"error\",\"code\":500}\n\n".to_string();
    let mut client = mock_client_with_body(&body);

    let (_, errors, outcome) = collect(&mut client).await;
    assert_eq!(outcome, TurnOutcome::BackendError);
    assert_eq!(errors[0].to_string(), "Unknown error [500]");
}

#[tokio::test]
async fn test_end_for_other_message_keeps_resources_off() {
    let body = sse_body(&[
        message_frame("m1", "answer"),
        end_frame("m2", &[("title: Orphan;content: record", 1.0)]),
    ]);
    let mut client = mock_client_with_body(&body);

    let mut accumulator = MessageAccumulator::new();
    client
        .subscribe(
            "q",
            |e| {
                accumulator.apply(&e);
            },
            |_| {},
        )
        .await;

    let message = accumulator.current().unwrap();
    assert_eq!(message.message_id, "m1");
    assert!(message.resources.is_none());
}

#[tokio::test]
async fn test_error_with_structured_message_ends_turn() {
    let body = sse_body(&[
        frame(&serde_json::json!({"event": "error", "message": {"detail": "rate limited"}})),
        message_frame("m1", "late"),
    ]);
    let mut client = mock_client_with_body(&body);

    let (events, errors, outcome) = collect(&mut client).await;
    assert_eq!(outcome, TurnOutcome::BackendError);
    assert!(events.is_empty());
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("rate limited"));
}
