//! Scripted transport for tests.
//!
//! `MockHttpClient` replays canned chunk sequences so tests can control
//! exactly where chunk boundaries fall and when the transport fails.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Successful response whose body arrives as these chunks.
    Chunks(Vec<Bytes>),
    /// Body chunks followed by a read failure.
    ChunksThenError(Vec<Bytes>, HttpError),
    /// The request itself fails (connect error, non-2xx status).
    Error(HttpError),
}

impl MockResponse {
    /// Successful response built from text chunks.
    pub fn text_chunks<S: AsRef<str>>(chunks: &[S]) -> Self {
        MockResponse::Chunks(
            chunks
                .iter()
                .map(|c| Bytes::copy_from_slice(c.as_ref().as_bytes()))
                .collect(),
        )
    }
}

/// A request seen by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub body: String,
    pub headers: Headers,
}

impl RecordedRequest {
    /// Parse the recorded body as JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// [`HttpClient`] that replays queued responses in order.
///
/// When the queue is empty the default response is used; without a default,
/// the request fails with `HttpError::Other`.
#[derive(Debug, Default)]
pub struct MockHttpClient {
    queue: Mutex<VecDeque<MockResponse>>,
    default_response: Mutex<Option<MockResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next unanswered request.
    pub fn push_response(&self, response: MockResponse) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back(response);
        }
    }

    /// Response used once the queue is drained.
    pub fn set_default_response(&self, response: MockResponse) {
        if let Ok(mut default) = self.default_response.lock() {
            *default = Some(response);
        }
    }

    /// All requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }

    fn next_response(&self) -> Option<MockResponse> {
        let queued = self.queue.lock().ok().and_then(|mut q| q.pop_front());
        queued.or_else(|| self.default_response.lock().ok().and_then(|d| d.clone()))
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                url: url.to_string(),
                body: body.to_string(),
                headers: headers.clone(),
            });
        }

        match self.next_response() {
            Some(MockResponse::Chunks(chunks)) => {
                Ok(Box::pin(stream::iter(
                    chunks.into_iter().map(Ok::<Bytes, HttpError>),
                )))
            }
            Some(MockResponse::ChunksThenError(chunks, err)) => {
                let items = chunks
                    .into_iter()
                    .map(Ok)
                    .chain(std::iter::once(Err(err)));
                Ok(Box::pin(stream::iter(items)))
            }
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("no mock response for {}", url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_mock_replays_chunks_in_order() {
        let mock = MockHttpClient::new();
        mock.push_response(MockResponse::text_chunks(&["a", "b"]));

        let mut stream = mock.post_stream("http://x", "{}", &Headers::new()).await.unwrap();
        assert_eq!(stream.next().await.unwrap().unwrap(), Bytes::from("a"));
        assert_eq!(stream.next().await.unwrap().unwrap(), Bytes::from("b"));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Chunks(Vec::new()));

        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        let _ = mock.post_stream("http://x/chat", r#"{"q":1}"#, &headers).await;

        let request = mock.last_request().unwrap();
        assert_eq!(request.url, "http://x/chat");
        assert_eq!(request.json().unwrap()["q"], 1);
        assert_eq!(request.headers.get("Accept").unwrap(), "text/event-stream");
    }

    #[tokio::test]
    async fn test_mock_without_response_fails() {
        let mock = MockHttpClient::new();
        let result = mock.post_stream("http://x", "{}", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }
}
