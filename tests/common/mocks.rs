//! Mock transport fixtures.
//!
//! Re-exports the scripted transport from `ragchat::adapters::mock` and adds
//! helpers for building clients around it.

pub use ragchat::adapters::mock::{MockHttpClient, MockResponse, RecordedRequest};
pub use ragchat::traits::{Headers, HttpClient, HttpError};

use bytes::Bytes;
use ragchat::client::ChatClient;
use ragchat::config::ClientConfig;

pub const TEST_USER: &str = "user-integration";
pub const TEST_BASE_URL: &str = "http://chat.test/v1";

/// Client over a mock transport that answers every request with `body`.
pub fn mock_client_with_body(body: &str) -> ChatClient<MockHttpClient> {
    let mock = MockHttpClient::new();
    mock.set_default_response(MockResponse::text_chunks(&[body]));
    ChatClient::new(ClientConfig::new().with_base_url(TEST_BASE_URL), mock, TEST_USER)
}

/// Client whose single response arrives as the given raw chunks.
pub fn mock_client_with_chunks(chunks: Vec<Bytes>) -> ChatClient<MockHttpClient> {
    let mock = MockHttpClient::new();
    mock.push_response(MockResponse::Chunks(chunks));
    ChatClient::new(ClientConfig::new().with_base_url(TEST_BASE_URL), mock, TEST_USER)
}

/// Split `body` into chunks of `size` bytes, ignoring UTF-8 boundaries.
pub fn byte_chunks(body: &str, size: usize) -> Vec<Bytes> {
    body.as_bytes()
        .chunks(size)
        .map(Bytes::copy_from_slice)
        .collect()
}
