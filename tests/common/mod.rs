#![allow(dead_code)]

//! Common test utilities for integration tests.
//!
//! Builders for SSE bodies, chunkings of those bodies, and clients wired to
//! the mock transport.
//!
//! # Example
//!
//! ```ignore
//! use common::{frame, mock_client};
//!
//! let (client, http) = mock_client(vec![frame(r#"{"type":"complete"}"#).into()]);
//! ```

pub mod fixtures;

pub use fixtures::*;

use std::sync::Arc;

use bytes::Bytes;
use murmur::adapters::mock::{MockHttpClient, MockResponse};
use murmur::client::ChatClient;
use murmur::startup::ClientConfig;

/// Base URL the mock transport answers on.
pub const TEST_BASE_URL: &str = "http://mock.local";

/// Chat endpoint URL under [`TEST_BASE_URL`].
pub fn test_chat_url() -> String {
    format!("{}/api/chat", TEST_BASE_URL)
}

/// A client whose chat endpoint yields `chunks` and then ends.
pub fn mock_client(chunks: Vec<Bytes>) -> (ChatClient<MockHttpClient>, MockHttpClient) {
    mock_client_with(MockResponse::Stream(chunks))
}

/// A client whose chat endpoint answers with `response`.
pub fn mock_client_with(response: MockResponse) -> (ChatClient<MockHttpClient>, MockHttpClient) {
    let http = MockHttpClient::new();
    http.set_response(&test_chat_url(), response);
    let config = ClientConfig::new().with_base_url(TEST_BASE_URL);
    (ChatClient::with_http(config, Arc::new(http.clone())), http)
}
