//! Mock implementations for testing.
//!
//! This module provides mock implementations of all trait abstractions,
//! enabling unit testing without network access or a terminal.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses and streams
//! - [`RecordingView`] - Reply view that records every call

pub mod http;
pub mod view;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use view::{RecordingView, ViewCall};
