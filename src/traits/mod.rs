//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP transport (health GET, streaming POST)
//! - [`ReplyView`] - Presentation of the in-progress reply

pub mod http;
pub mod view;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Response};
pub use view::{ReplyView, EMPTY_REPLY_PLACEHOLDER};
