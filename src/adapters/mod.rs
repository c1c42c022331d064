//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`TerminalView`] - Reply view writing to a terminal via crossterm
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses and chunk streams
//! - [`mock::RecordingView`] - Records every view call

pub mod mock;
pub mod reqwest_http;
pub mod terminal_view;

pub use mock::{MockHttpClient, RecordingView};
pub use reqwest_http::ReqwestHttpClient;
pub use terminal_view::TerminalView;
