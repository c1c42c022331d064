//! Crate-level error type.
//!
//! Stream-level failures never surface here: they end the reply through the
//! render state machine instead. `ClientError` covers the fallible work
//! around a stream: configuration, health checks, reading input.

use thiserror::Error;

use crate::traits::HttpError;

/// Errors from client operations outside the reply stream.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Http(#[from] HttpError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
