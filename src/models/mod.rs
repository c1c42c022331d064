//! Wire models for the chat backend.

mod request;

pub use request::{ChatRequest, HealthStatus};
