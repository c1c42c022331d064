//! murmur - a terminal client for a streaming chat agent
//!
//! Sends one message at a time to the backend's chat endpoint and renders the
//! Server-Sent-Events reply as it arrives. This library exposes modules for
//! use in integration tests and benchmarks.

pub mod adapters;
pub mod cli;
pub mod client;
pub mod driver;
pub mod error;
pub mod input;
pub mod models;
pub mod reply;
pub mod sse;
pub mod startup;
pub mod traits;
