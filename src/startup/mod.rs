//! Startup: configuration and process-wide logging.
//!
//! - [`config`] - Backend address, session and endpoint paths
//! - [`logging`] - `tracing` subscriber installation

pub mod config;
pub mod logging;

pub use config::ClientConfig;
pub use logging::init_logging;
