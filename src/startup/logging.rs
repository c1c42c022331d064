//! Process-wide `tracing` setup.
//!
//! Logs go to stderr so stdout carries nothing but the reply.

use once_cell::sync::OnceCell;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::EnvFilter;

/// Filter variable checked before `RUST_LOG`.
pub const ENV_LOG_FILTER: &str = "MURMUR_LOG";

const DEFAULT_FILTER: &str = "warn";

static INIT: OnceCell<()> = OnceCell::new();

fn resolve_env_filter() -> EnvFilter {
    if let Ok(directives) = std::env::var(ENV_LOG_FILTER) {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return filter;
        }
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber once per process.
///
/// Filter precedence: `MURMUR_LOG`, then `RUST_LOG`, then `warn`.
/// Later calls are no-ops, as is a call when another subscriber is already set.
pub fn init_logging() {
    INIT.get_or_init(|| {
        let layer = tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr);
        let _ = tracing_subscriber::registry()
            .with(resolve_env_filter())
            .with(layer)
            .try_init();
    });
}
