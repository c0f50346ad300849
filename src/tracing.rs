//! Tracing (logging)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log filter used when `RUST_LOG` is unset: debug for this crate and request spans.
pub const DEFAULT_LOG_FILTER: &str = "review_analyser=debug,tower_http=debug";

/// Build the log filter from `RUST_LOG`, falling back to [DEFAULT_LOG_FILTER].
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Initialise tracing, writing formatted events to stdout.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
