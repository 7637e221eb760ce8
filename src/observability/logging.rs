//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for embedding binaries and tests
//! - Respect `RUST_LOG` when set, fall back to a sensible default

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber with the crate's default filter.
pub fn init() {
    init_with_filter("gateway_core=info");
}

/// Install the global subscriber, preferring `RUST_LOG` over `default_filter`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_with_filter(default_filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
