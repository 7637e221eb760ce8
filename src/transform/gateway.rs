//! Gateway identity.
//!
//! # Responsibilities
//! - Hold the gateway's own externally reachable scheme and hostname
//! - Stay explicitly unconfigured until the gateway finishes registering
//!
//! # Design Decisions
//! - `ArcSwapOption` so identity arrives (and can change) without locking
//!   readers on the request path

use std::sync::Arc;

use arc_swap::ArcSwapOption;

/// The scheme and host under which clients reach the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayIdentity {
    pub scheme: String,
    pub hostname: String,
}

impl GatewayIdentity {
    pub fn new(scheme: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            hostname: hostname.into(),
        }
    }
}

/// Shared handle to the gateway identity; absent until registration completes.
#[derive(Default)]
pub struct GatewayClient {
    identity: ArcSwapOption<GatewayIdentity>,
}

impl GatewayClient {
    /// An unconfigured client; transformations fail until `set` is called.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configured(identity: GatewayIdentity) -> Self {
        let client = Self::new();
        client.set(identity);
        client
    }

    pub fn set(&self, identity: GatewayIdentity) {
        tracing::info!(scheme = %identity.scheme, hostname = %identity.hostname, "gateway identity configured");
        self.identity.store(Some(Arc::new(identity)));
    }

    pub fn identity(&self) -> Option<Arc<GatewayIdentity>> {
        self.identity.load_full()
    }

    pub fn is_configured(&self) -> bool {
        self.identity.load().is_some()
    }
}
