//! Service registry collaborator surface.
//!
//! # Data Flow
//! ```text
//! registry client (external)
//!     → ServiceRegistry::service_ids / instances
//!     → metadata.rs (parse instance metadata into route entries)
//!     → routing::builder (merge into the route map)
//! ```
//!
//! # Design Decisions
//! - The registry wire protocol is out of scope; this crate only consumes
//!   the enumeration trait
//! - Registry calls are async (real clients poll over the network)
//! - An empty instance list means "temporarily absent", never an error

pub mod metadata;

use std::collections::HashMap;

use async_trait::async_trait;

/// A single live instance of a backend service as reported by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInstance {
    pub instance_id: String,
    pub service_id: String,
    pub host: String,
    pub port: u16,
    pub secure: bool,
    /// Free-form string-keyed metadata attached by the service at registration.
    pub metadata: HashMap<String, String>,
}

impl ServiceInstance {
    pub fn new(service_id: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        let service_id = service_id.into();
        let host = host.into();
        Self {
            instance_id: format!("{}:{}:{}", service_id, host, port),
            service_id,
            host,
            port,
            secure: false,
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Read-only view of the dynamic service registry, polled periodically.
#[async_trait]
pub trait ServiceRegistry: Send + Sync {
    /// Every service id currently known to the registry.
    async fn service_ids(&self) -> Vec<String>;

    /// Live instances of one service; empty when none are up right now.
    async fn instances(&self, service_id: &str) -> Vec<ServiceInstance>;
}
