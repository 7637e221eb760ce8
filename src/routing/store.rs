//! Published routing state.
//!
//! # Responsibilities
//! - Hold the current merged route map as an atomically swapped snapshot
//! - Hold the per-service route tables delivered during refresh
//!
//! # Design Decisions
//! - Readers load an `Arc` snapshot and keep it for the whole request;
//!   a refresh publishes a new snapshot instead of editing the old one,
//!   so a reader can never observe a partially built map
//! - Tables are replaced wholesale per service, matching how metadata is
//!   re-parsed on every cycle

use std::sync::Arc;

use arc_swap::ArcSwap;
use dashmap::DashMap;

use crate::routing::builder::{RouteConsumer, RouteMap};
use crate::routing::table::RoutedServiceTable;

/// The gateway-wide route map, swapped atomically on every refresh.
#[derive(Default)]
pub struct RouteTableStore {
    current: ArcSwap<RouteMap>,
}

impl RouteTableStore {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(RouteMap::new()),
        }
    }

    /// Replace the published map. Readers holding the previous snapshot keep
    /// seeing it unchanged until they re-load.
    pub fn publish(&self, routes: RouteMap) {
        let count = routes.len();
        self.current.store(Arc::new(routes));
        tracing::info!(routes = count, "route map published");
    }

    pub fn load(&self) -> Arc<RouteMap> {
        self.current.load_full()
    }
}

/// Concurrent `service id → route table` store; the canonical consumer of
/// per-service route propagation.
#[derive(Default)]
pub struct RoutedServicesStore {
    tables: DashMap<String, Arc<RoutedServiceTable>>,
}

impl RoutedServicesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_for(&self, service_id: &str) -> Option<Arc<RoutedServiceTable>> {
        self.tables
            .get(service_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl RouteConsumer for RoutedServicesStore {
    fn on_routes_updated(&self, service_id: &str, table: Arc<RoutedServiceTable>) {
        tracing::debug!(service = %service_id, routes = table.len(), "service route table updated");
        self.tables.insert(service_id.to_string(), table);
    }
}
