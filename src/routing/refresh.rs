//! Periodic route refresh.
//!
//! # Responsibilities
//! - Rebuild the merged route map on a fixed interval
//! - Publish each rebuilt map through the store
//! - Stop cleanly on the shutdown signal
//!
//! # Design Decisions
//! - One task owns the loop, so refresh cycles never overlap
//! - A cycle that produces no routes still publishes (services may have
//!   genuinely gone away)

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::routing::builder::{RouteMap, RouteTableBuilder};
use crate::routing::store::RouteTableStore;

/// Drives `RouteTableBuilder` on a poll interval and publishes the result.
pub struct RouteRefreshTask {
    builder: Arc<RouteTableBuilder>,
    store: Arc<RouteTableStore>,
    static_routes: RouteMap,
    interval: Duration,
}

impl RouteRefreshTask {
    pub fn new(
        builder: Arc<RouteTableBuilder>,
        store: Arc<RouteTableStore>,
        static_routes: RouteMap,
        interval: Duration,
    ) -> Self {
        Self {
            builder,
            store,
            static_routes,
            interval,
        }
    }

    /// Rebuild and publish once. Exposed for callers that need an immediate
    /// refresh outside the periodic schedule (e.g. right after startup).
    pub async fn refresh_once(&self) {
        let routes = self.builder.locate_routes(&self.static_routes).await;
        self.store.publish(routes);
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "route refresh task starting"
        );

        let mut ticker = time::interval(self.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh_once().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("route refresh task received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
