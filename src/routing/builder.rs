//! Route map construction.
//!
//! # Data Flow
//! ```text
//! static route config ──┐
//!                       ▼
//! registry ──▶ instances ──▶ metadata parser ──▶ RouteEntry list
//!                       │                            │
//!                       │                            ├─▶ RoutedServiceTable ──▶ consumers
//!                       ▼                            ▼
//!                 RouteTableBuilder ──▶ merged, prefix-normalized RouteMap
//! ```
//!
//! # Design Decisions
//! - The merged map preserves insertion order (static first, then services
//!   in registry enumeration order) so conflict handling is deterministic
//! - Explicit static configuration always wins over discovery
//! - A bad service produces no routes instead of failing the refresh
//! - Ignore patterns use `*` wildcards only; no regex in the refresh path
//! - The subclass pair of the reference design is flattened into a
//!   `MergeStrategy` so both locators share one builder

use std::collections::HashMap;
use std::sync::Arc;

use crate::registry::metadata::RouteMetadataParser;
use crate::registry::ServiceRegistry;
use crate::routing::table::RoutedServiceTable;

/// A finalized client-facing route: the value side of the merged map.
///
/// `url == None` on a *static* descriptor marks a placeholder: an
/// auto-generated default that must disappear once the service is discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub service_id: String,
    pub url: Option<String>,
}

impl RouteDescriptor {
    /// A route resolved through discovery (or a static placeholder): no
    /// explicit URL, the proxy resolves the service id at dispatch time.
    pub fn new(service_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            url: None,
        }
    }

    pub fn with_url(service_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            url: Some(url.into()),
        }
    }
}

/// Insertion-ordered map from route key (a `/`-rooted path pattern ending in
/// `/**`) to descriptor.
///
/// Vec-backed: gateways carry tens of routes, so linear key scans cost less
/// than an ordered-map dependency would.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteMap {
    entries: Vec<(String, RouteDescriptor)>,
}

impl RouteMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&RouteDescriptor> {
        self.entries
            .iter()
            .find_map(|(k, d)| (k == key).then_some(d))
    }

    /// Insert, keeping the original position when the key already exists.
    pub fn insert(&mut self, key: impl Into<String>, descriptor: RouteDescriptor) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = descriptor,
            None => self.entries.push((key, descriptor)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<RouteDescriptor> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RouteDescriptor)> {
        self.entries.iter().map(|(k, d)| (k, d))
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl FromIterator<(String, RouteDescriptor)> for RouteMap {
    fn from_iter<I: IntoIterator<Item = (String, RouteDescriptor)>>(iter: I) -> Self {
        let mut map = RouteMap::new();
        for (key, descriptor) in iter {
            map.insert(key, descriptor);
        }
        map
    }
}

/// Receives each service's freshly built route table during a refresh.
pub trait RouteConsumer: Send + Sync {
    fn on_routes_updated(&self, service_id: &str, table: Arc<RoutedServiceTable>);
}

/// Maps a service id to the path segment used in its route keys.
pub trait ServiceRouteMapper: Send + Sync {
    fn route_for(&self, service_id: &str) -> String;
}

/// Default mapper: the service id is the path segment.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityRouteMapper;

impl ServiceRouteMapper for IdentityRouteMapper {
    fn route_for(&self, service_id: &str) -> String {
        service_id.to_string()
    }
}

/// How discovered services are folded into the final map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Walk the registry and merge discovered routes over the static map.
    #[default]
    MergeWithStatic,
    /// Take the externally located map as-is and drop every placeholder, so
    /// only explicitly configured or metadata-backed routes stay visible.
    DiscoveryOnly,
}

/// Builds the merged routing map on every refresh cycle.
pub struct RouteTableBuilder {
    registry: Arc<dyn ServiceRegistry>,
    parser: Arc<dyn RouteMetadataParser>,
    mapper: Arc<dyn ServiceRouteMapper>,
    consumers: Vec<Arc<dyn RouteConsumer>>,
    ignored_services: Vec<String>,
    prefix: Option<String>,
    strategy: MergeStrategy,
}

impl RouteTableBuilder {
    pub fn new(registry: Arc<dyn ServiceRegistry>, parser: Arc<dyn RouteMetadataParser>) -> Self {
        Self {
            registry,
            parser,
            mapper: Arc::new(IdentityRouteMapper),
            consumers: Vec::new(),
            ignored_services: Vec::new(),
            prefix: None,
            strategy: MergeStrategy::MergeWithStatic,
        }
    }

    pub fn with_mapper(mut self, mapper: Arc<dyn ServiceRouteMapper>) -> Self {
        self.mapper = mapper;
        self
    }

    pub fn with_consumer(mut self, consumer: Arc<dyn RouteConsumer>) -> Self {
        self.consumers.push(consumer);
        self
    }

    /// Service ids matching any of these `*`-wildcard patterns are never
    /// auto-routed (their tables are still pushed to consumers).
    pub fn with_ignored_services(mut self, patterns: Vec<String>) -> Self {
        self.ignored_services = patterns;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Compute the routing map for this refresh cycle.
    ///
    /// `static_routes` is the externally located base map: explicitly
    /// configured routes plus, depending on the locator feeding it,
    /// auto-generated per-service placeholders.
    pub async fn locate_routes(&self, static_routes: &RouteMap) -> RouteMap {
        match self.strategy {
            MergeStrategy::MergeWithStatic => self.merge_with_discovery(static_routes).await,
            MergeStrategy::DiscoveryOnly => self.drop_placeholders(static_routes),
        }
    }

    async fn merge_with_discovery(&self, static_routes: &RouteMap) -> RouteMap {
        let mut working = static_routes.clone();

        // Placeholder routes (no explicit URL) indexed by backend service id;
        // discovery supersedes them.
        let placeholders: HashMap<String, String> = static_routes
            .iter()
            .filter(|(_, descriptor)| descriptor.url.is_none())
            .map(|(key, descriptor)| (descriptor.service_id.clone(), key.clone()))
            .collect();

        for service_id in self.registry.service_ids().await {
            let instances = self.registry.instances(&service_id).await;
            if instances.is_empty() {
                tracing::debug!(service = %service_id, "no live instances, skipping service this cycle");
                continue;
            }

            let mut table = RoutedServiceTable::new();
            let mut route_keys = Vec::new();
            for instance in &instances {
                for entry in self.parser.parse(&service_id, &instance.metadata) {
                    route_keys.push(format!(
                        "/{}/{}/**",
                        entry.gateway_prefix,
                        self.mapper.route_for(&service_id)
                    ));
                    table.insert(entry);
                }
            }
            if route_keys.is_empty() {
                route_keys.push(format!("/{}/**", self.mapper.route_for(&service_id)));
            }

            // Consumers need route knowledge regardless of exposure policy,
            // so propagation happens before the ignore filter.
            let table = Arc::new(table);
            for consumer in &self.consumers {
                consumer.on_routes_updated(&service_id, Arc::clone(&table));
            }

            let removed_key = placeholders.get(&service_id).map(|key| {
                if working.remove(key).is_some() {
                    tracing::debug!(service = %service_id, route = %key, "placeholder route superseded by discovery");
                }
                key.as_str()
            });

            let ignored = self.is_ignored(&service_id);
            for route_key in route_keys {
                if ignored {
                    tracing::trace!(service = %service_id, route = %route_key, "service matches ignore pattern");
                } else if working.contains_key(&route_key) {
                    tracing::trace!(service = %service_id, route = %route_key, "route already configured, discovery skipped");
                } else if removed_key == Some(route_key.as_str()) {
                    // just suppressed for this very service, do not resurrect it
                } else {
                    working.insert(route_key, RouteDescriptor::new(service_id.clone()));
                }
            }
        }

        self.apply_prefix(working)
    }

    fn drop_placeholders(&self, located: &RouteMap) -> RouteMap {
        located
            .iter()
            .filter(|(_, descriptor)| descriptor.url.is_some())
            .map(|(key, descriptor)| (key.clone(), descriptor.clone()))
            .collect()
    }

    fn is_ignored(&self, service_id: &str) -> bool {
        self.ignored_services
            .iter()
            .any(|pattern| wildcard_match(pattern, service_id))
    }

    /// Root every key at `/` and prepend the configured global prefix.
    fn apply_prefix(&self, routes: RouteMap) -> RouteMap {
        let prefix = self.prefix.as_deref().filter(|p| !p.is_empty());
        routes
            .iter()
            .map(|(key, descriptor)| {
                let mut path = if key.starts_with('/') {
                    key.clone()
                } else {
                    format!("/{key}")
                };
                if let Some(prefix) = prefix {
                    path = format!("{prefix}{path}");
                    if !path.starts_with('/') {
                        path = format!("/{path}");
                    }
                }
                (path, descriptor.clone())
            })
            .collect()
    }
}

/// Match `value` against a glob pattern where `*` spans any run of
/// characters. Supports any number of stars; everything else is literal.
fn wildcard_match(pattern: &str, value: &str) -> bool {
    match pattern.split_once('*') {
        None => pattern == value,
        Some((head, tail)) => {
            let Some(rest) = value.strip_prefix(head) else {
                return false;
            };
            if tail.is_empty() {
                return true;
            }
            (0..=rest.len())
                .filter(|i| rest.is_char_boundary(*i))
                .any(|i| wildcard_match(tail, &rest[i..]))
        }
    }
}
