//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway
//! routing core. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};

use crate::routing::builder::{RouteDescriptor, RouteMap};

/// Root configuration for the routing core.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct GatewayConfig {
    /// The gateway's own externally reachable identity.
    pub gateway: IdentityConfig,

    /// Registry discovery settings.
    pub discovery: DiscoveryConfig,

    /// Statically configured routes, merged ahead of discovery.
    pub routes: Vec<StaticRouteConfig>,
}

impl GatewayConfig {
    /// The static route declarations as the builder's base map, in file order.
    pub fn static_route_map(&self) -> RouteMap {
        self.routes
            .iter()
            .map(|route| {
                let descriptor = match &route.url {
                    Some(url) => RouteDescriptor::with_url(&route.service_id, url),
                    None => RouteDescriptor::new(&route.service_id),
                };
                (route.path.clone(), descriptor)
            })
            .collect()
    }
}

/// Identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct IdentityConfig {
    /// Scheme clients use to reach the gateway.
    pub scheme: String,

    /// External hostname; absent until registration supplies one at runtime.
    pub hostname: Option<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            hostname: None,
        }
    }
}

/// Discovery settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Seconds between registry refresh cycles.
    pub refresh_interval_secs: u64,

    /// `*`-wildcard patterns of service ids that are never auto-routed.
    pub ignored_services: Vec<String>,

    /// Optional global path prefix prepended to every route key.
    pub prefix: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 30,
            ignored_services: Vec::new(),
            prefix: String::new(),
        }
    }
}

/// A statically configured route.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StaticRouteConfig {
    /// Route key: a `/`-rooted path pattern ending in `/**`.
    pub path: String,

    /// Backend service the route forwards to.
    pub service_id: String,

    /// Explicit backend URL. Absent marks a placeholder route that
    /// discovery supersedes.
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.gateway.scheme, "https");
        assert!(config.gateway.hostname.is_none());
        assert_eq!(config.discovery.refresh_interval_secs, 30);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_static_route_map_keeps_file_order_and_placeholders() {
        let config = GatewayConfig {
            routes: vec![
                StaticRouteConfig {
                    path: "/catalog/**".to_string(),
                    service_id: "catalog".to_string(),
                    url: Some("https://catalog.internal:8443".to_string()),
                },
                StaticRouteConfig {
                    path: "/legacy/**".to_string(),
                    service_id: "legacy".to_string(),
                    url: None,
                },
            ],
            ..GatewayConfig::default()
        };

        let map = config.static_route_map();

        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, ["/catalog/**", "/legacy/**"]);
        assert!(map.get("/catalog/**").unwrap().url.is_some());
        assert!(map.get("/legacy/**").unwrap().url.is_none());
    }
}
