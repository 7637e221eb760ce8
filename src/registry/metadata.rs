//! Route metadata parsing.
//!
//! # Responsibilities
//! - Turn raw instance metadata into structured route entries
//! - Absorb malformed metadata instead of failing the refresh
//!
//! # Metadata Convention
//! Services declare their routes as flat metadata pairs:
//! ```text
//! routes.api-v1.gateway-url = "api/v1"
//! routes.api-v1.service-url = "/"
//! routes.ws-v1.gateway-url  = "ws/v1"
//! routes.ws-v1.service-url  = "/ws"
//! ```
//! The middle segment is an arbitrary block key grouping the two halves.
//!
//! # Design Decisions
//! - A block missing either half contributes nothing; other blocks still parse
//! - Block keys are processed in sorted order so route derivation is
//!   deterministic regardless of map iteration order
//! - Never an error: unusable metadata yields an empty list

use std::collections::HashMap;

use crate::routing::table::RouteEntry;

const ROUTES_PREFIX: &str = "routes.";
const GATEWAY_URL_SUFFIX: &str = ".gateway-url";
const SERVICE_URL_SUFFIX: &str = ".service-url";

/// Turns one instance's metadata into the route entries it declares.
pub trait RouteMetadataParser: Send + Sync {
    fn parse(&self, service_id: &str, metadata: &HashMap<String, String>) -> Vec<RouteEntry>;
}

/// Parser for the `routes.<key>.gateway-url` / `routes.<key>.service-url`
/// metadata convention.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyedMetadataParser;

impl KeyedMetadataParser {
    pub fn new() -> Self {
        Self
    }
}

impl RouteMetadataParser for KeyedMetadataParser {
    fn parse(&self, service_id: &str, metadata: &HashMap<String, String>) -> Vec<RouteEntry> {
        let mut block_keys: Vec<&str> = metadata
            .keys()
            .filter_map(|key| {
                key.strip_prefix(ROUTES_PREFIX)?
                    .strip_suffix(GATEWAY_URL_SUFFIX)
            })
            .collect();
        block_keys.sort_unstable();
        block_keys.dedup();

        let mut entries = Vec::new();
        for block in block_keys {
            let Some(gateway_url) = metadata
                .get(&format!("{ROUTES_PREFIX}{block}{GATEWAY_URL_SUFFIX}"))
                .map(|url| url.trim_matches('/'))
            else {
                continue;
            };
            if gateway_url.is_empty() {
                tracing::debug!(service = %service_id, block, "route block has empty gateway url, skipping");
                continue;
            }
            let service_url =
                match metadata.get(&format!("{ROUTES_PREFIX}{block}{SERVICE_URL_SUFFIX}")) {
                    Some(url) if !url.is_empty() => url.as_str(),
                    Some(_) | None => {
                        tracing::debug!(service = %service_id, block, "route block has no service url, skipping");
                        continue;
                    }
                };
            entries.push(RouteEntry::new(service_id, gateway_url, service_url));
        }
        entries
    }
}
