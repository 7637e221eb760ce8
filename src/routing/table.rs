//! Per-service route tables.
//!
//! # Responsibilities
//! - Hold the channel-typed route prefixes one backend service exposes
//! - Select the entry eligible for a given request path and channel
//!
//! # Design Decisions
//! - One addressable entry per channel; re-inserting overwrites
//!   (metadata is re-parsed wholesale on every refresh)
//! - Prefix matching is case-insensitive and tolerates a trailing slash
//! - A backend prefix of `/` matches every path
//! - No regex; raw prefix comparison only

use std::collections::HashMap;

use crate::routing::channel::ChannelType;

/// A single route a backend service exposes through the gateway.
///
/// `gateway_prefix` is the path segment clients see (e.g. `api/v1`);
/// `backend_prefix` is the path prefix on the real backend it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub service_id: String,
    pub gateway_prefix: String,
    pub backend_prefix: String,
    pub channel: ChannelType,
}

impl RouteEntry {
    /// Create an entry, deriving the channel from the gateway prefix.
    pub fn new(
        service_id: impl Into<String>,
        gateway_prefix: impl Into<String>,
        backend_prefix: impl Into<String>,
    ) -> Self {
        let gateway_prefix = gateway_prefix.into();
        let channel = ChannelType::from_gateway_prefix(&gateway_prefix);
        Self {
            service_id: service_id.into(),
            gateway_prefix,
            backend_prefix: backend_prefix.into(),
            channel,
        }
    }

    /// Create an entry with an explicitly supplied channel.
    pub fn with_channel(
        service_id: impl Into<String>,
        gateway_prefix: impl Into<String>,
        backend_prefix: impl Into<String>,
        channel: ChannelType,
    ) -> Self {
        Self {
            service_id: service_id.into(),
            gateway_prefix: gateway_prefix.into(),
            backend_prefix: backend_prefix.into(),
            channel,
        }
    }
}

/// The set of routes one backend service exposes, keyed by channel.
///
/// Rebuilt from scratch on every registry refresh and shared immutably;
/// a later refresh publishes a wholly new table instead of mutating this one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutedServiceTable {
    entries: HashMap<ChannelType, RouteEntry>,
}

impl RoutedServiceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry; a previous entry for the same channel is replaced.
    pub fn insert(&mut self, entry: RouteEntry) {
        self.entries.insert(entry.channel, entry);
    }

    pub fn get(&self, channel: ChannelType) -> Option<&RouteEntry> {
        self.entries.get(&channel)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.values()
    }

    /// Return the channel's entry if its backend prefix matches `path` as a
    /// raw string prefix. The boundary check (segment vs. raw match) is the
    /// caller's concern; this only decides whether a route exists at all.
    pub fn best_matching(&self, path: &str, channel: ChannelType) -> Option<&RouteEntry> {
        let entry = self.entries.get(&channel)?;
        let prefix = entry.backend_prefix.trim_end_matches('/');
        match path.get(..prefix.len()) {
            Some(head) if head.eq_ignore_ascii_case(prefix) => Some(entry),
            _ => None,
        }
    }
}
