//! Traffic channel classification.
//!
//! # Responsibilities
//! - Classify routes into logical traffic classes (API, UI, websocket)
//! - Derive the class from a route's gateway prefix
//!
//! # Design Decisions
//! - Derivation looks only at the leading path segment (`ui*` / `ws*`)
//! - Unrecognized prefixes fall back to API, never an error

use std::fmt;

/// The logical traffic class a route serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelType {
    /// Ordinary API traffic.
    Api,
    /// Browser UI assets.
    Ui,
    /// Websocket upgrades.
    Ws,
}

impl ChannelType {
    /// Derive the channel from a gateway prefix such as `api/v1`, `ui` or `ws/v1`.
    pub fn from_gateway_prefix(prefix: &str) -> Self {
        let head = prefix.trim_start_matches('/');
        if head.starts_with("ui") {
            ChannelType::Ui
        } else if head.starts_with("ws") {
            ChannelType::Ws
        } else {
            ChannelType::Api
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelType::Api => "api",
            ChannelType::Ui => "ui",
            ChannelType::Ws => "ws",
        };
        f.write_str(name)
    }
}
