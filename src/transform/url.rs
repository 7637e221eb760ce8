//! Inbound URL rewriting.
//!
//! # Responsibilities
//! - Rewrite a service's advertised URL into the gateway-facing URL
//! - Fail with a distinct, caller-visible error per precondition
//!
//! # Design Decisions
//! - Preconditions short-circuit in a fixed order: gateway readiness,
//!   then URI validity, then route selection, then path boundary
//! - `http::Uri` does the parsing: a WHATWG parser would silently repair
//!   scheme-only inputs like `https:host/path`, which must stay invalid
//! - The query string travels with the path remainder verbatim

use axum::http::Uri;
use thiserror::Error;

use crate::routing::channel::ChannelType;
use crate::routing::table::RoutedServiceTable;
use crate::transform::gateway::GatewayClient;
use std::sync::Arc;

/// Why a URL could not be transformed. Messages are surfaced verbatim.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlTransformError {
    #[error("Gateway not found yet, transform service cannot perform the request")]
    GatewayNotReady,

    #[error("The URI {0} is not valid.")]
    InvalidUri(String),

    #[error("Not able to select route for url {url} of the service {service_id}. Original url used.")]
    NoRouteSelected { url: String, service_id: String },

    #[error("The path {path} of the service URL {url} is not valid.")]
    InvalidPath { path: String, url: String },
}

/// Rewrites backend-advertised URLs to gateway URLs using per-service tables.
pub struct UrlTransformer {
    gateway: Arc<GatewayClient>,
}

impl UrlTransformer {
    pub fn new(gateway: Arc<GatewayClient>) -> Self {
        Self { gateway }
    }

    /// Compute `scheme://host/<gateway prefix>/<service id><remainder>` for
    /// the route serving `channel`, where the remainder is whatever of the
    /// inbound path (plus query) extends past the route's backend prefix.
    pub fn transform(
        &self,
        channel: ChannelType,
        service_id: &str,
        url: &str,
        table: &RoutedServiceTable,
    ) -> Result<String, UrlTransformError> {
        let identity = self
            .gateway
            .identity()
            .ok_or(UrlTransformError::GatewayNotReady)?;

        let uri: Uri = url
            .parse()
            .map_err(|_| UrlTransformError::InvalidUri(url.to_string()))?;
        if uri.scheme().is_none() || uri.host().is_none() {
            return Err(UrlTransformError::InvalidUri(url.to_string()));
        }

        let path = uri.path();
        let entry = table.best_matching(path, channel).ok_or_else(|| {
            UrlTransformError::NoRouteSelected {
                url: url.to_string(),
                service_id: service_id.to_string(),
            }
        })?;

        let mut path_and_query = path.to_string();
        if let Some(query) = uri.query() {
            path_and_query.push('?');
            path_and_query.push_str(query);
        }

        let remainder = cut_backend_prefix(&entry.backend_prefix, &path_and_query).ok_or_else(
            || UrlTransformError::InvalidPath {
                path: path.to_string(),
                url: url.to_string(),
            },
        )?;

        Ok(format!(
            "{}://{}/{}/{}{}",
            identity.scheme, identity.hostname, entry.gateway_prefix, service_id, remainder
        ))
    }
}

/// Strip `backend_prefix` off `path_and_query`, accepting the cut only on a
/// segment boundary: the remainder must be empty or continue with `/` or `?`.
/// A backend prefix of `/` leaves the whole path as the remainder.
fn cut_backend_prefix(backend_prefix: &str, path_and_query: &str) -> Option<String> {
    let prefix = backend_prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return Some(path_and_query.to_string());
    }
    let head = path_and_query.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    let remainder = &path_and_query[prefix.len()..];
    if remainder.is_empty() || remainder.starts_with('/') || remainder.starts_with('?') {
        Some(remainder.to_string())
    } else {
        None
    }
}
