//! Authentication commands.
//!
//! # Responsibilities
//! - Define the polymorphic command applied to outbound proxied requests
//! - Ship the generic variants (no-op, bearer forwarding)
//!
//! # Design Decisions
//! - "Do nothing" is a real command (`NoOpCommand`), so callers never hold
//!   a null-ish sentinel
//! - Backend-specific variants (certificates, passtickets, …) live with
//!   the resolver that knows how to build them

use std::fmt;

use axum::body::Body;
use axum::http::{header, HeaderValue, Request};

/// A resolved per-backend authentication step for one outbound request.
pub trait AuthenticationCommand: Send + Sync + fmt::Debug {
    /// Whether the request must carry a token that passed validation.
    fn requires_valid_token(&self) -> bool {
        false
    }

    /// Stamp credentials onto the outbound request.
    fn apply_to(&self, request: &mut Request<Body>);
}

/// Command that leaves the request untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpCommand;

impl AuthenticationCommand for NoOpCommand {
    fn apply_to(&self, _request: &mut Request<Body>) {}
}

/// Forwards the validated bearer token as the outbound `Authorization` header.
#[derive(Debug)]
pub struct BearerForwardCommand {
    token: String,
}

impl BearerForwardCommand {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl AuthenticationCommand for BearerForwardCommand {
    fn requires_valid_token(&self) -> bool {
        true
    }

    fn apply_to(&self, request: &mut Request<Body>) {
        match HeaderValue::from_str(&format!("Bearer {}", self.token)) {
            Ok(value) => {
                request.headers_mut().insert(header::AUTHORIZATION, value);
            }
            Err(_) => {
                tracing::warn!("bearer token contains non-header characters, request left undecorated");
            }
        }
    }
}
