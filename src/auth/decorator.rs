//! Per-request authentication decoration.
//!
//! # Responsibilities
//! - Decide whether the outbound request needs backend authentication
//! - Enforce token validity when the resolved command demands it
//! - Apply the resolved command to the outbound request
//!
//! # Design Decisions
//! - Gated on the universal-authentication marker; without it the
//!   decorator is a no-op
//! - A missing load-balanced instance is a pipeline wiring bug, reported
//!   as such rather than a user-facing authentication failure
//! - Rejections all surface one fixed message; the caller maps it to an
//!   unauthorized response

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Request};
use thiserror::Error;

use crate::auth::scheme::{ServiceAuthenticationSource, TokenValidator};
use crate::registry::ServiceInstance;

/// Request-scoped state populated by earlier pipeline stages.
#[derive(Debug, Default)]
pub struct RequestContext {
    universal_auth: bool,
    instance: Option<Arc<ServiceInstance>>,
    inbound_headers: HeaderMap,
}

impl RequestContext {
    /// Context for one inbound client request.
    pub fn new(inbound_headers: HeaderMap) -> Self {
        Self {
            universal_auth: false,
            instance: None,
            inbound_headers,
        }
    }

    /// Mark this request for universal authentication decoration.
    pub fn mark_universal_auth(&mut self) {
        self.universal_auth = true;
    }

    /// Record the backend instance the load balancer resolved.
    pub fn set_instance(&mut self, instance: Arc<ServiceInstance>) {
        self.instance = Some(instance);
    }

    pub fn universal_auth(&self) -> bool {
        self.universal_auth
    }

    pub fn instance(&self) -> Option<&ServiceInstance> {
        self.instance.as_deref()
    }

    pub fn inbound_headers(&self) -> &HeaderMap {
        &self.inbound_headers
    }
}

/// Why decoration aborted the request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestAbortError {
    /// Fail-closed security rejection; mapped to an unauthorized response.
    #[error("Invalid JWT token")]
    AuthenticationRejected,

    /// The stage resolving load-balanced instances did not run before this
    /// decorator. A wiring bug, not a client error.
    #[error("load-balanced instance is not present in the request context")]
    ContextNotReady,
}

/// Decorates outbound proxied requests with backend authentication.
pub struct ServiceAuthenticationDecorator {
    source: Arc<dyn ServiceAuthenticationSource>,
    validator: Arc<dyn TokenValidator>,
}

impl ServiceAuthenticationDecorator {
    pub fn new(
        source: Arc<dyn ServiceAuthenticationSource>,
        validator: Arc<dyn TokenValidator>,
    ) -> Self {
        Self { source, validator }
    }

    /// Apply the backend's authentication command to `request`, or abort.
    pub fn decorate(
        &self,
        request: &mut Request<Body>,
        context: &RequestContext,
    ) -> Result<(), RequestAbortError> {
        if !context.universal_auth() {
            return Ok(());
        }

        let instance = context
            .instance()
            .ok_or(RequestAbortError::ContextNotReady)?;
        let authentication = self.source.authentication_for(instance);
        let token = bearer_token(context.inbound_headers());

        let mut rejected = false;
        let mut command = None;
        match self
            .source
            .resolve_command(&authentication, token.as_deref())
        {
            Ok(resolved) => {
                if let Some(cmd) = &resolved {
                    if cmd.requires_valid_token() {
                        rejected = match token.as_deref() {
                            None => true,
                            Some(token) => match self.validator.validate(token) {
                                Ok(validation) => !validation.authenticated,
                                Err(error) => {
                                    tracing::debug!(service = %instance.service_id, %error, "token validation failed");
                                    true
                                }
                            },
                        };
                    }
                }
                command = resolved;
            }
            Err(error) => {
                tracing::debug!(service = %instance.service_id, %error, "authentication command resolution failed");
                rejected = true;
            }
        }

        if rejected {
            return Err(RequestAbortError::AuthenticationRejected);
        }

        match command {
            Some(command) => command.apply_to(request),
            // resolution yielded nothing meaningful; deliberate pass-through
            None => {
                tracing::debug!(service = %instance.service_id, "no authentication command resolved, request passes through unchanged");
            }
        }
        Ok(())
    }
}

/// Extract the bearer token from the inbound `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let token = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .trim();
    (!token.is_empty()).then(|| token.to_string())
}
