//! Authentication scheme resolution.
//!
//! # Responsibilities
//! - Describe the authentication a backend instance declares
//! - Resolve the concrete command for a (scheme, token) pair
//! - Validate bearer tokens through an external validator
//!
//! # Design Decisions
//! - Scheme names stay free-form strings; the command resolver owns the
//!   interpretation, this crate only transports them
//! - Every resolver/validator error is an authentication failure to the
//!   decorator; there is no "soft" error channel

use std::sync::Arc;

use thiserror::Error;

use crate::auth::command::AuthenticationCommand;
use crate::registry::ServiceInstance;

/// The authentication a backend instance declares in its registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authentication {
    /// Scheme identifier, e.g. `bypass`, `bearer`, `httpBasicPassTicket`.
    pub scheme: String,
    /// Backend application id some schemes need to mint credentials for.
    pub applid: Option<String>,
}

impl Authentication {
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            applid: None,
        }
    }

    pub fn with_applid(mut self, applid: impl Into<String>) -> Self {
        self.applid = Some(applid.into());
        self
    }
}

/// Failures raised by scheme resolution or token validation.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("invalid credentials: {0}")]
    BadCredentials(String),

    #[error("authentication scheme {0} is not supported")]
    UnsupportedScheme(String),

    #[error("token validation failed: {0}")]
    TokenValidation(String),
}

/// Outcome of validating a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenValidation {
    pub authenticated: bool,
    /// Subject the token was issued to, when validation could extract one.
    pub subject: Option<String>,
}

impl TokenValidation {
    pub fn authenticated(subject: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            subject: Some(subject.into()),
        }
    }

    pub fn rejected() -> Self {
        Self {
            authenticated: false,
            subject: None,
        }
    }
}

/// External validator for bearer tokens (signature, expiry, issuer).
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str) -> Result<TokenValidation, AuthenticationError>;
}

/// Resolves what authentication a backend wants and the command to apply it.
pub trait ServiceAuthenticationSource: Send + Sync {
    /// The authentication the instance declared at registration.
    fn authentication_for(&self, instance: &ServiceInstance) -> Authentication;

    /// The concrete command for this scheme/token pair. `Ok(None)` means
    /// resolution yielded nothing meaningful for this request.
    fn resolve_command(
        &self,
        authentication: &Authentication,
        token: Option<&str>,
    ) -> Result<Option<Arc<dyn AuthenticationCommand>>, AuthenticationError>;
}
