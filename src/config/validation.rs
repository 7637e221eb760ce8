//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route keys are `/`-rooted wildcard patterns
//! - Validate value ranges and explicit URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    RouteKeyNotRooted { path: String },
    RouteKeyMissingWildcard { path: String },
    EmptyServiceId { path: String },
    InvalidExplicitUrl { path: String, url: String },
    UnsupportedScheme { scheme: String },
    ZeroRefreshInterval,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::RouteKeyNotRooted { path } => {
                write!(f, "route key {path} must start with '/'")
            }
            ValidationError::RouteKeyMissingWildcard { path } => {
                write!(f, "route key {path} must end with '/**'")
            }
            ValidationError::EmptyServiceId { path } => {
                write!(f, "route {path} has an empty service id")
            }
            ValidationError::InvalidExplicitUrl { path, url } => {
                write!(f, "route {path} has an unparsable url {url}")
            }
            ValidationError::UnsupportedScheme { scheme } => {
                write!(f, "gateway scheme {scheme} is not http or https")
            }
            ValidationError::ZeroRefreshInterval => {
                write!(f, "discovery refresh interval must be at least one second")
            }
        }
    }
}

/// Check everything serde cannot. Collects every problem before reporting.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.gateway.scheme != "http" && config.gateway.scheme != "https" {
        errors.push(ValidationError::UnsupportedScheme {
            scheme: config.gateway.scheme.clone(),
        });
    }

    if config.discovery.refresh_interval_secs == 0 {
        errors.push(ValidationError::ZeroRefreshInterval);
    }

    for route in &config.routes {
        if !route.path.starts_with('/') {
            errors.push(ValidationError::RouteKeyNotRooted {
                path: route.path.clone(),
            });
        }
        if !route.path.ends_with("/**") {
            errors.push(ValidationError::RouteKeyMissingWildcard {
                path: route.path.clone(),
            });
        }
        if route.service_id.is_empty() {
            errors.push(ValidationError::EmptyServiceId {
                path: route.path.clone(),
            });
        }
        if let Some(url) = &route.url {
            if Url::parse(url).is_err() {
                errors.push(ValidationError::InvalidExplicitUrl {
                    path: route.path.clone(),
                    url: url.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
