//! Gateway Routing Core
//!
//! The dispatch core of an API gateway: a live routing table derived from a
//! dynamic service registry, client-URL-to-gateway-URL rewriting, and
//! per-backend authentication decoration of outbound requests.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────────┐
//!                    │                 GATEWAY ROUTING CORE                  │
//!                    │                                                       │
//!   service registry │  ┌──────────┐   ┌──────────┐   ┌───────────────┐     │
//!   ─────────────────┼─▶│ registry │──▶│ routing  │──▶│ routing store │     │
//!   (poll)           │  │ metadata │   │ builder  │   │ (atomic swap) │     │
//!                    │  └──────────┘   └────┬─────┘   └───────┬───────┘     │
//!                    │                      │                 │             │
//!                    │                      ▼                 ▼             │
//!                    │               per-service        request-time        │
//!                    │               route tables       URL transform       │
//!                    │                                                      │
//!                    │  ┌────────────────────────────────────────────────┐  │
//!                    │  │             Cross-Cutting Concerns             │  │
//!                    │  │  ┌────────┐ ┌───────────────┐ ┌─────────────┐  │  │
//!                    │  │  │ config │ │ auth          │ │ observa-    │  │  │
//!                    │  │  │ reload │ │ decoration    │ │ bility      │  │  │
//!                    │  │  └────────┘ └───────────────┘ └─────────────┘  │  │
//!                    │  └────────────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────────────┘
//! ```
//!
//! The proxy transport, the registry client, and JWT crypto are external
//! collaborators behind traits; this crate owns the decisions between them:
//! which routes exist, what URL a request maps to, and whether an outbound
//! request gets authentication material attached.

// Core subsystems
pub mod config;
pub mod registry;
pub mod routing;
pub mod transform;

// Cross-cutting concerns
pub mod auth;
pub mod observability;

pub use auth::decorator::{RequestAbortError, ServiceAuthenticationDecorator};
pub use config::GatewayConfig;
pub use routing::builder::{MergeStrategy, RouteMap, RouteTableBuilder};
pub use routing::channel::ChannelType;
pub use routing::store::{RoutedServicesStore, RouteTableStore};
pub use routing::table::{RouteEntry, RoutedServiceTable};
pub use transform::url::{UrlTransformError, UrlTransformer};
