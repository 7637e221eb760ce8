//! URL transformation subsystem.
//!
//! # Data Flow
//! ```text
//! inbound URL + (channel, service id)
//!     → gateway.rs (is the gateway's own identity known yet?)
//!     → url.rs (parse, select route, cut the backend prefix)
//!     → gateway-facing URL, or a precise UrlTransformError
//! ```
//!
//! # Design Decisions
//! - Pure per-request function; the route table is never mutated
//! - Error messages carry the offending URL/path verbatim, the caller
//!   decides the fallback (typically "keep the original URL")

pub mod gateway;
pub mod url;
