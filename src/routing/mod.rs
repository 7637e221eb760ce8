//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Refresh cycle (poll-driven):
//!     registry enumeration
//!     → builder.rs (merge static + discovered into a RouteMap,
//!                   push per-service tables to consumers)
//!     → store.rs (atomic snapshot swap)
//!
//! Request time:
//!     store.rs (load table for the target service)
//!     → table.rs (select the entry for the request's channel and path)
//! ```
//!
//! # Design Decisions
//! - The map is rebuilt wholesale every cycle, never patched in place
//! - Deterministic: identical registry enumeration yields an identical map
//! - Conflicts resolve first-writer-wins; static configuration always wins
//! - No regex in the refresh or lookup paths (prefix matching only)

pub mod builder;
pub mod channel;
pub mod refresh;
pub mod store;
pub mod table;
