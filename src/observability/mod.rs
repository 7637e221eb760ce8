//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!
//! Consumers:
//!     → Log aggregation (stdout, file, remote)
//! ```
//!
//! # Design Decisions
//! - Structured fields (service id, route key, counts) on every event
//! - The library only emits; subscriber installation is the embedder's
//!   choice, with a helper here for binaries and tests

pub mod logging;
