//! Authentication decoration subsystem.
//!
//! # Data Flow
//! ```text
//! request context (populated by earlier pipeline stages)
//!     → decorator.rs (universal-auth gate, instance lookup)
//!     → scheme.rs (resolve the backend's declared scheme + command)
//!     → command.rs (apply the command to the outbound request)
//! ```
//!
//! # Design Decisions
//! - Fail closed: any authentication failure during resolution or token
//!   validation rejects the request with one fixed message
//! - "No command" is an explicit `Option`, never a dangling reference;
//!   an accepted request without a command passes through unchanged
//! - JWT crypto lives behind the `TokenValidator` trait, not here

pub mod command;
pub mod decorator;
pub mod scheme;
