//! Failover router
//!
//! ## Module Structure
//!
//! - `config` - Service profiles and retry policy
//! - `error` - Terminal router errors
//! - `fallback` - Execution results and per-attempt records
//! - `router` - Core Router struct
//! - `selection` - Capability filtering and health-ranked candidate order
//! - `execute_impl` - Execute methods with retry and failover

pub mod config;
pub mod error;
pub mod execute_impl;
pub mod fallback;
pub mod router;
pub mod selection;

#[cfg(test)]
mod tests;

pub use config::{RetryPolicy, ServiceProfile, ServiceTarget};
pub use error::RouterError;
pub use execute_impl::CandidateHandle;
pub use fallback::{AttemptOutcome, CallAttempt, ExecutionResult};
pub use router::Router;
pub use selection::blend_with_ranking;
