//! Provider health tracking
//!
//! # Module Structure
//!
//! - `types` - Health status and per-provider records
//! - `registry` - Shared record table and the ranking algorithm
//! - `monitor` - Background probe loop feeding the registry
//! - `tests` - Test suite for health tracking

pub mod monitor;
pub mod registry;
pub mod types;

pub use monitor::{HealthMonitor, HealthMonitorConfig, ProbeFn, ProbeFuture};
pub use registry::HealthRegistry;
pub use types::{HealthSnapshot, HealthStatus, ProviderRecord};
