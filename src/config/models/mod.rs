//! Configuration data models
//!
//! This module defines all configuration structures used by the manager.

#![allow(missing_docs)]

pub mod health;
pub mod logging;
pub mod resolver;
pub mod service;

pub use health::*;
pub use logging::*;
pub use resolver::*;
pub use service::*;

/// Default for boolean switches that are on unless disabled
pub fn default_true() -> bool {
    true
}

/// Default attempts per candidate
pub fn default_max_retries() -> u32 {
    3
}

/// Default delay between attempts on one candidate
pub fn default_retry_delay_ms() -> u64 {
    500
}

/// Default probe interval
pub fn default_health_interval_secs() -> u64 {
    60
}

/// Default per-probe timeout
pub fn default_health_timeout_ms() -> u64 {
    10_000
}

/// Default log level
pub fn default_log_level() -> String {
    "info".to_string()
}
