//! Core routing functionality
//!
//! This module contains the failover engine and the data structures it works on.

pub mod health; // Health registry and background probing
pub mod params; // Three-tier generation parameter merge
pub mod providers;
pub mod router;
pub mod types;
