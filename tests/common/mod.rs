//! Common test utilities for llm-failover
//!
//! - Scripted providers that never touch the network
//! - Manager configuration fixtures

pub mod fixtures;

pub use fixtures::{manager_with, quiet_config, service};
pub use providers::{CallScript, ProbeScript, ScriptedProvider};
