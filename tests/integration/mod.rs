//! Integration tests for llm-failover
//!
//! These tests drive the manager end to end with scripted providers.

pub mod concurrency_tests;
pub mod config_tests;
pub mod manager_tests;
