//! Health monitor configuration

use super::*;
use crate::core::health::HealthMonitorConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Background health probing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthSettings {
    /// Run the background probe loop
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between probe cycles
    #[serde(default = "default_health_interval_secs")]
    pub interval_secs: u64,
    /// Timeout for a single probe in milliseconds
    #[serde(default = "default_health_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: default_health_interval_secs(),
            timeout_ms: default_health_timeout_ms(),
        }
    }
}

impl HealthSettings {
    pub fn monitor_config(&self) -> HealthMonitorConfig {
        HealthMonitorConfig {
            check_interval: Duration::from_secs(self.interval_secs),
            check_timeout: Duration::from_millis(self.timeout_ms),
            auto_check_enabled: self.enabled,
        }
    }
}
