//! Health status types and provider records

use crate::core::providers::{CapabilitySet, ProviderType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provider health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Last observation succeeded
    Up,
    /// Last observation failed
    Down,
    /// Never observed
    Unknown,
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        matches!(self, HealthStatus::Up)
    }
}

/// Health record for one provider
///
/// Owned by the [`HealthRegistry`](super::HealthRegistry); everything outside
/// the registry only sees clones.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderRecord {
    pub provider: ProviderType,
    pub capabilities: CapabilitySet,
    pub status: HealthStatus,
    /// Time of the most recent observation, `None` if never observed
    pub last_checked: Option<DateTime<Utc>>,
    /// Latency of the last successful probe or call
    pub response_time_ms: Option<u64>,
    /// Error detail of the last failed observation
    pub last_error: Option<String>,
    /// Position in the live ordering, 1 is preferred
    pub priority_rank: usize,
}

impl ProviderRecord {
    pub fn new(provider: ProviderType, capabilities: CapabilitySet) -> Self {
        Self {
            provider,
            capabilities,
            status: HealthStatus::Unknown,
            last_checked: None,
            response_time_ms: None,
            last_error: None,
            priority_rank: 0,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status.is_up()
    }
}

/// Aggregate view over all records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HealthSnapshot {
    pub total: usize,
    pub up: usize,
    pub down: usize,
    pub unknown: usize,
    /// Providers in rank order
    pub ordered: Vec<ProviderType>,
}

impl HealthSnapshot {
    /// True when at least one provider is up
    pub fn any_available(&self) -> bool {
        self.up > 0
    }
}
