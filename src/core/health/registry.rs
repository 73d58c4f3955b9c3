//! Health registry
//!
//! Single table of provider records guarded by one `RwLock`. Every write
//! re-ranks the whole table before releasing the lock, so readers never see a
//! half-ranked state.

use super::types::{HealthSnapshot, HealthStatus, ProviderRecord};
use crate::core::providers::{CapabilitySet, ProviderType};
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

/// Process-wide provider health table
#[derive(Debug, Default)]
pub struct HealthRegistry {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    /// Records in registration order
    records: Vec<ProviderRecord>,
    /// Indices into `records`, best first
    ranked: Vec<usize>,
}

impl HealthRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider with unknown status
    ///
    /// Registering an id twice keeps the existing record.
    pub fn register(&self, provider: ProviderType, capabilities: CapabilitySet) {
        let mut inner = self.inner.write();
        if inner.position(&provider).is_some() {
            return;
        }
        debug!("Registering provider for health tracking: {}", provider);
        inner.records.push(ProviderRecord::new(provider, capabilities));
        inner.rerank();
    }

    /// Overwrite the latest observation for a provider and re-rank
    ///
    /// Observations for unregistered providers are ignored, which also covers
    /// late writes after [`clear`](Self::clear).
    pub fn record_outcome(
        &self,
        provider: &ProviderType,
        status: HealthStatus,
        response_time_ms: Option<u64>,
        error_detail: Option<String>,
    ) {
        let mut inner = self.inner.write();
        let Some(idx) = inner.position(provider) else {
            debug!("Ignoring health outcome for unregistered provider {}", provider);
            return;
        };

        let record = &mut inner.records[idx];
        record.status = status;
        record.last_checked = Some(Utc::now());
        record.response_time_ms = response_time_ms;
        record.last_error = error_detail;

        debug!(
            "Recorded {:?} for {} (response_time_ms={:?})",
            status, provider, response_time_ms
        );

        inner.rerank();
    }

    /// All registered providers, best rank first
    pub fn ordered_providers(&self) -> Vec<ProviderType> {
        let inner = self.inner.read();
        inner
            .ranked
            .iter()
            .map(|&idx| inner.records[idx].provider.clone())
            .collect()
    }

    /// Providers with at least one recorded outcome, best rank first
    ///
    /// Never-observed providers are left out so callers can keep their own
    /// order for them.
    pub fn observed_ranking(&self) -> Vec<ProviderType> {
        let inner = self.inner.read();
        inner
            .ranked
            .iter()
            .map(|&idx| &inner.records[idx])
            .filter(|r| r.last_checked.is_some())
            .map(|r| r.provider.clone())
            .collect()
    }

    /// Registered providers in registration order
    pub fn providers(&self) -> Vec<ProviderType> {
        self.inner
            .read()
            .records
            .iter()
            .map(|r| r.provider.clone())
            .collect()
    }

    pub fn is_healthy(&self, provider: &ProviderType) -> bool {
        self.record(provider).is_some_and(|r| r.is_healthy())
    }

    /// Copy of one record
    pub fn record(&self, provider: &ProviderType) -> Option<ProviderRecord> {
        let inner = self.inner.read();
        inner.position(provider).map(|idx| inner.records[idx].clone())
    }

    /// Copies of all records, best rank first
    pub fn records(&self) -> Vec<ProviderRecord> {
        let inner = self.inner.read();
        inner
            .ranked
            .iter()
            .map(|&idx| inner.records[idx].clone())
            .collect()
    }

    pub fn snapshot(&self) -> HealthSnapshot {
        let inner = self.inner.read();
        let mut snapshot = HealthSnapshot {
            total: inner.records.len(),
            ordered: inner
                .ranked
                .iter()
                .map(|&idx| inner.records[idx].provider.clone())
                .collect(),
            ..Default::default()
        };
        for record in &inner.records {
            match record.status {
                HealthStatus::Up => snapshot.up += 1,
                HealthStatus::Down => snapshot.down += 1,
                HealthStatus::Unknown => snapshot.unknown += 1,
            }
        }
        snapshot
    }

    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().records.is_empty()
    }

    /// Drop every record
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.records.clear();
        inner.ranked.clear();
    }
}

impl Inner {
    fn position(&self, provider: &ProviderType) -> Option<usize> {
        self.records.iter().position(|r| &r.provider == provider)
    }

    /// Healthy providers first, fastest first, never-timed last among them.
    /// Unhealthy providers follow, the one that failed longest ago (or was
    /// never checked) first. Ties keep registration order.
    fn rerank(&mut self) {
        let (mut healthy, mut unhealthy): (Vec<usize>, Vec<usize>) =
            (0..self.records.len()).partition(|&idx| self.records[idx].is_healthy());

        healthy.sort_by_key(|&idx| self.records[idx].response_time_ms.unwrap_or(u64::MAX));
        unhealthy.sort_by_key(|&idx| self.records[idx].last_checked);

        self.ranked = healthy;
        self.ranked.extend(unhealthy);

        for (rank, &idx) in self.ranked.iter().enumerate() {
            self.records[idx].priority_rank = rank + 1;
        }
    }
}
