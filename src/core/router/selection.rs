//! Candidate selection
//!
//! The candidate list for a call is the service's static target list,
//! filtered by capability and then re-ordered by the live health ranking.

use super::config::{ServiceProfile, ServiceTarget};
use super::router::Router;
use crate::core::providers::ProviderType;
use crate::core::types::OperationKind;
use tracing::debug;

impl Router {
    /// Static candidates for `kind`: primary then fallbacks, deduplicated,
    /// restricted to instantiated providers able to serve `kind`
    pub fn static_candidates(&self, profile: &ServiceProfile, kind: OperationKind) -> Vec<ServiceTarget> {
        let mut candidates: Vec<ServiceTarget> = Vec::new();

        for target in profile.targets() {
            if candidates.iter().any(|c| c.provider == target.provider) {
                continue;
            }
            let Some(provider) = self.providers.get(&target.provider) else {
                continue;
            };
            let declared = self
                .capabilities
                .get(&target.provider)
                .is_some_and(|caps| caps.contains(kind));
            if !declared || !provider.supports(kind) {
                debug!(
                    "Skipping {} for service '{}': {} not supported",
                    target.provider, profile.key, kind
                );
                continue;
            }
            candidates.push(target.clone());
        }

        candidates
    }

    /// Candidates in effective order for one call
    ///
    /// Takes a single snapshot of the health ranking. Providers with no
    /// recorded outcome are unranked and keep their static position.
    pub fn ordered_candidates(&self, profile: &ServiceProfile, kind: OperationKind) -> Vec<ServiceTarget> {
        let candidates = self.static_candidates(profile, kind);
        let ranking = self.health.observed_ranking();
        let static_order: Vec<ProviderType> =
            candidates.iter().map(|c| c.provider.clone()).collect();

        blend_with_ranking(&static_order, &ranking)
            .into_iter()
            .map(|idx| candidates[idx].clone())
            .collect()
    }
}

/// Project a static order onto a health ranking
///
/// Returns indices into `static_order`. Entries present in `ranking` come
/// first in ranking order; absent entries follow in static order.
pub fn blend_with_ranking(static_order: &[ProviderType], ranking: &[ProviderType]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..static_order.len()).collect();
    order.sort_by_key(|&idx| {
        ranking
            .iter()
            .position(|p| p == &static_order[idx])
            .unwrap_or(usize::MAX)
    });
    order
}
