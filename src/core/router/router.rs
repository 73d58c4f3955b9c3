//! Router core structure
//!
//! Holds the resolved service profiles, the instantiated providers and a
//! handle to the shared health registry. The router itself is immutable after
//! construction; all mutable state lives in the registry.

use super::config::ServiceProfile;
use super::error::RouterError;
use crate::config::ServiceConfig;
use crate::core::health::HealthRegistry;
use crate::core::providers::{CapabilitySet, Provider, ProviderCapabilityResolver, ProviderType};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Failover router
pub struct Router {
    /// Service key to resolved profile
    pub(crate) profiles: HashMap<String, ServiceProfile>,
    /// Instantiated providers by identity
    pub(crate) providers: HashMap<ProviderType, Arc<dyn Provider>>,
    /// Capability table for every instantiated provider
    pub(crate) capabilities: HashMap<ProviderType, CapabilitySet>,
    /// Shared health registry
    pub(crate) health: Arc<HealthRegistry>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("services", &self.profiles.keys().collect::<Vec<_>>())
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Router {
    /// Create an empty router over `health`
    pub fn new(health: Arc<HealthRegistry>) -> Self {
        Self {
            profiles: HashMap::new(),
            providers: HashMap::new(),
            capabilities: HashMap::new(),
            health,
        }
    }

    /// Build a router from service configuration
    ///
    /// Every provider referenced by a resolved profile is registered with the
    /// health registry, services in key order and primary before fallbacks.
    pub fn from_services(
        services: &BTreeMap<String, ServiceConfig>,
        resolver: &ProviderCapabilityResolver,
        providers: Vec<Arc<dyn Provider>>,
        health: Arc<HealthRegistry>,
    ) -> Result<Self, RouterError> {
        let mut router = Self::new(health);

        for provider in providers {
            let id = provider.provider_type();
            let capabilities = resolver.capabilities_of(&id)?;
            router.add_provider(provider, capabilities);
        }

        for (key, config) in services {
            if key.trim().is_empty() {
                return Err(RouterError::Configuration(
                    "Service key cannot be empty".to_string(),
                ));
            }
            let profile =
                ServiceProfile::from_config(key, config, resolver, |p| router.has_provider(p))?;
            router.add_profile(profile);
        }

        info!(
            "Router initialized with {} services and {} tracked providers",
            router.profiles.len(),
            router.health.len()
        );

        Ok(router)
    }

    /// Add an instantiated provider; a later provider with the same id replaces the earlier one
    pub fn add_provider(&mut self, provider: Arc<dyn Provider>, capabilities: CapabilitySet) {
        let id = provider.provider_type().normalized();
        if self.providers.insert(id.clone(), provider).is_some() {
            warn!("Provider {} registered twice, keeping the last instance", id);
        }
        self.capabilities.insert(id, capabilities);
    }

    /// Add a service profile and register its providers for health tracking
    pub fn add_profile(&mut self, profile: ServiceProfile) {
        for target in profile.targets() {
            let capabilities = self
                .capabilities
                .get(&target.provider)
                .copied()
                .unwrap_or_default();
            self.health.register(target.provider.clone(), capabilities);
        }
        debug!(
            "Added service '{}' (primary {}, {} fallbacks)",
            profile.key,
            profile.primary.provider,
            profile.fallbacks.len()
        );
        self.profiles.insert(profile.key.clone(), profile);
    }

    pub fn profile(&self, service: &str) -> Option<&ServiceProfile> {
        self.profiles.get(service)
    }

    pub fn provider(&self, id: &ProviderType) -> Option<Arc<dyn Provider>> {
        self.providers.get(&id.normalized()).cloned()
    }

    pub fn has_provider(&self, id: &ProviderType) -> bool {
        self.providers.contains_key(&id.normalized())
    }

    /// Configured service keys, sorted
    pub fn service_keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.profiles.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn health(&self) -> &Arc<HealthRegistry> {
        &self.health
    }

    /// Instantiated providers keyed by identity
    pub fn providers(&self) -> &HashMap<ProviderType, Arc<dyn Provider>> {
        &self.providers
    }
}
