//! Service profiles and retry policy
//!
//! A [`ServiceProfile`] is the resolved, immutable form of one service entry
//! from configuration: model strings are classified into providers, fallbacks
//! are deduplicated and anything not instantiated in the manager is dropped.

use super::error::RouterError;
use crate::config::ServiceConfig;
use crate::core::params::GenerationParams;
use crate::core::providers::{ProviderCapabilityResolver, ProviderType};
use std::time::Duration;
use tracing::warn;

/// A provider paired with the model to request from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTarget {
    pub provider: ProviderType,
    pub model: String,
}

impl ServiceTarget {
    pub fn new(provider: ProviderType, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }
}

/// Per-service retry policy
///
/// ## Defaults
///
/// - `max_retries`: 3 attempts per candidate
/// - `retry_delay`: 500ms between attempts on the same candidate
/// - `request_timeout`: none
/// - `retry_auth_errors`: true
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per candidate, at least 1
    pub max_retries: u32,
    /// Fixed delay between attempts on the same candidate
    pub retry_delay: Duration,
    /// Upper bound for a single attempt
    pub request_timeout: Option<Duration>,
    /// Whether authentication failures are retried on the same candidate
    pub retry_auth_errors: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
            request_timeout: None,
            retry_auth_errors: true,
        }
    }
}

impl RetryPolicy {
    /// Attempts per candidate, never less than one
    pub fn attempts(&self) -> u32 {
        self.max_retries.max(1)
    }
}

/// Resolved configuration of one service key
#[derive(Debug, Clone)]
pub struct ServiceProfile {
    pub key: String,
    pub primary: ServiceTarget,
    /// Secondary targets in configured order, never containing the primary provider
    pub fallbacks: Vec<ServiceTarget>,
    pub retry: RetryPolicy,
    pub defaults: GenerationParams,
}

impl ServiceProfile {
    /// Build a profile from a service configuration entry
    ///
    /// `is_instantiated` reports whether the manager holds a provider for an
    /// id. Fallbacks without one are dropped with a warning; a primary
    /// without one is a configuration error.
    pub fn from_config(
        key: &str,
        config: &ServiceConfig,
        resolver: &ProviderCapabilityResolver,
        is_instantiated: impl Fn(&ProviderType) -> bool,
    ) -> Result<Self, RouterError> {
        let primary_provider =
            resolver.classify(&config.primary_model, config.endpoint_override.as_deref());

        if !is_instantiated(&primary_provider) {
            return Err(RouterError::Configuration(format!(
                "Service '{}' primary provider '{}' (model '{}') is not instantiated",
                key, primary_provider, config.primary_model
            )));
        }
        resolver.capabilities_of(&primary_provider)?;

        let primary = ServiceTarget::new(primary_provider, config.primary_model.clone());

        let mut fallbacks: Vec<ServiceTarget> = Vec::with_capacity(config.fallback_models.len());
        for entry in &config.fallback_models {
            let provider = entry
                .provider
                .clone()
                .unwrap_or_else(|| resolver.classify(&entry.model, None));

            if provider == primary.provider || fallbacks.iter().any(|t| t.provider == provider) {
                continue;
            }
            if !is_instantiated(&provider) {
                warn!(
                    "Service '{}': dropping fallback '{}' ({}), provider not instantiated",
                    key, entry.model, provider
                );
                continue;
            }
            resolver.capabilities_of(&provider)?;

            fallbacks.push(ServiceTarget::new(provider, entry.model.clone()));
        }

        Ok(Self {
            key: key.to_string(),
            primary,
            fallbacks,
            retry: RetryPolicy {
                max_retries: config.max_retries,
                retry_delay: Duration::from_millis(config.retry_delay_ms),
                request_timeout: config.request_timeout_ms.map(Duration::from_millis),
                retry_auth_errors: config.retry_auth_errors,
            },
            defaults: config.defaults.clone(),
        })
    }

    /// Primary followed by fallbacks
    pub fn targets(&self) -> impl Iterator<Item = &ServiceTarget> {
        std::iter::once(&self.primary).chain(self.fallbacks.iter())
    }

    /// Model configured for `provider` in this service
    pub fn model_for(&self, provider: &ProviderType) -> Option<&str> {
        self.targets()
            .find(|t| &t.provider == provider)
            .map(|t| t.model.as_str())
    }
}
