//! Test fixtures
//!
//! Factories for manager configuration with sensible defaults. Health checks
//! are off unless a test turns them on, so probe traffic never interferes
//! with call counting.

use super::providers::ScriptedProvider;
use llm_failover::{ManagerConfig, Provider, ProviderManager, ServiceConfig};
use std::sync::Arc;

/// Service with a primary model, ordered fallbacks and no retry delay
pub fn service(primary: &str, fallbacks: &[&str]) -> ServiceConfig {
    fallbacks
        .iter()
        .fold(ServiceConfig::new(primary), |config, model| {
            config.with_fallback_model(*model)
        })
        .with_retries(3, 0)
}

/// Build a manager over scripted providers
pub fn manager_with(config: ManagerConfig, providers: &[Arc<ScriptedProvider>]) -> ProviderManager {
    let providers: Vec<Arc<dyn Provider>> = providers
        .iter()
        .map(|p| p.clone() as Arc<dyn Provider>)
        .collect();
    ProviderManager::new(&config, providers).expect("valid test configuration")
}

/// Empty configuration with background probing disabled
pub fn quiet_config() -> ManagerConfig {
    ManagerConfig::default().without_health_checks()
}
