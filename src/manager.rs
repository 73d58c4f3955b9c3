//! Provider manager
//!
//! Public entry point. Owns the instantiated providers, the resolved service
//! profiles, the health registry and the background probe loop, and exposes
//! routed calls on top of them.

use crate::config::ManagerConfig;
use crate::core::health::{
    HealthMonitor, HealthRegistry, HealthSnapshot, ProbeFn, ProbeFuture, ProviderRecord,
};
use crate::core::params::GenerationParams;
use crate::core::providers::{Provider, ProviderCapabilityResolver, ProviderError, ProviderType};
use crate::core::router::{CandidateHandle, ExecutionResult, Router, RouterError};
use crate::core::types::{ChatMessage, OperationKind, SpeechRequest, TranscriptionRequest};
use crate::utils::error::Result;
use bytes::Bytes;
use std::collections::HashMap;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Failover-routing provider manager
#[derive(Debug)]
pub struct ProviderManager {
    router: Router,
    health: Arc<HealthRegistry>,
    monitor: HealthMonitor,
    destroyed: AtomicBool,
}

impl ProviderManager {
    /// Build a manager from configuration and instantiated providers
    ///
    /// Starts the background probe loop when health checks are enabled and a
    /// tokio runtime is available.
    pub fn new(config: &ManagerConfig, providers: Vec<Arc<dyn Provider>>) -> Result<Self> {
        let resolver = ProviderCapabilityResolver::from_settings(&config.resolver);
        let health = Arc::new(HealthRegistry::new());
        let router = Router::from_services(&config.services, &resolver, providers, health.clone())?;

        let monitor = HealthMonitor::new(
            config.health.monitor_config(),
            health.clone(),
            probe_fn(router.providers()),
        );
        if monitor.config().auto_check_enabled {
            monitor.start();
        }

        info!(
            "Provider manager ready: services [{}]",
            router.service_keys().join(", ")
        );

        Ok(Self {
            router,
            health,
            monitor,
            destroyed: AtomicBool::new(false),
        })
    }

    /// Load configuration from a YAML file and build a manager
    pub async fn from_file<P: AsRef<Path>>(
        path: P,
        providers: Vec<Arc<dyn Provider>>,
    ) -> Result<Self> {
        let config = ManagerConfig::from_file(path).await?;
        Self::new(&config, providers)
    }

    /// Execute an operation for a service with retry and failover
    pub async fn execute<T, F, Fut>(
        &self,
        service: &str,
        kind: OperationKind,
        operation: F,
    ) -> std::result::Result<ExecutionResult<T>, RouterError>
    where
        F: Fn(CandidateHandle) -> Fut,
        Fut: Future<Output = std::result::Result<T, ProviderError>>,
    {
        self.ensure_alive()?;
        self.router.execute(service, kind, operation).await
    }

    /// Execute with per-call parameter overrides
    pub async fn execute_with_params<T, F, Fut>(
        &self,
        service: &str,
        kind: OperationKind,
        params: &GenerationParams,
        operation: F,
    ) -> std::result::Result<ExecutionResult<T>, RouterError>
    where
        F: Fn(CandidateHandle) -> Fut,
        Fut: Future<Output = std::result::Result<T, ProviderError>>,
    {
        self.ensure_alive()?;
        self.router
            .execute_with_params(service, kind, params, operation)
            .await
    }

    /// Routed chat completion
    pub async fn chat(
        &self,
        service: &str,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> std::result::Result<ExecutionResult<String>, RouterError> {
        self.execute_with_params(service, OperationKind::Text, params, |handle| async move {
            handle
                .provider
                .chat(&handle.model, messages, &handle.params)
                .await
        })
        .await
    }

    /// Routed speech synthesis
    pub async fn synthesize_speech(
        &self,
        service: &str,
        request: &SpeechRequest,
    ) -> std::result::Result<ExecutionResult<Bytes>, RouterError> {
        self.execute(service, OperationKind::SpeechSynthesis, |handle| async move {
            handle.provider.synthesize_speech(&handle.model, request).await
        })
        .await
    }

    /// Routed speech recognition
    pub async fn transcribe(
        &self,
        service: &str,
        request: &TranscriptionRequest,
    ) -> std::result::Result<ExecutionResult<String>, RouterError> {
        self.execute(service, OperationKind::SpeechRecognition, |handle| async move {
            handle.provider.transcribe(&handle.model, request).await
        })
        .await
    }

    /// Tracked providers, best health rank first
    pub fn ordered_providers(&self) -> Vec<ProviderType> {
        self.health.ordered_providers()
    }

    /// Health records for one provider or all of them (rank order)
    pub fn provider_health(
        &self,
        provider: Option<&ProviderType>,
    ) -> std::result::Result<Vec<ProviderRecord>, RouterError> {
        self.ensure_alive()?;
        match provider {
            None => Ok(self.health.records()),
            Some(id) => self
                .health
                .record(id)
                .map(|record| vec![record])
                .ok_or_else(|| {
                    RouterError::Configuration(format!("Unknown provider: {}", id))
                }),
        }
    }

    pub fn health_snapshot(&self) -> HealthSnapshot {
        self.health.snapshot()
    }

    /// Run one probe cycle now, independent of the background loop
    pub async fn check_health(&self) -> std::result::Result<(), RouterError> {
        self.ensure_alive()?;
        self.monitor.check_all().await;
        Ok(())
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn monitor(&self) -> &HealthMonitor {
        &self.monitor
    }

    /// Tear the manager down
    ///
    /// Stops the probe loop and clears all health records. Calls already in
    /// flight run to completion; later calls fail with
    /// [`RouterError::ManagerDestroyed`]. Calling it again is a no-op.
    pub fn destroy(&self) {
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.monitor.stop();
        self.health.clear();
        info!("Provider manager destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    fn ensure_alive(&self) -> std::result::Result<(), RouterError> {
        if self.is_destroyed() {
            Err(RouterError::ManagerDestroyed)
        } else {
            Ok(())
        }
    }
}

/// Probe function dispatching to each provider's `probe_health`
fn probe_fn(providers: &HashMap<ProviderType, Arc<dyn Provider>>) -> ProbeFn {
    let providers = Arc::new(providers.clone());
    Arc::new(move |id: ProviderType| -> ProbeFuture {
        let provider = providers.get(&id).cloned();
        Box::pin(async move {
            match provider {
                Some(provider) => provider.probe_health().await,
                None => Err(ProviderError::vendor(id, None, "provider not instantiated")),
            }
        })
    })
}
